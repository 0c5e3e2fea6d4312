use serde::{Deserialize, Serialize};

/// Process-wide weighting of the five proposal features. Loaded once at
/// startup and injected into the pipeline as an immutable value; there is no
/// runtime mutation path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    pub rating: f64,
    pub acceptance_rate: f64,
    pub success_rate: f64,
    pub skill_match: f64,
    pub price: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            rating: 0.35,
            acceptance_rate: 0.20,
            success_rate: 0.20,
            skill_match: 0.15,
            price: 0.10,
        }
    }
}

impl WeightConfig {
    /// Every weight must be a finite, non-negative number. The sum is not
    /// forced to 1.0, but the shipped defaults sum to 1.0 and keep scores in
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<(), WeightConfigError> {
        for (name, value) in self.entries() {
            if !value.is_finite() {
                return Err(WeightConfigError::NotFinite { name });
            }
            if value < 0.0 {
                return Err(WeightConfigError::Negative { name, value });
            }
        }
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, value)| value).sum()
    }

    fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("rating", self.rating),
            ("acceptance_rate", self.acceptance_rate),
            ("success_rate", self.success_rate),
            ("skill_match", self.skill_match),
            ("price", self.price),
        ]
    }
}

/// Rejection raised when a configured weight set is unusable.
#[derive(Debug, thiserror::Error)]
pub enum WeightConfigError {
    #[error("weight '{name}' must be a finite number")]
    NotFinite { name: &'static str },
    #[error("weight '{name}' is negative ({value})")]
    Negative { name: &'static str, value: f64 },
}
