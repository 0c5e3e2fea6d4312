use super::domain::{FeatureVector, ProposalRecord, ScoreBreakdown, ScoredProposal};
use super::weights::WeightConfig;

/// Decimal places kept on the combined score. Rounding here keeps repeated
/// runs over identical input from diverging on floating-point noise.
const SCORE_DECIMALS: i32 = 6;

/// Decimal places kept on the per-feature breakdown values.
const BREAKDOWN_DECIMALS: i32 = 4;

/// Reduce a feature vector to one scalar score under the configured weights,
/// retaining the rounded per-feature values plus the raw bid as an auditable
/// breakdown. Pure function; no error conditions.
pub fn combine(
    proposal: &ProposalRecord,
    features: &FeatureVector,
    weights: &WeightConfig,
) -> ScoredProposal {
    let score = weights.rating * features.rating_score
        + weights.acceptance_rate * features.acceptance_rate
        + weights.success_rate * features.success_rate
        + weights.skill_match * features.skill_match
        + weights.price * features.price_score;

    ScoredProposal {
        proposal_id: proposal.proposal_id.clone(),
        freelancer_id: proposal.freelancer_id.clone(),
        score: round_to(score, SCORE_DECIMALS),
        breakdown: ScoreBreakdown {
            rating_score: round_to(features.rating_score, BREAKDOWN_DECIMALS),
            acceptance_rate: round_to(features.acceptance_rate, BREAKDOWN_DECIMALS),
            success_rate: round_to(features.success_rate, BREAKDOWN_DECIMALS),
            skill_match: round_to(features.skill_match, BREAKDOWN_DECIMALS),
            price_score: round_to(features.price_score, BREAKDOWN_DECIMALS),
            bid: proposal.bid_amount,
        },
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
