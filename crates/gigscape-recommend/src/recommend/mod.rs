//! Proposal scoring and ranking for job recommendation requests.
//!
//! The pure core (features, scoring, ranking, pipeline) computes everything
//! from an in-memory snapshot supplied through [`ProposalDirectory`]; the
//! service and router wrap it with boundary validation and the HTTP surface.

pub mod directory;
pub mod domain;
pub(crate) mod features;
pub mod pipeline;
pub(crate) mod ranking;
pub mod router;
pub(crate) mod scoring;
pub mod service;
pub mod weights;

#[cfg(test)]
mod tests;

pub use directory::{DirectoryError, ProposalDirectory};
pub use domain::{
    FeatureVector, FreelancerAggregates, FreelancerId, JobContext, JobId, ProposalId,
    ProposalRecord, ScoreBreakdown, ScoredProposal, SkillId,
};
pub use pipeline::RecommendationPipeline;
pub use router::recommendation_router;
pub use service::{RecommendationError, RecommendationService, DEFAULT_TOP_N};
pub use weights::{WeightConfig, WeightConfigError};
