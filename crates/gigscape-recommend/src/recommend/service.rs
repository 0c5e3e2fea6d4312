use std::sync::Arc;

use tracing::debug;

use super::directory::{DirectoryError, ProposalDirectory};
use super::domain::{FreelancerId, JobId, ScoredProposal};
use super::pipeline::RecommendationPipeline;
use super::weights::WeightConfig;

/// Bound on the result list when the caller does not ask for one.
pub const DEFAULT_TOP_N: usize = 10;

/// Service composing the proposal directory with the scoring pipeline.
pub struct RecommendationService<D> {
    directory: Arc<D>,
    pipeline: RecommendationPipeline,
    default_top_n: usize,
}

impl<D> RecommendationService<D>
where
    D: ProposalDirectory + 'static,
{
    pub fn new(directory: Arc<D>, weights: WeightConfig) -> Self {
        Self::with_default_top_n(directory, weights, DEFAULT_TOP_N)
    }

    pub fn with_default_top_n(
        directory: Arc<D>,
        weights: WeightConfig,
        default_top_n: usize,
    ) -> Self {
        Self {
            directory,
            pipeline: RecommendationPipeline::new(weights),
            default_top_n,
        }
    }

    /// Rank the job's proposals best-to-worst and return at most `top_n` of
    /// them. The raw id and the job's existence are validated here at the
    /// boundary; past that point the computation is total and an empty
    /// proposal list is an empty result, not a failure.
    pub fn recommend_for_job(
        &self,
        raw_job_id: &str,
        top_n: Option<usize>,
    ) -> Result<Vec<ScoredProposal>, RecommendationError> {
        let job_id = JobId::parse(raw_job_id).ok_or_else(|| RecommendationError::InvalidJobId {
            raw: raw_job_id.to_string(),
        })?;

        let job = self
            .directory
            .job_context(&job_id)?
            .ok_or_else(|| RecommendationError::JobNotFound {
                job_id: job_id.clone(),
            })?;

        let proposals = self.directory.proposals_for_job(&job_id)?;
        if proposals.is_empty() {
            return Ok(Vec::new());
        }

        let mut freelancers: Vec<FreelancerId> = proposals
            .iter()
            .map(|proposal| proposal.freelancer_id.clone())
            .collect();
        freelancers.sort();
        freelancers.dedup();

        let aggregates = self.directory.aggregates_for(&freelancers)?;
        let top_n = top_n.unwrap_or(self.default_top_n);

        debug!(
            %job_id,
            proposals = proposals.len(),
            freelancers = freelancers.len(),
            top_n,
            "ranking proposals"
        );

        Ok(self.pipeline.recommend(&job, &proposals, &aggregates, top_n))
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("invalid job id '{raw}'")]
    InvalidJobId { raw: String },
    #[error("job '{job_id}' not found")]
    JobNotFound { job_id: JobId },
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
