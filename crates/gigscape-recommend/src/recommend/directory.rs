use std::collections::HashMap;

use super::domain::{FreelancerAggregates, FreelancerId, JobContext, JobId, ProposalRecord};

/// Data-layer abstraction supplying the snapshot a recommendation is computed
/// over: the job context, its proposals, and the aggregate statistics for the
/// freelancers behind them. Lets the service run against in-memory fakes in
/// tests and whatever store the deployment uses in production.
pub trait ProposalDirectory: Send + Sync {
    /// Resolve the job's skill requirements and reference budget, or `None`
    /// when no such job exists.
    fn job_context(&self, job_id: &JobId) -> Result<Option<JobContext>, DirectoryError>;

    /// Every proposal submitted against the job, in submission order.
    fn proposals_for_job(&self, job_id: &JobId) -> Result<Vec<ProposalRecord>, DirectoryError>;

    /// Aggregate statistics for the given freelancers. Freelancers the
    /// directory has no history for may be omitted from the mapping; the
    /// pipeline treats them as having no prior.
    fn aggregates_for(
        &self,
        freelancers: &[FreelancerId],
    ) -> Result<HashMap<FreelancerId, FreelancerAggregates>, DirectoryError>;
}

/// Failure enumeration for directory lookups.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("proposal directory unavailable: {0}")]
    Unavailable(String),
}
