use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::recommend::directory::{DirectoryError, ProposalDirectory};
use crate::recommend::domain::{
    FreelancerAggregates, FreelancerId, JobContext, JobId, ProposalId, ProposalRecord, SkillId,
};
use crate::recommend::service::RecommendationService;
use crate::recommend::weights::WeightConfig;

pub(super) fn skill(id: &str) -> SkillId {
    SkillId(id.to_string())
}

pub(super) fn skills(ids: &[&str]) -> BTreeSet<SkillId> {
    ids.iter().map(|id| skill(id)).collect()
}

pub(super) fn job(id: &str, required: &[&str]) -> JobContext {
    JobContext {
        job_id: JobId(id.to_string()),
        required_skills: skills(required),
        reference_budget: Some(500.0),
    }
}

pub(super) fn proposal(id: &str, freelancer: &str, bid: f64) -> ProposalRecord {
    ProposalRecord {
        proposal_id: ProposalId(id.to_string()),
        freelancer_id: FreelancerId(freelancer.to_string()),
        bid_amount: bid,
    }
}

/// A freelancer with a flawless track record over the given skills.
pub(super) fn veteran_aggregates(skill_ids: &[&str]) -> FreelancerAggregates {
    FreelancerAggregates {
        average_rating: Some(5.0),
        total_proposals: 10,
        accepted_proposals: 10,
        total_contracts: 5,
        completed_contracts: 5,
        skills: skills(skill_ids),
    }
}

pub(super) fn aggregates_by(
    entries: Vec<(&str, FreelancerAggregates)>,
) -> HashMap<FreelancerId, FreelancerAggregates> {
    entries
        .into_iter()
        .map(|(id, stats)| (FreelancerId(id.to_string()), stats))
        .collect()
}

/// In-memory directory fixture holding one job and its proposals.
pub(super) struct MemoryDirectory {
    pub(super) job: JobContext,
    pub(super) proposals: Vec<ProposalRecord>,
    pub(super) aggregates: HashMap<FreelancerId, FreelancerAggregates>,
}

impl ProposalDirectory for MemoryDirectory {
    fn job_context(&self, job_id: &JobId) -> Result<Option<JobContext>, DirectoryError> {
        if *job_id == self.job.job_id {
            Ok(Some(self.job.clone()))
        } else {
            Ok(None)
        }
    }

    fn proposals_for_job(&self, job_id: &JobId) -> Result<Vec<ProposalRecord>, DirectoryError> {
        if *job_id == self.job.job_id {
            Ok(self.proposals.clone())
        } else {
            Ok(Vec::new())
        }
    }

    fn aggregates_for(
        &self,
        freelancers: &[FreelancerId],
    ) -> Result<HashMap<FreelancerId, FreelancerAggregates>, DirectoryError> {
        Ok(self
            .aggregates
            .iter()
            .filter(|(id, _)| freelancers.contains(id))
            .map(|(id, stats)| (id.clone(), stats.clone()))
            .collect())
    }
}

/// Directory that always fails, for exercising the 500 path.
pub(super) struct UnavailableDirectory;

impl ProposalDirectory for UnavailableDirectory {
    fn job_context(&self, _job_id: &JobId) -> Result<Option<JobContext>, DirectoryError> {
        Err(DirectoryError::Unavailable("store offline".to_string()))
    }

    fn proposals_for_job(&self, _job_id: &JobId) -> Result<Vec<ProposalRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("store offline".to_string()))
    }

    fn aggregates_for(
        &self,
        _freelancers: &[FreelancerId],
    ) -> Result<HashMap<FreelancerId, FreelancerAggregates>, DirectoryError> {
        Err(DirectoryError::Unavailable("store offline".to_string()))
    }
}

/// The reference scenario: two bidders on a two-skill job, one veteran with a
/// perfect history bidding 100, one newcomer with no history bidding 50.
pub(super) fn scenario_directory() -> MemoryDirectory {
    MemoryDirectory {
        job: job("job-1", &["rust", "sql"]),
        proposals: vec![
            proposal("prop-1", "ada", 100.0),
            proposal("prop-2", "newcomer", 50.0),
        ],
        aggregates: aggregates_by(vec![
            ("ada", veteran_aggregates(&["rust", "sql"])),
            ("newcomer", FreelancerAggregates::empty()),
        ]),
    }
}

pub(super) fn scenario_service() -> Arc<RecommendationService<MemoryDirectory>> {
    Arc::new(RecommendationService::new(
        Arc::new(scenario_directory()),
        WeightConfig::default(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
