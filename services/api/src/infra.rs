use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use gigscape_recommend::recommend::{
    DirectoryError, FreelancerAggregates, FreelancerId, JobContext, JobId, ProposalDirectory,
    ProposalId, ProposalRecord, SkillId,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Raw marketplace records the directory derives aggregates from. Mirrors the
/// persistent collections (jobs, proposals, reviews, contracts, freelancer
/// profiles) the production store would hold.
#[derive(Debug, Clone)]
pub(crate) struct StoredJob {
    pub(crate) job_id: JobId,
    pub(crate) required_skills: BTreeSet<SkillId>,
    pub(crate) fixed_budget: Option<f64>,
    pub(crate) budget_min: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredProposal {
    pub(crate) proposal_id: ProposalId,
    pub(crate) job_id: JobId,
    pub(crate) freelancer_id: FreelancerId,
    pub(crate) bid_amount: f64,
    pub(crate) status: ProposalStatus,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredReview {
    pub(crate) reviewee: FreelancerId,
    pub(crate) rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContractStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredContract {
    pub(crate) freelancer_id: FreelancerId,
    pub(crate) status: ContractStatus,
}

#[derive(Debug, Clone)]
pub(crate) struct FreelancerProfile {
    pub(crate) freelancer_id: FreelancerId,
    pub(crate) skills: BTreeSet<SkillId>,
}

#[derive(Default)]
struct MarketplaceData {
    jobs: HashMap<JobId, StoredJob>,
    proposals: Vec<StoredProposal>,
    reviews: Vec<StoredReview>,
    contracts: Vec<StoredContract>,
    profiles: HashMap<FreelancerId, FreelancerProfile>,
}

/// In-memory stand-in for the marketplace data store. Aggregation follows
/// what the persistent store would group server-side: proposal counts and
/// acceptances per freelancer across all jobs, review averages, and contract
/// completion counts.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMarketplace {
    data: Arc<Mutex<MarketplaceData>>,
}

impl InMemoryMarketplace {
    pub(crate) fn insert_job(&self, job: StoredJob) {
        let mut guard = self.data.lock().expect("marketplace mutex poisoned");
        guard.jobs.insert(job.job_id.clone(), job);
    }

    pub(crate) fn insert_proposal(&self, proposal: StoredProposal) {
        let mut guard = self.data.lock().expect("marketplace mutex poisoned");
        guard.proposals.push(proposal);
    }

    pub(crate) fn insert_review(&self, review: StoredReview) {
        let mut guard = self.data.lock().expect("marketplace mutex poisoned");
        guard.reviews.push(review);
    }

    pub(crate) fn insert_contract(&self, contract: StoredContract) {
        let mut guard = self.data.lock().expect("marketplace mutex poisoned");
        guard.contracts.push(contract);
    }

    pub(crate) fn insert_profile(&self, profile: FreelancerProfile) {
        let mut guard = self.data.lock().expect("marketplace mutex poisoned");
        guard.profiles.insert(profile.freelancer_id.clone(), profile);
    }
}

impl ProposalDirectory for InMemoryMarketplace {
    fn job_context(&self, job_id: &JobId) -> Result<Option<JobContext>, DirectoryError> {
        let guard = self.data.lock().expect("marketplace mutex poisoned");
        Ok(guard.jobs.get(job_id).map(|job| JobContext {
            job_id: job.job_id.clone(),
            required_skills: job.required_skills.clone(),
            reference_budget: job.fixed_budget.or(job.budget_min),
        }))
    }

    fn proposals_for_job(&self, job_id: &JobId) -> Result<Vec<ProposalRecord>, DirectoryError> {
        let guard = self.data.lock().expect("marketplace mutex poisoned");
        Ok(guard
            .proposals
            .iter()
            .filter(|proposal| proposal.job_id == *job_id)
            .map(|proposal| ProposalRecord {
                proposal_id: proposal.proposal_id.clone(),
                freelancer_id: proposal.freelancer_id.clone(),
                bid_amount: proposal.bid_amount,
            })
            .collect())
    }

    fn aggregates_for(
        &self,
        freelancers: &[FreelancerId],
    ) -> Result<HashMap<FreelancerId, FreelancerAggregates>, DirectoryError> {
        let guard = self.data.lock().expect("marketplace mutex poisoned");
        let mut aggregates = HashMap::new();

        for freelancer_id in freelancers {
            let mut total_proposals = 0u32;
            let mut accepted_proposals = 0u32;
            for proposal in &guard.proposals {
                if proposal.freelancer_id == *freelancer_id {
                    total_proposals += 1;
                    if proposal.status == ProposalStatus::Accepted {
                        accepted_proposals += 1;
                    }
                }
            }

            let ratings: Vec<f64> = guard
                .reviews
                .iter()
                .filter(|review| review.reviewee == *freelancer_id)
                .map(|review| review.rating)
                .collect();
            let average_rating = if ratings.is_empty() {
                None
            } else {
                Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
            };

            let mut total_contracts = 0u32;
            let mut completed_contracts = 0u32;
            for contract in &guard.contracts {
                if contract.freelancer_id == *freelancer_id {
                    total_contracts += 1;
                    if contract.status == ContractStatus::Completed {
                        completed_contracts += 1;
                    }
                }
            }

            let skills = guard
                .profiles
                .get(freelancer_id)
                .map(|profile| profile.skills.clone())
                .unwrap_or_default();

            aggregates.insert(
                freelancer_id.clone(),
                FreelancerAggregates {
                    average_rating,
                    total_proposals,
                    accepted_proposals,
                    total_contracts,
                    completed_contracts,
                    skills,
                },
            );
        }

        Ok(aggregates)
    }
}

pub(crate) fn skill_set(ids: &[&str]) -> BTreeSet<SkillId> {
    ids.iter().map(|id| SkillId((*id).to_string())).collect()
}

/// Seed the marketplace with a small, deterministic data set used by the
/// demo subcommand and the `--seed-demo` serve flag.
pub(crate) fn seed_demo_marketplace(marketplace: &InMemoryMarketplace) -> JobId {
    let job_id = JobId("job-dashboard".to_string());
    marketplace.insert_job(StoredJob {
        job_id: job_id.clone(),
        required_skills: skill_set(&["rust", "postgres", "react"]),
        fixed_budget: None,
        budget_min: Some(1200.0),
    });

    let vera = FreelancerId("vera".to_string());
    let milo = FreelancerId("milo".to_string());
    let nilo = FreelancerId("nilo".to_string());

    marketplace.insert_profile(FreelancerProfile {
        freelancer_id: vera.clone(),
        skills: skill_set(&["rust", "postgres", "react", "redis"]),
    });
    marketplace.insert_profile(FreelancerProfile {
        freelancer_id: milo.clone(),
        skills: skill_set(&["rust", "react"]),
    });
    marketplace.insert_profile(FreelancerProfile {
        freelancer_id: nilo.clone(),
        skills: BTreeSet::new(),
    });

    for (proposal_id, freelancer, bid) in [
        ("prop-vera", &vera, 1450.0),
        ("prop-milo", &milo, 1200.0),
        ("prop-nilo", &nilo, 800.0),
    ] {
        marketplace.insert_proposal(StoredProposal {
            proposal_id: ProposalId(proposal_id.to_string()),
            job_id: job_id.clone(),
            freelancer_id: freelancer.clone(),
            bid_amount: bid,
            status: ProposalStatus::Pending,
        });
    }

    // Historical activity on other jobs feeds the acceptance aggregates.
    for (proposal_id, freelancer, status) in [
        ("hist-1", &vera, ProposalStatus::Accepted),
        ("hist-2", &vera, ProposalStatus::Accepted),
        ("hist-3", &vera, ProposalStatus::Rejected),
        ("hist-4", &milo, ProposalStatus::Accepted),
        ("hist-5", &milo, ProposalStatus::Rejected),
        ("hist-6", &milo, ProposalStatus::Withdrawn),
    ] {
        marketplace.insert_proposal(StoredProposal {
            proposal_id: ProposalId(proposal_id.to_string()),
            job_id: JobId("job-archive".to_string()),
            freelancer_id: freelancer.clone(),
            bid_amount: 1000.0,
            status,
        });
    }

    for (reviewee, rating) in [(&vera, 5.0), (&vera, 4.6), (&milo, 4.0), (&milo, 3.6)] {
        marketplace.insert_review(StoredReview {
            reviewee: reviewee.clone(),
            rating,
        });
    }

    for (freelancer, status) in [
        (&vera, ContractStatus::Completed),
        (&vera, ContractStatus::Completed),
        (&vera, ContractStatus::Active),
        (&milo, ContractStatus::Completed),
        (&milo, ContractStatus::Cancelled),
    ] {
        marketplace.insert_contract(StoredContract {
            freelancer_id: freelancer.clone(),
            status,
        });
    }

    job_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_are_derived_from_raw_marketplace_records() {
        let marketplace = InMemoryMarketplace::default();
        seed_demo_marketplace(&marketplace);

        let vera = FreelancerId("vera".to_string());
        let nilo = FreelancerId("nilo".to_string());
        let aggregates = marketplace
            .aggregates_for(&[vera.clone(), nilo.clone()])
            .expect("aggregation succeeds");

        let vera_stats = &aggregates[&vera];
        // One live proposal plus three historical ones, two accepted.
        assert_eq!(vera_stats.total_proposals, 4);
        assert_eq!(vera_stats.accepted_proposals, 2);
        assert_eq!(vera_stats.total_contracts, 3);
        assert_eq!(vera_stats.completed_contracts, 2);
        let average = vera_stats.average_rating.expect("vera has reviews");
        assert!((average - 4.8).abs() < 1e-9);

        let nilo_stats = &aggregates[&nilo];
        assert_eq!(nilo_stats.total_proposals, 1);
        assert_eq!(nilo_stats.average_rating, None);
        assert!(nilo_stats.skills.is_empty());
    }

    #[test]
    fn job_context_prefers_the_fixed_budget_over_the_minimum() {
        let marketplace = InMemoryMarketplace::default();
        marketplace.insert_job(StoredJob {
            job_id: JobId("job-fixed".to_string()),
            required_skills: skill_set(&["rust"]),
            fixed_budget: Some(900.0),
            budget_min: Some(400.0),
        });

        let context = marketplace
            .job_context(&JobId("job-fixed".to_string()))
            .expect("lookup succeeds")
            .expect("job exists");
        assert_eq!(context.reference_budget, Some(900.0));
    }

    #[test]
    fn unknown_jobs_resolve_to_none() {
        let marketplace = InMemoryMarketplace::default();
        let context = marketplace
            .job_context(&JobId("job-phantom".to_string()))
            .expect("lookup succeeds");
        assert!(context.is_none());
    }
}
