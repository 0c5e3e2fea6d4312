use std::collections::HashMap;

use super::domain::{FreelancerAggregates, FreelancerId, JobContext, ProposalRecord, ScoredProposal};
use super::features::{compute_features, BidSpread};
use super::ranking::rank;
use super::scoring::combine;
use super::weights::WeightConfig;

/// Stateless engine turning a job's proposals plus supporting aggregates into
/// a ranked, bounded recommendation list. Holds only the immutable weight
/// configuration, so one pipeline can serve concurrent requests without
/// coordination.
pub struct RecommendationPipeline {
    weights: WeightConfig,
}

impl RecommendationPipeline {
    pub fn new(weights: WeightConfig) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    /// Score every proposal on the job and return the top `top_n`, descending
    /// by score. Total for valid inputs: missing aggregates degrade to the
    /// per-feature defaults and an empty proposal list yields an empty
    /// result.
    pub fn recommend(
        &self,
        job: &JobContext,
        proposals: &[ProposalRecord],
        aggregates: &HashMap<FreelancerId, FreelancerAggregates>,
        top_n: usize,
    ) -> Vec<ScoredProposal> {
        if proposals.is_empty() {
            return Vec::new();
        }

        let spread = BidSpread::from_proposals(proposals);
        let scored = proposals
            .iter()
            .map(|proposal| {
                let features = compute_features(
                    proposal,
                    job,
                    aggregates.get(&proposal.freelancer_id),
                    &spread,
                );
                combine(proposal, &features, &self.weights)
            })
            .collect();

        rank(scored, top_n)
    }
}
