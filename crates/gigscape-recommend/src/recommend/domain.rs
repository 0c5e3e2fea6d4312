use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for jobs. Ids are opaque comparable tokens; the core
/// attaches no storage-engine meaning to them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Parse a raw path segment into a job id. Empty and whitespace-only
    /// tokens are rejected; anything else is accepted verbatim.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted proposals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProposalId(pub String);

/// Identifier wrapper for freelancer accounts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FreelancerId(pub String);

/// Identifier wrapper for marketplace skills.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkillId(pub String);

/// Snapshot of the job a recommendation request is scored against.
///
/// `reference_budget` carries the job's fixed budget when one is set,
/// otherwise its minimum budget. Immutable for the duration of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobContext {
    pub job_id: JobId,
    pub required_skills: BTreeSet<SkillId>,
    pub reference_budget: Option<f64>,
}

/// One bid on a job as supplied by the data layer. Read-only to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub proposal_id: ProposalId,
    pub freelancer_id: FreelancerId,
    pub bid_amount: f64,
}

/// Pre-computed per-freelancer statistics covering review ratings, proposal
/// acceptance history, contract completion history, and the declared skill
/// set. The core clamps the counters defensively rather than trusting the
/// `accepted <= total` / `completed <= total` invariants upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreelancerAggregates {
    pub average_rating: Option<f64>,
    pub total_proposals: u32,
    pub accepted_proposals: u32,
    pub total_contracts: u32,
    pub completed_contracts: u32,
    pub skills: BTreeSet<SkillId>,
}

impl FreelancerAggregates {
    /// Aggregates for a freelancer the data layer knows nothing about:
    /// every history-derived feature degrades to its documented default.
    pub fn empty() -> Self {
        Self {
            average_rating: None,
            total_proposals: 0,
            accepted_proposals: 0,
            total_contracts: 0,
            completed_contracts: 0,
            skills: BTreeSet::new(),
        }
    }
}

/// The five normalized signals computed per proposal, each in `[0.0, 1.0]`.
/// Computed fresh per request and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub rating_score: f64,
    pub acceptance_rate: f64,
    pub success_rate: f64,
    pub skill_match: f64,
    pub price_score: f64,
}

/// Per-feature values retained alongside the final score so callers can
/// audit how a proposal earned its rank. Feature values are rounded to four
/// decimal places; the bid is carried through raw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub rating_score: f64,
    pub acceptance_rate: f64,
    pub success_rate: f64,
    pub skill_match: f64,
    pub price_score: f64,
    pub bid: f64,
}

/// Output unit of the pipeline: one proposal with its combined score and
/// the breakdown it was derived from. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProposal {
    pub proposal_id: ProposalId,
    pub freelancer_id: FreelancerId,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}
