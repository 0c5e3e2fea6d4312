use super::domain::{FeatureVector, FreelancerAggregates, JobContext, ProposalRecord};

/// Rating assigned when a freelancer has no reviews at all. Zero penalizes
/// unreviewed freelancers rather than handing them a neutral midpoint; this
/// is a deliberate policy constant, not an accident of missing data.
pub const NO_RATING_PRIOR: f64 = 0.0;

/// Review ratings live on a 0..5 scale.
const MAX_RATING: f64 = 5.0;

/// Min/max bid range across every proposal on one job, computed once per
/// batch so price normalization is shared by all of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BidSpread {
    min_bid: f64,
    max_bid: f64,
}

impl BidSpread {
    /// Derive the spread from the batch of proposals under consideration.
    /// When every bid is identical the span is widened by one so the later
    /// division is defined; the zero numerator then collapses every
    /// proposal's price score to 1.0.
    pub fn from_proposals(proposals: &[ProposalRecord]) -> Self {
        let mut min_bid = f64::INFINITY;
        let mut max_bid = f64::NEG_INFINITY;
        for proposal in proposals {
            min_bid = min_bid.min(proposal.bid_amount);
            max_bid = max_bid.max(proposal.bid_amount);
        }

        if proposals.is_empty() {
            return Self {
                min_bid: 0.0,
                max_bid: 1.0,
            };
        }

        if max_bid - min_bid == 0.0 {
            max_bid = min_bid + 1.0;
        }

        Self { min_bid, max_bid }
    }

    /// Linear inverse normalization over the batch range: the lowest bid
    /// scores 1.0, the highest 0.0.
    pub fn price_score(&self, bid: f64) -> f64 {
        clamp_unit(1.0 - (bid - self.min_bid) / (self.max_bid - self.min_bid))
    }
}

/// Derive the five normalized feature scores for one proposal.
///
/// Every missing-data case degrades to a documented default instead of
/// failing: an absent aggregate record zeroes the history features, a job
/// with no declared skills yields zero skill match for every bidder, and
/// the degenerate all-equal-bid batch is handled inside [`BidSpread`].
pub fn compute_features(
    proposal: &ProposalRecord,
    job: &JobContext,
    aggregates: Option<&FreelancerAggregates>,
    spread: &BidSpread,
) -> FeatureVector {
    let rating_score = aggregates
        .and_then(|stats| stats.average_rating)
        .map(|rating| clamp_unit(rating / MAX_RATING))
        .unwrap_or(NO_RATING_PRIOR);

    let acceptance_rate = aggregates
        .map(|stats| ratio(stats.accepted_proposals, stats.total_proposals))
        .unwrap_or(0.0);

    let success_rate = aggregates
        .map(|stats| ratio(stats.completed_contracts, stats.total_contracts))
        .unwrap_or(0.0);

    let skill_match = if job.required_skills.is_empty() {
        // A job that declares no skills gives every proposal zero skill
        // match; explicit policy rather than an omission.
        0.0
    } else {
        let covered = job
            .required_skills
            .iter()
            .filter(|skill| {
                aggregates
                    .map(|stats| stats.skills.contains(*skill))
                    .unwrap_or(false)
            })
            .count();
        clamp_unit(covered as f64 / job.required_skills.len() as f64)
    };

    let price_score = spread.price_score(proposal.bid_amount);

    FeatureVector {
        rating_score: clamp_unit(rating_score),
        acceptance_rate: clamp_unit(acceptance_rate),
        success_rate: clamp_unit(success_rate),
        skill_match,
        price_score,
    }
}

/// Share of `part` in `whole` with a zero-or-missing denominator defaulting
/// to 0.0. The numerator is capped at the denominator so defective upstream
/// counters (accepted > total) cannot push a rate past 1.0.
fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part.min(whole)) / f64::from(whole)
    }
}

/// Defensive clamp into the feature range. The formulas already respect
/// `[0, 1]`; this is an invariant guard, not a correctness dependency.
fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
