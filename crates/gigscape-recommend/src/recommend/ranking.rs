use super::domain::ScoredProposal;

/// Order scored proposals best-to-worst and cut the list to `top_n`.
///
/// The sort is stable and descending by score, so equal-score proposals keep
/// their input order; with a deterministic input order the full ranking is
/// deterministic. Zero proposals or `top_n == 0` yield an empty list rather
/// than an error, and fewer than `top_n` proposals are all returned.
pub fn rank(mut scored: Vec<ScoredProposal>, top_n: usize) -> Vec<ScoredProposal> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);
    scored
}
