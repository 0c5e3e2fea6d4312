use super::common::*;
use crate::recommend::domain::FreelancerAggregates;
use crate::recommend::features::{compute_features, BidSpread, NO_RATING_PRIOR};

fn unit_range(value: f64) {
    assert!((0.0..=1.0).contains(&value), "out of range: {value}");
}

#[test]
fn missing_aggregates_zero_every_history_feature() {
    let job = job("job-1", &["rust", "sql"]);
    let bid = proposal("prop-1", "ghost", 80.0);
    let spread = BidSpread::from_proposals(&[bid.clone(), proposal("prop-2", "other", 120.0)]);

    let features = compute_features(&bid, &job, None, &spread);

    assert_eq!(features.rating_score, NO_RATING_PRIOR);
    assert_eq!(features.acceptance_rate, 0.0);
    assert_eq!(features.success_rate, 0.0);
    assert_eq!(features.skill_match, 0.0);
    assert_close(features.price_score, 1.0);
}

#[test]
fn rating_is_normalized_onto_the_unit_interval() {
    let job = job("job-1", &[]);
    let bid = proposal("prop-1", "ada", 100.0);
    let spread = BidSpread::from_proposals(std::slice::from_ref(&bid));

    let mut stats = veteran_aggregates(&[]);
    stats.average_rating = Some(3.5);
    let features = compute_features(&bid, &job, Some(&stats), &spread);
    assert_close(features.rating_score, 0.7);

    // Out-of-scale upstream rating must not escape the clamp.
    stats.average_rating = Some(7.5);
    let features = compute_features(&bid, &job, Some(&stats), &spread);
    assert_eq!(features.rating_score, 1.0);
}

#[test]
fn zero_denominators_degrade_to_zero_rates() {
    let job = job("job-1", &[]);
    let bid = proposal("prop-1", "ada", 100.0);
    let spread = BidSpread::from_proposals(std::slice::from_ref(&bid));

    let stats = FreelancerAggregates {
        average_rating: None,
        total_proposals: 0,
        accepted_proposals: 0,
        total_contracts: 0,
        completed_contracts: 0,
        skills: Default::default(),
    };
    let features = compute_features(&bid, &job, Some(&stats), &spread);

    assert_eq!(features.acceptance_rate, 0.0);
    assert_eq!(features.success_rate, 0.0);
}

#[test]
fn defective_counters_are_capped_at_the_denominator() {
    let job = job("job-1", &[]);
    let bid = proposal("prop-1", "ada", 100.0);
    let spread = BidSpread::from_proposals(std::slice::from_ref(&bid));

    let mut stats = veteran_aggregates(&[]);
    stats.total_proposals = 4;
    stats.accepted_proposals = 9;
    stats.total_contracts = 2;
    stats.completed_contracts = 5;

    let features = compute_features(&bid, &job, Some(&stats), &spread);
    assert_eq!(features.acceptance_rate, 1.0);
    assert_eq!(features.success_rate, 1.0);
}

#[test]
fn skill_match_is_the_covered_fraction_of_required_skills() {
    let job = job("job-1", &["rust", "sql", "docker", "k8s"]);
    let bid = proposal("prop-1", "ada", 100.0);
    let spread = BidSpread::from_proposals(std::slice::from_ref(&bid));

    let stats = veteran_aggregates(&["rust", "sql", "python"]);
    let features = compute_features(&bid, &job, Some(&stats), &spread);

    assert_close(features.skill_match, 0.5);
}

#[test]
fn job_without_required_skills_yields_zero_match_for_everyone() {
    let job = job("job-1", &[]);
    let bid = proposal("prop-1", "ada", 100.0);
    let spread = BidSpread::from_proposals(std::slice::from_ref(&bid));

    let stats = veteran_aggregates(&["rust", "sql"]);
    let features = compute_features(&bid, &job, Some(&stats), &spread);

    assert_eq!(features.skill_match, 0.0);
}

#[test]
fn price_score_prefers_lower_bids() {
    let proposals = vec![
        proposal("prop-1", "a", 50.0),
        proposal("prop-2", "b", 75.0),
        proposal("prop-3", "c", 100.0),
    ];
    let spread = BidSpread::from_proposals(&proposals);

    assert_close(spread.price_score(50.0), 1.0);
    assert_close(spread.price_score(75.0), 0.5);
    assert_close(spread.price_score(100.0), 0.0);
}

#[test]
fn identical_bids_all_score_full_price_marks() {
    let proposals = vec![
        proposal("prop-1", "a", 200.0),
        proposal("prop-2", "b", 200.0),
        proposal("prop-3", "c", 200.0),
    ];
    let spread = BidSpread::from_proposals(&proposals);

    for bid in &proposals {
        assert_close(spread.price_score(bid.bid_amount), 1.0);
    }
}

#[test]
fn every_feature_stays_inside_the_unit_interval() {
    let job = job("job-1", &["rust"]);
    let proposals = vec![
        proposal("prop-1", "ada", 10.0),
        proposal("prop-2", "newcomer", 9000.0),
    ];
    let spread = BidSpread::from_proposals(&proposals);

    let mut stats = veteran_aggregates(&["rust"]);
    stats.average_rating = Some(12.0);
    stats.accepted_proposals = 99;

    for bid in &proposals {
        let features = compute_features(bid, &job, Some(&stats), &spread);
        unit_range(features.rating_score);
        unit_range(features.acceptance_rate);
        unit_range(features.success_rate);
        unit_range(features.skill_match);
        unit_range(features.price_score);
    }
}
