use std::sync::Arc;

use clap::Args;

use crate::infra::{seed_demo_marketplace, InMemoryMarketplace};
use gigscape_recommend::config::AppConfig;
use gigscape_recommend::error::AppError;
use gigscape_recommend::recommend::{RecommendationService, ScoredProposal};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Bound on the number of ranked proposals to print
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Emit the raw JSON payload instead of the table view
    #[arg(long)]
    pub(crate) json: bool,
}

/// Seed the in-memory marketplace, rank the demo job's proposals, and print
/// the result the way the HTTP payload would carry it.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let marketplace = Arc::new(InMemoryMarketplace::default());
    let job_id = seed_demo_marketplace(&marketplace);

    let service = RecommendationService::with_default_top_n(
        marketplace,
        config.recommend.weights,
        config.recommend.default_top_n,
    );

    let ranked = service.recommend_for_job(&job_id.0, args.top_n)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ranked).expect("ranked list serializes")
        );
        return Ok(());
    }

    render_ranking(&job_id.0, &ranked);
    Ok(())
}

fn render_ranking(job_id: &str, ranked: &[ScoredProposal]) {
    println!("Ranked proposals for job '{job_id}'");
    println!(
        "{:<5} {:<12} {:<12} {:>8}  {:>7} {:>7} {:>7} {:>7} {:>7}  {:>9}",
        "rank", "proposal", "freelancer", "score", "rating", "accept", "success", "skills", "price",
        "bid"
    );

    for (index, entry) in ranked.iter().enumerate() {
        let b = &entry.breakdown;
        println!(
            "{:<5} {:<12} {:<12} {:>8.6}  {:>7.4} {:>7.4} {:>7.4} {:>7.4} {:>7.4}  {:>9.2}",
            index + 1,
            entry.proposal_id.0,
            entry.freelancer_id.0,
            entry.score,
            b.rating_score,
            b.acceptance_rate,
            b.success_rate,
            b.skill_match,
            b.price_score,
            b.bid,
        );
    }

    if ranked.is_empty() {
        println!("(no proposals)");
    }
}
