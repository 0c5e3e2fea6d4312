use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{seed_demo_marketplace, AppState, InMemoryMarketplace};
use crate::routes::with_recommendation_routes;
use gigscape_recommend::config::AppConfig;
use gigscape_recommend::error::AppError;
use gigscape_recommend::recommend::RecommendationService;
use gigscape_recommend::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let marketplace = Arc::new(InMemoryMarketplace::default());
    if args.seed_demo {
        let job_id = seed_demo_marketplace(&marketplace);
        info!(%job_id, "seeded demo marketplace data");
    }

    let service = Arc::new(RecommendationService::with_default_top_n(
        marketplace,
        config.recommend.weights,
        config.recommend.default_top_n,
    ));

    let app = with_recommendation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "proposal recommendation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
