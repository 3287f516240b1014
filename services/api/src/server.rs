use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lifespan_estimator::config::AppConfig;
use lifespan_estimator::error::AppError;
use lifespan_estimator::telemetry;
use lifespan_estimator::workflows::lifespan::{LifespanEngine, LifespanState, ScoringConfig};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let policy = config.estimator.validation_policy()?;
    let lifespan = Arc::new(
        LifespanState::new(LifespanEngine::new(ScoringConfig::standard()), policy)
            .with_processing_delay(config.estimator.processing_delay()),
    );

    let app = with_service_routes(lifespan)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        country_code = %config.estimator.mobile_country_code,
        "lifespan estimator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
