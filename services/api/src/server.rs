use crate::cli::ServeArgs;
use crate::infra::{AppState, SharedSession};
use crate::routes::lead_routes;
use axum_prometheus::PrometheusMetricLayer;
use lead_estimator::config::AppConfig;
use lead_estimator::error::AppError;
use lead_estimator::leads::{LeadSession, LookupTables};
use lead_estimator::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    let tables = LookupTables::load(config.estimator.tables_path.as_deref())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        tables: Arc::new(tables),
        session: SharedSession::new(LeadSession::new()),
    };

    let app = lead_routes(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead estimator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
