use crate::cli::ServeArgs;
use crate::infra::{AppState, JsonFileConfigStore};
use crate::routes::with_advisor_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use template_advisor::advisor::{AdvisorRubric, AdvisorService};
use template_advisor::config::AppConfig;
use template_advisor::error::AppError;
use template_advisor::telemetry;
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

    let rubric = AdvisorRubric::standard()?;
    let store = Arc::new(JsonFileConfigStore::new(config.storage.output_path.clone()));
    let advisor_service = Arc::new(AdvisorService::new(rubric, store));

    let app = with_advisor_routes(advisor_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "template advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
