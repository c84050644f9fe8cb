use crate::cli::ServeArgs;
use crate::infra::{
    directory_from_entries, sample_directory, AppState, LoggingNotificationGateway,
};
use crate::routes::with_evaluation_routes;
use appraisal::config::AppConfig;
use appraisal::error::AppError;
use appraisal::telemetry;
use appraisal::workflows::evaluation::{
    EvaluationWorkflowService, InMemoryEvaluationRepository, WorkflowError,
};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let directory = if args.employees.is_empty() {
        sample_directory()
    } else {
        directory_from_entries(&args.employees).map_err(WorkflowError::from)?
    };
    let employees = args.employees.len();
    let service = Arc::new(EvaluationWorkflowService::new(
        Arc::new(InMemoryEvaluationRepository::default()),
        Arc::new(directory),
        Arc::new(LoggingNotificationGateway),
        config.scoring.clone(),
    ));

    let app = with_evaluation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        employees,
        items_per_dimension = ?config.scoring.dimensions.first().map(|spec| spec.expected_items),
        "appraisal workflow service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
