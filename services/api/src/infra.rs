use appraisal::workflows::evaluation::{
    DirectoryError, InMemoryDirectory, NotificationError, NotificationGateway,
    NotificationRequest,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Delivers notifications to the log. Stands in for the mail relay when the service runs
/// without one.
#[derive(Default, Clone, Copy)]
pub(crate) struct LoggingNotificationGateway;

impl NotificationGateway for LoggingNotificationGateway {
    fn notify(&self, request: NotificationRequest) -> Result<(), NotificationError> {
        info!(
            recipient = %request.recipient.0,
            evaluation_id = %request.evaluation_id.0,
            template = request.kind.template(),
            "notification queued"
        );
        Ok(())
    }
}

/// Reporting line used by `demo` and by `serve` when no `--employee` entries are given.
pub(crate) fn sample_directory() -> InMemoryDirectory {
    InMemoryDirectory::default()
        .with_employee("ana.souza", Some("bruno.lima"))
        .with_employee("bruno.lima", Some("carla.mendes"))
        .with_employee("carla.mendes", None)
        .with_employee("diego.rocha", Some("bruno.lima"))
}

pub(crate) fn directory_from_entries(
    entries: &[ReportingLine],
) -> Result<InMemoryDirectory, DirectoryError> {
    let directory = InMemoryDirectory::default();
    for line in entries {
        directory.register(&line.employee, line.manager.as_deref())?;
    }
    Ok(directory)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportingLine {
    pub(crate) employee: String,
    pub(crate) manager: Option<String>,
}

/// Parses `employee=manager` or a bare `employee` for someone at the top of the chain.
pub(crate) fn parse_reporting_line(raw: &str) -> Result<ReportingLine, String> {
    let (employee, manager) = match raw.split_once('=') {
        Some((employee, manager)) => (employee.trim(), Some(manager.trim())),
        None => (raw.trim(), None),
    };
    if employee.is_empty() {
        return Err(format!("'{raw}' is missing the employee id"));
    }
    if manager == Some("") {
        return Err(format!("'{raw}' has an empty manager id"));
    }
    if manager == Some(employee) {
        return Err(format!("'{employee}' cannot manage themself"));
    }

    Ok(ReportingLine {
        employee: employee.to_string(),
        manager: manager.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use appraisal::workflows::evaluation::{
        EmployeeId, EvaluationId, NotificationKind, OrgDirectory,
    };

    #[test]
    fn parses_reporting_lines() {
        assert_eq!(
            parse_reporting_line("ana = bruno").expect("valid"),
            ReportingLine {
                employee: "ana".to_string(),
                manager: Some("bruno".to_string()),
            }
        );
        assert_eq!(parse_reporting_line("carla").expect("valid").manager, None);
        assert!(parse_reporting_line("=bruno").is_err());
        assert!(parse_reporting_line("ana=").is_err());
        assert!(parse_reporting_line("ana=ana").is_err());
    }

    #[test]
    fn directory_from_entries_registers_every_line() {
        let lines = vec![
            parse_reporting_line("ana=bruno").expect("valid"),
            parse_reporting_line("bruno").expect("valid"),
        ];
        let directory = directory_from_entries(&lines).expect("directory builds");
        let ana = EmployeeId("ana".to_string());
        assert_eq!(
            directory.manager_of(&ana).expect("lookup"),
            Some(EmployeeId("bruno".to_string()))
        );
        assert!(directory
            .contains(&EmployeeId("bruno".to_string()))
            .expect("lookup"));
    }

    #[test]
    fn logging_gateway_accepts_every_request() {
        let gateway = LoggingNotificationGateway;
        for index in 0..100 {
            let request = NotificationRequest {
                recipient: EmployeeId(format!("emp-{index}")),
                evaluation_id: EvaluationId(format!("eval-{index:06}")),
                kind: NotificationKind::SelfReviewSubmitted,
                payload: Default::default(),
            };
            assert!(gateway.notify(request).is_ok());
        }
        assert_eq!(std::mem::size_of::<LoggingNotificationGateway>(), 0);
    }
}
