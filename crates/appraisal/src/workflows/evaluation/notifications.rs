use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{EmployeeId, EvaluationId};

/// Template selector understood by the notification gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SelfReviewSubmitted,
    ManagerReviewSubmitted,
    EvaluationCompleted,
}

impl NotificationKind {
    pub const fn template(self) -> &'static str {
        match self {
            NotificationKind::SelfReviewSubmitted => "self_review_submitted",
            NotificationKind::ManagerReviewSubmitted => "manager_review_submitted",
            NotificationKind::EvaluationCompleted => "evaluation_completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub recipient: EmployeeId,
    pub kind: NotificationKind,
    pub evaluation_id: EvaluationId,
    pub payload: BTreeMap<String, String>,
}

/// Outbound delivery hook (e-mail, chat, or a queue in front of either).
pub trait NotificationGateway: Send + Sync {
    fn notify(&self, request: NotificationRequest) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Non-fatal delivery failure reported next to a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchWarning {
    pub recipient: EmployeeId,
    pub kind: NotificationKind,
    pub message: String,
}

/// Requests collected while a transition is prepared. Nothing is sent until `flush`, which
/// the service calls only after the repository commit succeeded.
#[derive(Debug, Default)]
pub struct NotificationOutbox {
    pending: Vec<NotificationRequest>,
}

impl NotificationOutbox {
    pub fn stage(&mut self, request: NotificationRequest) {
        self.pending.push(request);
    }

    pub fn flush<N>(self, gateway: &N) -> Vec<DispatchWarning>
    where
        N: NotificationGateway + ?Sized,
    {
        let mut warnings = Vec::new();
        for request in self.pending {
            let recipient = request.recipient.clone();
            let kind = request.kind;
            let evaluation_id = request.evaluation_id.0.clone();
            match gateway.notify(request) {
                Ok(()) => {
                    debug!(
                        evaluation_id = %evaluation_id,
                        recipient = %recipient.0,
                        template = kind.template(),
                        "notification dispatched"
                    );
                }
                Err(err) => {
                    warn!(
                        evaluation_id = %evaluation_id,
                        recipient = %recipient.0,
                        template = kind.template(),
                        error = %err,
                        "notification delivery failed"
                    );
                    warnings.push(DispatchWarning {
                        recipient,
                        kind,
                        message: err.to_string(),
                    });
                }
            }
        }
        warnings
    }
}
