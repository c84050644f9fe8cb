use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::evaluation::domain::{
    Actor, CycleId, EmployeeId, EvaluationId, EvaluationRecord, EvaluationStage, ItemResponse,
};
use crate::workflows::evaluation::notifications::{
    NotificationError, NotificationGateway, NotificationKind, NotificationRequest,
};
use crate::workflows::evaluation::repository::{
    EvaluationRepository, RepositoryError, StageCommit,
};
use crate::workflows::evaluation::scoring::ScoringConfig;
use crate::workflows::evaluation::{
    evaluation_router, ConsensusDecision, EvaluationWorkflowService, InMemoryDirectory,
    InMemoryEvaluationRepository,
};

pub(super) type MemoryService =
    EvaluationWorkflowService<InMemoryEvaluationRepository, InMemoryDirectory, RecordingNotifier>;

/// emp-1 reports to mgr-1, who reports to dir-1. emp-2 reports to lead-1, who has no manager.
pub(super) fn directory() -> InMemoryDirectory {
    InMemoryDirectory::default()
        .with_employee("emp-1", Some("mgr-1"))
        .with_employee("mgr-1", Some("dir-1"))
        .with_employee("dir-1", None)
        .with_employee("emp-2", Some("lead-1"))
        .with_employee("lead-1", None)
        .with_employee("emp-3", Some("mgr-1"))
}

/// Two items per dimension keeps fixtures short while exercising the real denominators.
pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::uniform(2)
}

pub(super) fn build_service() -> (
    MemoryService,
    Arc<InMemoryEvaluationRepository>,
    Arc<RecordingNotifier>,
) {
    build_service_with(scoring_config())
}

pub(super) fn build_service_with(
    config: ScoringConfig,
) -> (
    MemoryService,
    Arc<InMemoryEvaluationRepository>,
    Arc<RecordingNotifier>,
) {
    let repository = Arc::new(InMemoryEvaluationRepository::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = EvaluationWorkflowService::new(
        repository.clone(),
        Arc::new(directory()),
        notifier.clone(),
        config,
    );
    (service, repository, notifier)
}

/// Every configured item answered with the same value.
pub(super) fn uniform_responses(config: &ScoringConfig, answer: u8) -> Vec<ItemResponse> {
    config
        .dimensions
        .iter()
        .flat_map(|spec| {
            (1..=spec.expected_items).map(move |index| ItemResponse {
                item_id: format!("{}-{index}", spec.dimension.key()),
                dimension: spec.dimension,
                answer,
                reverse: false,
            })
        })
        .collect()
}

pub(super) fn open(service: &MemoryService, employee: &str, cycle: &str) -> EvaluationId {
    service
        .create_evaluation(
            EmployeeId(employee.to_string()),
            CycleId(cycle.to_string()),
        )
        .expect("evaluation opens")
        .id
}

/// Drives emp-1's evaluation to `pending_consensus` with the given answers.
pub(super) fn ready_for_consensus(
    service: &MemoryService,
    cycle: &str,
    self_answer: u8,
    manager_answer: u8,
) -> EvaluationId {
    let config = service.scoring_config().clone();
    let id = open(service, "emp-1", cycle);
    service
        .submit_self(
            &id,
            &Actor::member("emp-1"),
            uniform_responses(&config, self_answer),
        )
        .expect("self review accepted");
    service
        .submit_manager(
            &id,
            &Actor::member("mgr-1"),
            uniform_responses(&config, manager_answer),
        )
        .expect("manager review accepted");
    id
}

pub(super) fn approve(service: &MemoryService, id: &EvaluationId) {
    service
        .submit_consensus(id, &Actor::member("dir-1"), ConsensusDecision::default())
        .expect("consensus accepted");
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    requests: Mutex<Vec<NotificationRequest>>,
}

impl RecordingNotifier {
    pub(super) fn requests(&self) -> Vec<NotificationRequest> {
        self.requests.lock().expect("notifier mutex poisoned").clone()
    }

    pub(super) fn kinds(&self) -> Vec<NotificationKind> {
        self.requests().iter().map(|request| request.kind).collect()
    }
}

impl NotificationGateway for RecordingNotifier {
    fn notify(&self, request: NotificationRequest) -> Result<(), NotificationError> {
        self.requests
            .lock()
            .expect("notifier mutex poisoned")
            .push(request);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl NotificationGateway for FailingNotifier {
    fn notify(&self, _request: NotificationRequest) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("mail relay offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn advance(
        &self,
        _id: &EvaluationId,
        _expected: EvaluationStage,
        _commit: StageCommit,
    ) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_stage(
        &self,
        _stage: EvaluationStage,
        _limit: usize,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    evaluation_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
