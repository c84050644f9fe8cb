use crate::infra::{sample_directory, LoggingNotificationGateway};
use appraisal::error::AppError;
use appraisal::workflows::evaluation::{
    Actor, ConsensusDecision, CycleId, EmployeeId, EvaluationWorkflowService,
    InMemoryEvaluationRepository, ItemResponse, NotificationError, NotificationGateway,
    NotificationRequest, ScoreResult, ScoringConfig,
};
use chrono::{Datelike, Local};
use clap::Args;
use serde::Serialize;
use std::sync::{Arc, Mutex};

const SUBJECT: &str = "ana.souza";
const MANAGER: &str = "bruno.lima";
const APPROVER: &str = "carla.mendes";

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Answer used for every self-review item (1-5)
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) answer: u8,
    /// Answer used for every manager-review item (1-5). Defaults to the self answer.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) manager_answer: Option<u8>,
    /// Final score recorded by the approver instead of the computed one (0-100)
    #[arg(long = "override", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) final_score_override: Option<u8>,
    /// Items per dimension in the generated questionnaire
    #[arg(long, default_value_t = ScoringConfig::DEFAULT_ITEMS_PER_DIMENSION)]
    pub(crate) items: u32,
    /// Pretty-print the JSON summary
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Debug, Serialize)]
struct DemoSummary {
    evaluation_id: String,
    cycle_id: String,
    stages: Vec<&'static str>,
    final_score: Option<u8>,
    notifications: Vec<String>,
    score: ScoreResult,
}

/// Logs like the `serve` gateway and keeps what it sent for the summary. The demo drives a
/// single evaluation, so the list stays at one entry per stage.
#[derive(Default)]
struct RecordingGateway {
    inner: LoggingNotificationGateway,
    sent: Mutex<Vec<NotificationRequest>>,
}

impl RecordingGateway {
    fn sent(&self) -> Vec<NotificationRequest> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl NotificationGateway for RecordingGateway {
    fn notify(&self, request: NotificationRequest) -> Result<(), NotificationError> {
        self.inner.notify(request.clone())?;
        self.sent
            .lock()
            .map_err(|_| NotificationError::Transport("demo outbox lock poisoned".to_string()))?
            .push(request);
        Ok(())
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let summary = drive_evaluation(&args)?;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{rendered}");
    Ok(())
}

fn drive_evaluation(args: &DemoArgs) -> Result<DemoSummary, AppError> {
    let config = ScoringConfig::uniform(args.items);
    config
        .validate()
        .map_err(appraisal::config::ConfigError::Scoring)?;

    let notifier = Arc::new(RecordingGateway::default());
    let service = EvaluationWorkflowService::new(
        Arc::new(InMemoryEvaluationRepository::default()),
        Arc::new(sample_directory()),
        notifier.clone(),
        config.clone(),
    );

    let cycle = CycleId(format!("{}-annual", Local::now().year()));
    let record = service.create_evaluation(EmployeeId(SUBJECT.to_string()), cycle)?;
    let mut stages = vec![record.stage.label()];

    let outcome = service.submit_self(
        &record.id,
        &Actor::member(SUBJECT),
        questionnaire(&config, args.answer),
    )?;
    stages.push(outcome.stage.label());

    let manager_answer = args.manager_answer.unwrap_or(args.answer);
    let outcome = service.submit_manager(
        &record.id,
        &Actor::member(MANAGER),
        questionnaire(&config, manager_answer),
    )?;
    stages.push(outcome.stage.label());

    let outcome = service.submit_consensus(
        &record.id,
        &Actor::member(APPROVER),
        ConsensusDecision {
            final_score_override: args.final_score_override,
            notes: Some("Scripted demo consensus".to_string()),
        },
    )?;
    stages.push(outcome.stage.label());

    let score = service.get_score(&record.id)?;
    let notifications = notifier
        .sent()
        .iter()
        .map(|request| format!("{} -> {}", request.kind.template(), request.recipient.0))
        .collect();

    Ok(DemoSummary {
        evaluation_id: record.id.0,
        cycle_id: record.cycle_id.0,
        stages,
        final_score: outcome.final_score,
        notifications,
        score,
    })
}

fn questionnaire(config: &ScoringConfig, answer: u8) -> Vec<ItemResponse> {
    config
        .dimensions
        .iter()
        .flat_map(|spec| {
            (1..=spec.expected_items).map(move |index| ItemResponse {
                item_id: format!("{}-{index:02}", spec.dimension.key()),
                dimension: spec.dimension,
                answer,
                reverse: false,
            })
        })
        .collect()
}
