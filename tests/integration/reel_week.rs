//! End-to-end runs of the day-idea orchestrator against scripted clients.

use chrono::Weekday;
use reelweek::error::{PlannerError, OVERLOAD_MESSAGE};
use reelweek::export::saved_reel_days;
use reelweek::generation::ReelParams;
use reelweek::orchestrator::{SummaryKind, WeeklyOrchestrator};
use reelweek::plan::{GlobalStatus, SlotStatus};
use reelweek::preview::PreviewOutcome;
use reelweek::week::WEEK;

use crate::integration::{ScriptedIdeas, ScriptedScripts};

#[tokio::test]
async fn test_sunday_overload_is_a_partial_failure_naming_the_day() {
    let ideas = ScriptedIdeas::new();
    ideas.fail(
        Weekday::Sun,
        PlannerError::ProviderError("503 Service Unavailable: model is overloaded".to_string()),
    );
    let orch = WeeklyOrchestrator::new(ideas.clone(), ScriptedScripts::new());

    let summary = orch
        .dispatch_all(&ReelParams::new("sustainable fashion"))
        .await
        .unwrap();

    assert_eq!(ideas.calls.lock().len(), 7);
    assert!(ideas.calls.lock().iter().all(|c| c.tone.is_none()));
    assert_eq!(orch.global_status(), GlobalStatus::PartialFailure);
    assert_eq!(summary.kind(), SummaryKind::PartialOverload);

    let message = summary.message().unwrap();
    assert!(message.contains("overloaded"));
    assert!(message.contains("Sunday"));
    assert!(!message.contains("Monday"));

    let plan = orch.snapshot();
    let sunday_error = plan.slot(Weekday::Sun).error().unwrap();
    assert!(sunday_error.contains(OVERLOAD_MESSAGE));
    assert!(!sunday_error.contains("503"));
    for day in WEEK.into_iter().filter(|d| *d != Weekday::Sun) {
        assert_eq!(plan.slot(day).status(), SlotStatus::Ready);
    }
}

#[tokio::test]
async fn test_every_day_overloaded_is_total_failure() {
    let ideas = ScriptedIdeas::new();
    for day in WEEK {
        ideas.fail(day, PlannerError::Overloaded("529".to_string()));
    }
    let orch = WeeklyOrchestrator::new(ideas, ScriptedScripts::new());
    let summary = orch.dispatch_all(&ReelParams::new("gardening")).await.unwrap();

    assert_eq!(orch.global_status(), GlobalStatus::TotalFailure);
    assert_eq!(summary.kind(), SummaryKind::TotalOverload);
}

#[tokio::test]
async fn test_no_slot_is_left_pending() {
    let ideas = ScriptedIdeas::new();
    ideas.fail(Weekday::Tue, PlannerError::Generation("empty output".to_string()));
    ideas.fail(Weekday::Fri, PlannerError::Overloaded("503".to_string()));
    let orch = WeeklyOrchestrator::new(ideas, ScriptedScripts::new());
    let summary = orch.dispatch_all(&ReelParams::new("coffee")).await.unwrap();

    let plan = orch.snapshot();
    assert_eq!(plan.slots().count(), 7);
    assert!(plan
        .slots()
        .all(|s| matches!(s.status(), SlotStatus::Ready | SlotStatus::Failed)));
    assert_eq!(summary.kind(), SummaryKind::Failed);
    assert_eq!(summary.failed_days(), vec![Weekday::Tue, Weekday::Fri]);
}

#[tokio::test]
async fn test_shuffle_recovers_failed_day() {
    let ideas = ScriptedIdeas::new();
    ideas.fail(Weekday::Sun, PlannerError::Overloaded("503".to_string()));
    let orch = WeeklyOrchestrator::new(ideas.clone(), ScriptedScripts::new());
    let params = ReelParams::new("sustainable fashion");
    orch.dispatch_all(&params).await.unwrap();
    let before = orch.snapshot();

    orch.dispatch_one(Weekday::Sun, &params).await.unwrap();

    let after = orch.snapshot();
    assert_eq!(after.global_status(), GlobalStatus::Complete);
    assert_eq!(ideas.calls_for(Weekday::Sun), 2);
    for day in WEEK.into_iter().filter(|d| *d != Weekday::Sun) {
        assert_eq!(after.slot(day), before.slot(day));
    }
}

#[tokio::test]
async fn test_preview_cache_is_idempotent() {
    let scripts = ScriptedScripts::new();
    let orch = WeeklyOrchestrator::new(ScriptedIdeas::new(), scripts.clone());
    let params = ReelParams::new("woodworking").with_series("Shop Talk");
    orch.dispatch_all(&params).await.unwrap();

    let first = orch.expand_preview(Weekday::Fri, &params).await.unwrap();
    let second = orch.expand_preview(Weekday::Fri, &params).await.unwrap();

    assert!(matches!(first, PreviewOutcome::Generated(_)));
    assert!(matches!(second, PreviewOutcome::Cached(_)));
    assert_eq!(first.script(), second.script());
    assert_eq!(scripts.calls.lock().len(), 1);
    assert_eq!(
        scripts.calls.lock()[0].series_name.as_deref(),
        Some("Shop Talk")
    );

    let saved = saved_reel_days(&orch.snapshot());
    assert_eq!(saved.len(), 7);
    assert!(saved.iter().filter(|d| d.script.is_some()).count() == 1);
}

#[tokio::test]
async fn test_preview_on_failed_day_is_rejected_without_a_call() {
    let ideas = ScriptedIdeas::new();
    ideas.fail(Weekday::Mon, PlannerError::Generation("bad json".to_string()));
    let scripts = ScriptedScripts::new();
    let orch = WeeklyOrchestrator::new(ideas, scripts.clone());
    let params = ReelParams::new("baking");
    orch.dispatch_all(&params).await.unwrap();

    let err = orch.expand_preview(Weekday::Mon, &params).await.unwrap_err();
    assert!(matches!(err, PlannerError::Precondition(_)));
    assert!(scripts.calls.lock().is_empty());
    assert_eq!(orch.snapshot().slot(Weekday::Mon).status(), SlotStatus::Failed);
}
