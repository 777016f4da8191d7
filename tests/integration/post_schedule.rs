//! Weekly post variant: one aggregate call, repaired onto seven slots.

use async_trait::async_trait;
use chrono::Weekday;
use parking_lot::Mutex;
use reelweek::error::PlannerError;
use reelweek::export::render_post_schedule;
use reelweek::generation::{
    DayPosts, PostParams, PostsPerDay, WeeklyPostClient, WeeklyPostsRequest, WeeklyPostsResponse,
};
use reelweek::orchestrator::WeeklyPostOrchestrator;
use reelweek::plan::{GlobalStatus, SlotStatus};
use reelweek::repair::{placeholder_post, DayAdjustment, DayMapping, RepairReport};
use reelweek::week::{day_label, WEEK};
use std::sync::Arc;

struct FixedWeek {
    response: Mutex<Option<WeeklyPostsResponse>>,
    requests: Mutex<Vec<WeeklyPostsRequest>>,
}

impl FixedWeek {
    fn new(response: WeeklyPostsResponse) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Some(response)),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl WeeklyPostClient for FixedWeek {
    async fn generate_week(
        &self,
        request: WeeklyPostsRequest,
    ) -> Result<WeeklyPostsResponse, PlannerError> {
        self.requests.lock().push(request);
        self.response
            .lock()
            .take()
            .ok_or_else(|| PlannerError::Generation("no response left".to_string()))
    }
}

fn week_with(per_day: usize, short_day: Weekday, short_count: usize) -> WeeklyPostsResponse {
    WeeklyPostsResponse {
        schedule: WEEK
            .iter()
            .map(|day| {
                let count = if *day == short_day { short_count } else { per_day };
                DayPosts::new(
                    day_label(*day),
                    (1..=count)
                        .map(|i| format!("{} post {}", day_label(*day), i))
                        .collect(),
                )
            })
            .collect(),
    }
}

fn params(per_day: usize) -> PostParams {
    PostParams {
        topic: "remote work".to_string(),
        posts_per_day: PostsPerDay::new(per_day).unwrap(),
        ..PostParams::default()
    }
}

#[tokio::test]
async fn test_short_wednesday_is_padded_with_labelled_placeholders() {
    let client = FixedWeek::new(week_with(3, Weekday::Wed, 1));
    let orch = WeeklyPostOrchestrator::new(client.clone());

    let dispatch = orch.generate(&params(3)).await.unwrap();

    assert_eq!(client.requests.lock().len(), 1);
    assert_eq!(orch.global_status(), GlobalStatus::Complete);
    let plan = orch.snapshot();
    let wednesday = plan.slot(Weekday::Wed).posts().unwrap();
    assert_eq!(wednesday.len(), 3);
    assert_eq!(wednesday[0], "Wednesday post 1");
    assert_eq!(wednesday[1], placeholder_post(1, Weekday::Wed));
    assert_eq!(wednesday[2], placeholder_post(2, Weekday::Wed));
    assert!(wednesday[1].contains("Placeholder") && wednesday[1].contains("Wednesday"));

    match dispatch.report.unwrap() {
        RepairReport::Repaired {
            mapping,
            adjustments,
        } => {
            assert_eq!(mapping, DayMapping::ByLabel);
            assert_eq!(adjustments[2], (Weekday::Wed, DayAdjustment::Padded { added: 2 }));
            assert_eq!(adjustments[0].1, DayAdjustment::Unchanged);
        }
        other => panic!("unexpected report {:?}", other),
    }
}

#[tokio::test]
async fn test_long_day_is_truncated_to_its_prefix() {
    let client = FixedWeek::new(week_with(2, Weekday::Sat, 4));
    let orch = WeeklyPostOrchestrator::new(client);
    orch.generate(&params(2)).await.unwrap();

    let plan = orch.snapshot();
    assert_eq!(
        plan.slot(Weekday::Sat).posts().unwrap(),
        &["Saturday post 1".to_string(), "Saturday post 2".to_string()]
    );
}

#[tokio::test]
async fn test_eight_entries_fail_every_slot_without_leaking_content() {
    let mut response = week_with(1, Weekday::Mon, 1);
    response
        .schedule
        .push(DayPosts::new("Monday", vec!["extra".to_string()]));
    let orch = WeeklyPostOrchestrator::new(FixedWeek::new(response));

    let dispatch = orch.generate(&params(1)).await.unwrap();

    assert_eq!(
        dispatch.report,
        Some(RepairReport::StructurallyInvalid { entries: 8 })
    );
    let plan = orch.snapshot();
    assert!(plan.slots().all(|s| s.status() == SlotStatus::Failed));
    let text = render_post_schedule(&plan);
    assert!(!text.contains("post 1"));
    assert!(!text.contains("extra"));
    assert!(text.contains("expected 7 days, got 8"));
}

#[tokio::test]
async fn test_request_carries_resolved_tone_and_strategy() {
    let client = FixedWeek::new(week_with(1, Weekday::Mon, 1));
    let orch = WeeklyPostOrchestrator::new(client.clone());
    let mut p = params(1);
    p.strategy = "Thought Leadership".parse().unwrap();
    p.tone = reelweek::tone::Tone::parse("  dry and understated ");
    orch.generate(&p).await.unwrap();

    let requests = client.requests.lock();
    assert_eq!(requests[0].tone.as_deref(), Some("dry and understated"));
    assert_eq!(requests[0].strategy.label(), "Thought Leadership");
}
