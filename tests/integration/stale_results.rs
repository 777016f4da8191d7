//! Results that settle after a newer attempt began must not overwrite it.

use async_trait::async_trait;
use chrono::Weekday;
use parking_lot::Mutex;
use reelweek::error::PlannerError;
use reelweek::generation::{
    DayPosts, PostParams, ReelParams, WeeklyPostClient, WeeklyPostsRequest, WeeklyPostsResponse,
};
use reelweek::orchestrator::{WeeklyOrchestrator, WeeklyPostOrchestrator};
use reelweek::plan::{GlobalStatus, SlotStatus};
use reelweek::preview::PreviewOutcome;
use reelweek::week::{day_label, WEEK};
use std::sync::Arc;
use tokio::sync::{oneshot, Notify};

use crate::integration::{ScriptedIdeas, ScriptedScripts};

#[tokio::test]
async fn test_late_idea_from_superseded_attempt_is_discarded() {
    let ideas = ScriptedIdeas::new();
    let release = ideas.hold(Weekday::Mon);
    let orch = WeeklyOrchestrator::new(ideas.clone(), ScriptedScripts::new());
    let params = ReelParams::new("chess");

    let (all, one) = tokio::join!(orch.dispatch_all(&params), async {
        ideas.gate_entered.notified().await;
        let one = orch.dispatch_one(Weekday::Mon, &params).await;
        let _ = release.send(());
        one
    });

    let all = all.unwrap();
    let one = one.unwrap();
    assert_eq!(one.succeeded, 1);
    assert_eq!(all.superseded, 1);
    assert_eq!(all.succeeded, 6);

    let plan = orch.snapshot();
    let monday = plan.slot(Weekday::Mon);
    assert_eq!(monday.status(), SlotStatus::Ready);
    assert_eq!(monday.idea().unwrap().title, "Monday take 2");
    assert_eq!(plan.global_status(), GlobalStatus::Complete);
}

#[tokio::test]
async fn test_script_for_shuffled_idea_is_discarded() {
    let ideas = ScriptedIdeas::new();
    let scripts = ScriptedScripts::new();
    let orch = WeeklyOrchestrator::new(ideas, scripts.clone());
    let params = ReelParams::new("chess");
    orch.dispatch_all(&params).await.unwrap();

    let release = scripts.hold();
    let (preview, shuffle) = tokio::join!(orch.expand_preview(Weekday::Wed, &params), async {
        scripts.gate_entered.notified().await;
        let shuffle = orch.dispatch_one(Weekday::Wed, &params).await;
        let _ = release.send(());
        shuffle
    });

    assert_eq!(preview.unwrap(), PreviewOutcome::Superseded);
    shuffle.unwrap();
    let plan = orch.snapshot();
    let wednesday = plan.slot(Weekday::Wed);
    assert!(wednesday.script().is_none());
    assert_eq!(wednesday.idea().unwrap().title, "Wednesday take 2");
}

/// Numbers its calls; the first one waits on a gate.
#[derive(Default)]
struct GatedWeek {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    gate_entered: Notify,
    calls: Mutex<usize>,
}

#[async_trait]
impl WeeklyPostClient for GatedWeek {
    async fn generate_week(
        &self,
        _request: WeeklyPostsRequest,
    ) -> Result<WeeklyPostsResponse, PlannerError> {
        let call = {
            let mut calls = self.calls.lock();
            *calls += 1;
            *calls
        };
        let gate = self.gate.lock().take();
        if let Some(rx) = gate {
            self.gate_entered.notify_one();
            let _ = rx.await;
        }
        Ok(WeeklyPostsResponse {
            schedule: WEEK
                .iter()
                .map(|day| DayPosts::new(day_label(*day), vec![format!("call{}", call)]))
                .collect(),
        })
    }
}

#[tokio::test]
async fn test_older_weekly_post_generation_is_discarded() {
    let client = Arc::new(GatedWeek::default());
    let (tx, rx) = oneshot::channel();
    *client.gate.lock() = Some(rx);
    let orch = WeeklyPostOrchestrator::new(client.clone());
    let params = PostParams {
        topic: "home office".to_string(),
        ..PostParams::default()
    };

    let (first, second) = tokio::join!(orch.generate(&params), async {
        client.gate_entered.notified().await;
        let second = orch.generate(&params).await;
        let _ = tx.send(());
        second
    });

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(second.summary.succeeded, 7);
    assert_eq!(first.summary.superseded, 7);
    assert_eq!(first.summary.succeeded, 0);
    assert!(first.summary.failures.is_empty());

    let plan = orch.snapshot();
    assert_eq!(plan.global_status(), GlobalStatus::Complete);
    assert!(plan
        .slots()
        .all(|slot| slot.posts() == Some(&["call2".to_string()][..])));
}
