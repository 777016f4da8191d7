//! Shared test utilities for integration tests
//!
//! Scripted generation clients plus XDG isolation for config tests.

use async_trait::async_trait;
use chrono::Weekday;
use parking_lot::Mutex;
use reelweek::error::PlannerError;
use reelweek::generation::{
    DayIdea, DayIdeaClient, DayIdeaRequest, ReelScript, ScriptClient, ScriptRequest,
};
use reelweek::provider::{ChatMessage, CompletionOptions, CompletionResponse, ModelProviderClient};
use reelweek::week::day_label;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::{oneshot, Notify};

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());

    let result = f();
    env_state.restore();
    result
}

/// Day-idea client with per-day failures and an optional gate on one call.
#[derive(Default)]
pub struct ScriptedIdeas {
    failures: Mutex<HashMap<Weekday, PlannerError>>,
    gate: Mutex<Option<(Weekday, oneshot::Receiver<()>)>>,
    pub gate_entered: Notify,
    pub calls: Mutex<Vec<DayIdeaRequest>>,
}

impl ScriptedIdeas {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The next call for `day` fails with `err`.
    pub fn fail(&self, day: Weekday, err: PlannerError) {
        self.failures.lock().insert(day, err);
    }

    /// The next call for `day` blocks until the returned sender fires.
    pub fn hold(&self, day: Weekday) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock() = Some((day, rx));
        tx
    }

    pub fn calls_for(&self, day: Weekday) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.day == day_label(day))
            .count()
    }
}

#[async_trait]
impl DayIdeaClient for ScriptedIdeas {
    async fn generate_idea(&self, request: DayIdeaRequest) -> Result<DayIdea, PlannerError> {
        let call_number = {
            let mut calls = self.calls.lock();
            calls.push(request.clone());
            calls.iter().filter(|c| c.day == request.day).count()
        };
        let day = request
            .day
            .parse::<Weekday>()
            .map_err(|_| PlannerError::Generation(format!("bad day {}", request.day)))?;

        let gate = {
            let mut gate = self.gate.lock();
            match gate.take() {
                Some((gated, rx)) if gated == day => Some(rx),
                other => {
                    *gate = other;
                    None
                }
            }
        };
        if let Some(rx) = gate {
            self.gate_entered.notify_one();
            let _ = rx.await;
        }

        if let Some(err) = self.failures.lock().remove(&day) {
            return Err(err);
        }
        Ok(DayIdea {
            title: format!("{} take {}", request.day, call_number),
            one_line_idea: format!("{} idea about {}", request.day, request.niche),
        })
    }
}

/// Script client counting calls, optionally gated once.
#[derive(Default)]
pub struct ScriptedScripts {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub gate_entered: Notify,
    pub calls: Mutex<Vec<ScriptRequest>>,
}

impl ScriptedScripts {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn hold(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock() = Some(rx);
        tx
    }
}

#[async_trait]
impl ScriptClient for ScriptedScripts {
    async fn generate_script(&self, request: ScriptRequest) -> Result<ReelScript, PlannerError> {
        self.calls.lock().push(request.clone());
        let gate = self.gate.lock().take();
        if let Some(rx) = gate {
            self.gate_entered.notify_one();
            let _ = rx.await;
        }
        Ok(ReelScript {
            script: format!("Script for {}", request.title),
            caption: format!("About {}", request.niche),
            tags: vec!["#reel".to_string()],
        })
    }
}

/// Chat-completion backend replaying canned responses in order.
pub struct CannedProvider {
    responses: Mutex<VecDeque<Result<String, PlannerError>>>,
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl CannedProvider {
    pub fn new(responses: Vec<Result<String, PlannerError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ModelProviderClient for CannedProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        _options: CompletionOptions,
    ) -> Result<CompletionResponse, PlannerError> {
        self.prompts.lock().push(messages);
        let next = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(PlannerError::ProviderError("no canned response".to_string())));
        next.map(|content| CompletionResponse {
            content,
            model: "canned".to_string(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "canned"
    }

    fn model_name(&self) -> &str {
        "canned"
    }
}
