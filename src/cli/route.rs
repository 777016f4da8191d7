//! CLI route: maps parsed commands onto the orchestrators and formats their results.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_exported_reels, format_reel_week, format_repair_report, format_summary, ExportedReel,
};
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::export::{
    calendar_event_url, reel_content_filename, render_post_schedule, render_reel_content,
    saved_reel_days, EventWindow,
};
use crate::generation::request::{PostParams, PostStrategy, PostsPerDay, ReelParams};
use crate::generation::LlmGenerator;
use crate::orchestrator::{WeeklyOrchestrator, WeeklyPostOrchestrator};
use crate::plan::{SlotStatus, WeeklyPlan};
use crate::provider::ProviderFactory;
use crate::tone::Tone;
use crate::week::WEEK;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runtime context for CLI execution: loaded config and the generation backend.
pub struct RunContext {
    config: PlannerConfig,
    generator: Arc<LlmGenerator>,
}

impl RunContext {
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        let provider = ProviderFactory::create_client(&config.provider)?;
        let options = ProviderFactory::completion_options(&config.provider);
        info!(
            provider = provider.provider_name(),
            model = provider.model_name(),
            "Generation backend ready"
        );
        Ok(Self {
            config,
            generator: Arc::new(LlmGenerator::new(provider, options)),
        })
    }

    /// Run a command. Generation failures are reported in the output; only
    /// invalid input or configuration produces `Err`.
    pub async fn execute(&self, command: &Commands) -> Result<String, PlannerError> {
        match command {
            Commands::Ideas {
                niche,
                series,
                tone,
                scripts,
                json,
                export_dir,
            } => {
                let mut params = ReelParams::new(niche.clone()).with_tone(self.tone(tone.as_deref()));
                if let Some(series) = series {
                    params = params.with_series(series.clone());
                }
                self.handle_ideas(&params, *scripts, *json, export_dir.as_deref())
                    .await
            }
            Commands::Posts {
                topic,
                strategy,
                per_day,
                tone,
            } => {
                let strategy = match strategy {
                    Some(s) => s.parse::<PostStrategy>()?,
                    None => self.config.defaults.strategy,
                };
                let posts_per_day = match per_day {
                    Some(n) => PostsPerDay::new(*n)?,
                    None => self.config.defaults.posts_per_day,
                };
                let params = PostParams {
                    topic: topic.clone(),
                    strategy,
                    posts_per_day,
                    tone: self.tone(tone.as_deref()),
                };
                self.handle_posts(&params).await
            }
        }
    }

    fn tone(&self, flag: Option<&str>) -> Tone {
        flag.map(Tone::parse)
            .unwrap_or_else(|| self.config.defaults.tone())
    }

    async fn handle_ideas(
        &self,
        params: &ReelParams,
        scripts: bool,
        json: bool,
        export_dir: Option<&Path>,
    ) -> Result<String, PlannerError> {
        let orchestrator = WeeklyOrchestrator::new(self.generator.clone(), self.generator.clone());
        let summary = orchestrator.dispatch_all(params).await?;

        if scripts {
            for day in WEEK {
                if orchestrator.snapshot().slot(day).status() != SlotStatus::Ready {
                    continue;
                }
                if let Err(err) = orchestrator.expand_preview(day, params).await {
                    warn!(error = %err, "Script expansion skipped");
                }
            }
        }

        let plan = orchestrator.snapshot();
        let exported = match export_dir {
            Some(dir) => Some(export_reels(&plan, dir)?),
            None => None,
        };
        if json {
            return serde_json::to_string_pretty(&saved_reel_days(&plan))
                .map_err(|e| PlannerError::Generation(format!("Failed to encode output: {}", e)));
        }
        let mut out = format!(
            "{}\n{}",
            format_reel_week(&plan, &params.niche),
            format_summary(&summary)
        );
        if let Some(exported) = exported {
            out.push_str(&format!("\n\n{}", format_exported_reels(&exported)));
        }
        Ok(out)
    }

    async fn handle_posts(&self, params: &PostParams) -> Result<String, PlannerError> {
        let orchestrator = WeeklyPostOrchestrator::new(self.generator.clone());
        let dispatch = orchestrator.generate(params).await?;

        let mut out = render_post_schedule(&orchestrator.snapshot());
        if let Some(notes) = dispatch.report.as_ref().and_then(format_repair_report) {
            out.push_str(&notes);
            out.push('\n');
        }
        out.push_str(&format_summary(&dispatch.summary));
        Ok(out)
    }
}

/// Write a text file for every day with an expanded script.
fn export_reels(plan: &WeeklyPlan, dir: &Path) -> Result<Vec<ExportedReel>, PlannerError> {
    std::fs::create_dir_all(dir)?;
    let now = chrono::Local::now();
    let mut exported = Vec::new();
    for slot in plan.slots() {
        let (Some(content), Some(idea)) = (render_reel_content(slot), slot.idea()) else {
            continue;
        };
        let path = dir.join(reel_content_filename(&idea.title));
        std::fs::write(&path, content)?;
        debug!(day = slot.label(), path = %path.display(), "Reel content exported");
        let calendar_url = EventWindow::next_for(slot.day(), &now)
            .and_then(|window| calendar_event_url(slot, &window));
        exported.push(ExportedReel {
            day: slot.day(),
            path,
            calendar_url,
        });
    }
    Ok(exported)
}
