//! CLI domain: parse, route and presentation only.
//! No orchestration logic; the route table dispatches to the orchestrators.

mod parse;
mod presentation;
mod route;

pub use parse::{Cli, Commands};
pub use presentation::{
    format_exported_reels, format_reel_week, format_repair_report, format_section_heading,
    format_summary, ExportedReel,
};
pub use route::RunContext;
