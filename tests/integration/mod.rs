//! Integration tests for the weekly content planner

mod config_loading;
mod post_schedule;
mod reel_week;
mod stale_results;
mod test_utils;

pub use test_utils::*;
