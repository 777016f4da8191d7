//! Weekly orchestrators: fan-out of generation calls onto a seven-slot plan,
//! per-slot fencing of stale results, and the aggregate summary callers show.

pub mod posts;
pub mod reel;
pub mod summary;

pub use posts::{PostDispatch, WeeklyPostOrchestrator};
pub use reel::WeeklyOrchestrator;
pub use summary::{DispatchSummary, SlotFailure, SummaryKind};
