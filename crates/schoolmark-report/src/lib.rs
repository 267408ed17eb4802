//! schoolmark-report — Human-readable views over the aggregation engine.
//!
//! Every renderer is a pure `&Repository -> String` function; the file
//! writers are thin wrappers around them. The aggregation engine is this
//! crate's only data dependency.

pub mod stats;
pub mod text;

pub use stats::{render_system_stats, SystemStats};
pub use text::{export_top_schools_report, render_top_schools};
