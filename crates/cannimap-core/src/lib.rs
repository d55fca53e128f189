#![forbid(unsafe_code)]

//! Conflict snapshot model + ambient services for the cannimap engine.
//!
//! Design goals:
//! - read-only snapshots: the engine never mutates conflict data after decoding
//! - total calculators: derived metrics have no error cases over well-typed input
//! - deterministic, testable outputs

pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod selection;
pub mod theme;

pub use config::DashboardConfig;
pub use error::{Error, Result};
pub use model::{Conflict, ConflictId, Page, Severity, decode_snapshot, decode_snapshot_str};
pub use selection::Selection;
pub use theme::Theme;
