//! Broadcast report aggregate
//!
//! The report model, form draft validation, in-memory filtering and
//! dashboard statistics.

pub mod draft;
pub mod filter;
pub mod model;
pub mod repository;
pub mod stats;

pub use draft::ReportDraft;
pub use filter::{ReportFilter, ReportMonth};
pub use model::{BroadcastReport, NewReport, Quality};
pub use repository::ReportRepositoryInterface;
pub use stats::ReportStats;
