pub mod service;

pub use service::{Dashboard, ReportService};
