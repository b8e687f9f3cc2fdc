pub mod events;
pub mod export;
pub mod identity;
pub mod reports;

// Re-export key types for convenience
pub use events::{create_event_bus, EventMessage, EventBus, EventSubscriber, SessionEvent, SharedEventBus};
pub use export::{ExportError, ExportFormat, ExportOptions, ExportedFile};
pub use identity::{AuthContext, AuthError, SessionRejection, SessionService, UserService};
pub use reports::{Dashboard, ReportService};
