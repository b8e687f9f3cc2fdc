//! Identity module: user management and session resolution

pub mod service;
pub mod session;

pub use service::{NewUserInput, SignupInput, UserListing, UserService, MIN_PASSWORD_LEN};
pub use session::{AuthContext, AuthError, IssuedSession, SessionRejection, SessionService};
