//! Domain and wire-format types shared across the console.

pub mod capability;
pub mod outcome;
pub mod security;
pub mod session;
pub mod user;
pub mod wire;

pub use capability::AdminFeatures;
pub use outcome::{FailureKind, LoginFailure, LoginSuccess, RawFailure};
pub use security::SecurityInfo;
pub use session::SessionState;
pub use user::{UserProfile, UserType};
