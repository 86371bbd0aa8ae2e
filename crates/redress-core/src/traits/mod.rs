//! Trait seams between the session core and its collaborators.

pub mod gateway;
pub mod store;

pub use gateway::AuthGateway;
pub use store::SessionStore;
