//! # redress-auth
//!
//! The session and authentication lifecycle of the Redress console:
//! persistent session store, auth gateway with endpoint fallback, failure
//! classification, and the session controller that owns the state machine.
//!
//! Consumers hold an [`controller::SessionController`] (usually in an
//! `Arc`), subscribe to its state, and call its four operations. Nothing
//! else in the application touches the persisted store or the bearer slot.

pub mod classify;
pub mod controller;
pub mod gateway;
pub mod store;

pub use controller::SessionController;
pub use gateway::HttpAuthGateway;
pub use store::{FileSessionStore, MemorySessionStore};
