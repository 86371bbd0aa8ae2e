//! # redress-client
//!
//! HTTP transport for the Redress console plus typed clients for the
//! collaborator endpoints (grievances, stats, monthly reports).
//!
//! The transport owns the bearer-token slot; the auth crate sets and
//! clears it, and every request made through [`ApiClient`] carries the
//! token automatically once it is set.

pub mod client;
pub mod grievances;
pub mod reports;

pub use client::{ApiClient, BearerSlot};
