//! # redress-core
//!
//! Core crate for the Redress admin console. Contains traits,
//! configuration schemas, domain and wire-format types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Redress crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
