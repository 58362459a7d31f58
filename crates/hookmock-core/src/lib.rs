//! # hookmock-core
//!
//! Core crate for HookMock. Contains the unified error system, the
//! configuration schema and loader, and the path/specifier helpers shared
//! by the plugin host and the mock interceptor.
//!
//! This crate has **no** internal dependencies on other HookMock crates.

pub mod config;
pub mod error;
pub mod path;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
