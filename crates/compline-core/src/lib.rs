//! # compline-core
//!
//! Core crate for Compline. Contains the configuration schema and the
//! unified error system shared by the extension registry, the built-in
//! extensions and the command-line frontend.
//!
//! This crate has **no** internal dependencies on other Compline crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
