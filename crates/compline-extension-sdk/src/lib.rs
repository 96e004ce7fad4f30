//! # compline-extension-sdk
//!
//! SDK for writing Compline extensions.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use compline_extension_sdk::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Lines {
//!     name: String,
//! }
//!
//! extension_name!(Lines);
//!
//! #[async_trait]
//! impl Source for Lines {
//!     async fn gather(&self, context: &CompletionContext) -> AppResult<Vec<Candidate>> {
//!         Ok(context.lines.iter().map(Candidate::new).collect())
//!     }
//! }
//!
//! // In a `cdylib` crate, expose the module to the dynamic resolver:
//! export_extension_module!(ExtensionModule::new().with_source(|| Ok(Lines::default())));
//! ```

pub mod macros;

/// Prelude for convenient imports.
pub mod prelude {
    pub use async_trait::async_trait;
    pub use compline_core::error::AppError;
    pub use compline_core::result::AppResult;
    pub use compline_extension::candidate::{Candidate, CompletionContext};
    pub use compline_extension::candidates;
    pub use compline_extension::kind::ExtensionKind;
    pub use compline_extension::module::ExtensionModule;
    pub use compline_extension::traits::{Extension, Filter, Source, Ui};

    pub use crate::{export_extension_module, extension_name};
}

#[doc(hidden)]
pub mod __private {
    pub use compline_extension::ffi::into_raw;
    pub use compline_extension::module::ExtensionModule;
    pub use serde_json::Value;
}
