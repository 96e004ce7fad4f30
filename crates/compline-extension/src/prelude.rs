//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use compline_core::error::AppError;
pub use compline_core::result::AppResult;

pub use crate::candidate::{Candidate, CompletionContext};
pub use crate::kind::ExtensionKind;
pub use crate::module::ExtensionModule;
pub use crate::traits::{Extension, Filter, Source, Ui};

pub use crate::candidates;
