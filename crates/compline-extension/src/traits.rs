//! Capability traits implemented by extension instances.
//!
//! Every instance carries a `name` that the registry assigns right after
//! construction. Modules never pick their own name: the same type may be
//! instantiated several times, once under its base name and once per alias.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use compline_core::result::AppResult;

use crate::candidate::{Candidate, CompletionContext};

/// Behaviour shared by every extension kind.
pub trait Extension: Send + Sync + fmt::Debug {
    /// The name this instance is registered under.
    fn name(&self) -> &str;

    /// Assigns the registered name. Called once by the registry.
    fn set_name(&mut self, name: String);

    /// Default parameters, merged by the host with user options.
    fn params(&self) -> Value {
        Value::Object(serde_json::Map::new())
    }
}

/// Renders candidates.
#[async_trait]
pub trait Ui: Extension {
    /// Displays `items` for the given context.
    async fn show(&self, context: &CompletionContext, items: &[Candidate]) -> AppResult<()>;

    /// Hides whatever `show` displayed.
    async fn hide(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Gathers candidates.
#[async_trait]
pub trait Source: Extension {
    /// Returns candidates for the given context.
    async fn gather(&self, context: &CompletionContext) -> AppResult<Vec<Candidate>>;
}

/// Transforms a candidate list.
#[async_trait]
pub trait Filter: Extension {
    /// Returns the transformed candidates.
    async fn filter(
        &self,
        context: &CompletionContext,
        items: Vec<Candidate>,
    ) -> AppResult<Vec<Candidate>>;
}
