//! `native` UI: keeps the last rendered menu in memory.

use tokio::sync::RwLock;
use tracing::debug;

use compline_extension_sdk::prelude::*;

/// Minimal UI that records what it was asked to show.
#[derive(Debug, Default)]
pub struct Native {
    name: String,
    shown: RwLock<Vec<Candidate>>,
}

extension_name!(Native);

impl Native {
    /// Candidates passed to the last `show`, empty after `hide`.
    pub async fn shown(&self) -> Vec<Candidate> {
        self.shown.read().await.clone()
    }
}

#[async_trait]
impl Ui for Native {
    async fn show(&self, context: &CompletionContext, items: &[Candidate]) -> AppResult<()> {
        debug!(ui = %self.name, input = %context.input, count = items.len(), "Showing menu");
        *self.shown.write().await = items.to_vec();
        Ok(())
    }

    async fn hide(&self) -> AppResult<()> {
        self.shown.write().await.clear();
        Ok(())
    }
}
