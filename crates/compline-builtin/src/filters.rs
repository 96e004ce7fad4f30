//! Built-in filters: a prefix matcher and a length sorter.

use compline_extension_sdk::prelude::*;

/// Keeps candidates whose word starts with the completed keyword.
#[derive(Debug, Default)]
pub struct MatcherHead {
    name: String,
}

extension_name!(MatcherHead);

#[async_trait]
impl Filter for MatcherHead {
    async fn filter(
        &self,
        context: &CompletionContext,
        items: Vec<Candidate>,
    ) -> AppResult<Vec<Candidate>> {
        Ok(items
            .into_iter()
            .filter(|item| item.word.starts_with(&context.complete_str))
            .collect())
    }
}

/// Orders candidates by word length, then alphabetically.
#[derive(Debug, Default)]
pub struct SorterRank {
    name: String,
}

extension_name!(SorterRank);

#[async_trait]
impl Filter for SorterRank {
    async fn filter(
        &self,
        _context: &CompletionContext,
        mut items: Vec<Candidate>,
    ) -> AppResult<Vec<Candidate>> {
        items.sort_by(|a, b| {
            a.word
                .chars()
                .count()
                .cmp(&b.word.chars().count())
                .then_with(|| a.word.cmp(&b.word))
        });
        Ok(items)
    }
}
