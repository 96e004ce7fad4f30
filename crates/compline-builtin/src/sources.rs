//! `around` source: words from the lines near the cursor.

use std::collections::HashSet;

use compline_extension_sdk::prelude::*;

/// Lines above and below the cursor that are scanned.
const DEFAULT_MAX_LINES: usize = 20;

/// Collects keywords from the neighbourhood of the cursor line.
#[derive(Debug)]
pub struct Around {
    name: String,
    max_lines: usize,
}

impl Default for Around {
    fn default() -> Self {
        Self {
            name: String::new(),
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

extension_name!(Around, params: serde_json::json!({ "maxLines": DEFAULT_MAX_LINES }));

impl Around {
    /// Line indices ordered by distance from the cursor, nearest first.
    fn scan_order(&self, cursor: usize, len: usize) -> Vec<usize> {
        let mut order = Vec::new();
        for distance in 0..=self.max_lines {
            if let Some(above) = cursor.checked_sub(distance) {
                if above < len {
                    order.push(above);
                }
            }
            if let Some(below) = cursor.checked_add(distance) {
                if distance > 0 && below < len {
                    order.push(below);
                }
            }
        }
        order
    }
}

fn keywords(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= 2)
}

#[async_trait]
impl Source for Around {
    async fn gather(&self, context: &CompletionContext) -> AppResult<Vec<Candidate>> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for index in self.scan_order(context.cursor_line, context.lines.len()) {
            for word in keywords(&context.lines[index]) {
                if word != context.complete_str && seen.insert(word) {
                    items.push(Candidate::new(word).with_menu("[A]"));
                }
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|line| line.to_string()).collect()
    }

    #[tokio::test]
    async fn test_nearest_lines_first() {
        let ctx = CompletionContext::new("let x = fo").with_lines(
            lines(&["alpha beta", "let x = fo", "gamma alpha"]),
            1,
        );
        let words: Vec<String> = Around::default()
            .gather(&ctx)
            .await
            .expect("gather")
            .into_iter()
            .map(|c| c.word)
            .collect();
        assert_eq!(words, vec!["let", "alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn test_respects_max_lines() {
        let source = Around {
            name: "around".to_string(),
            max_lines: 1,
        };
        let ctx = CompletionContext::new("").with_lines(
            lines(&["far", "near", "", "close", "distant"]),
            2,
        );
        let words: Vec<String> = source
            .gather(&ctx)
            .await
            .expect("gather")
            .into_iter()
            .map(|c| c.word)
            .collect();
        assert_eq!(words, vec!["near", "close"]);
    }

    #[tokio::test]
    async fn test_cursor_past_the_end_yields_nothing() {
        let ctx = CompletionContext::new("").with_lines(lines(&["alpha beta"]), usize::MAX);
        let items = Around::default().gather(&ctx).await.expect("gather");
        assert!(items.is_empty());
    }

    #[test]
    fn test_params() {
        assert_eq!(Around::default().params()["maxLines"], 20);
    }
}
