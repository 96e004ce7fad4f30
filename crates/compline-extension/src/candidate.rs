//! Completion candidates and the context passed to extensions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single completion item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Text inserted on completion.
    pub word: String,
    /// Text shown instead of `word`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbr: Option<String>,
    /// Extra text shown beside the item (usually the source mark).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
    /// Item kind, e.g. `"Function"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Preview text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Opaque data owned by the producing source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Value>,
}

impl Candidate {
    /// Creates a candidate with only `word` set.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            abbr: None,
            menu: None,
            kind: None,
            info: None,
            user_data: None,
        }
    }

    /// Sets the menu text.
    pub fn with_menu(mut self, menu: impl Into<String>) -> Self {
        self.menu = Some(menu.into());
        self
    }
}

/// What extensions see of the editor state at completion time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionContext {
    /// Current line up to the cursor.
    pub input: String,
    /// The keyword being completed (suffix of `input`).
    pub complete_str: String,
    /// Buffer lines.
    #[serde(default)]
    pub lines: Vec<String>,
    /// Zero-based index of the cursor line in `lines`.
    #[serde(default)]
    pub cursor_line: usize,
}

impl CompletionContext {
    /// Creates a context for `input`, taking the trailing keyword as `complete_str`.
    pub fn new(input: impl Into<String>) -> Self {
        let input = input.into();
        let start = input
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
            .last()
            .map(|(i, _)| i)
            .unwrap_or(input.len());
        let complete_str = input[start..].to_string();
        Self {
            input,
            complete_str,
            lines: Vec::new(),
            cursor_line: 0,
        }
    }

    /// Attaches buffer lines and the cursor line index.
    pub fn with_lines(mut self, lines: Vec<String>, cursor_line: usize) -> Self {
        self.lines = lines;
        self.cursor_line = cursor_line;
        self
    }
}

/// Builds a `Vec<Candidate>` from words.
#[macro_export]
macro_rules! candidates {
    ($($word:expr),* $(,)?) => {
        vec![$($crate::candidate::Candidate::new($word)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_str_is_trailing_keyword() {
        let ctx = CompletionContext::new("let foo = bar_ba");
        assert_eq!(ctx.complete_str, "bar_ba");
    }

    #[test]
    fn test_complete_str_empty_after_space() {
        let ctx = CompletionContext::new("call ");
        assert_eq!(ctx.complete_str, "");
    }

    #[test]
    fn test_candidate_skips_empty_fields() {
        let json = serde_json::to_value(Candidate::new("foo").with_menu("[A]")).expect("serialize");
        assert_eq!(json, serde_json::json!({ "word": "foo", "menu": "[A]" }));
    }

    #[test]
    fn test_candidates_macro() {
        let items = candidates!["a", "b"];
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].word, "b");
    }
}
