//! Extension kinds and per-kind storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use compline_core::error::AppError;

/// The category of an extension. Each kind has its own namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    /// Renders candidates to the user.
    Ui,
    /// Produces candidates.
    Source,
    /// Transforms candidate lists (matchers, sorters, converters).
    Filter,
}

impl ExtensionKind {
    /// All kinds, in load order.
    pub const ALL: [ExtensionKind; 3] = [Self::Ui, Self::Source, Self::Filter];

    /// Returns the string form used in configuration and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Source => "source",
            Self::Filter => "filter",
        }
    }

    /// Sub-directory of a search root that holds extensions of this kind.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Source => "sources",
            Self::Filter => "filters",
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ui" => Ok(Self::Ui),
            "source" => Ok(Self::Source),
            "filter" => Ok(Self::Filter),
            other => Err(AppError::validation(format!(
                "Unknown extension kind '{other}' (expected ui, source or filter)"
            ))),
        }
    }
}

/// One value per extension kind.
#[derive(Debug, Default)]
pub struct PerKind<T> {
    /// UI slot.
    pub ui: T,
    /// Source slot.
    pub source: T,
    /// Filter slot.
    pub filter: T,
}

impl<T> PerKind<T> {
    /// Returns the slot for `kind`.
    pub fn get(&self, kind: ExtensionKind) -> &T {
        match kind {
            ExtensionKind::Ui => &self.ui,
            ExtensionKind::Source => &self.source,
            ExtensionKind::Filter => &self.filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for kind in ExtensionKind::ALL {
            let parsed: ExtensionKind = kind.to_string().parse().expect("should parse");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("renderer".parse::<ExtensionKind>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ExtensionKind::Source).expect("serialize");
        assert_eq!(json, "\"source\"");
    }

    #[test]
    fn test_per_kind_get() {
        let slots = PerKind {
            ui: 1,
            source: 2,
            filter: 3,
        };
        assert_eq!(*slots.get(ExtensionKind::Ui), 1);
        assert_eq!(*slots.get(ExtensionKind::Source), 2);
        assert_eq!(*slots.get(ExtensionKind::Filter), 3);
    }
}
