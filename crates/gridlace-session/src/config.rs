//! Resolved session configuration.
//!
//! The engine consumes configuration already resolved by the host; there is
//! no settings persistence or UI here.

use serde::{Deserialize, Serialize};

/// How non-selected cells are highlighted relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightMode {
    /// Only the selection itself is highlighted.
    Minimal,
    /// Cells sharing the selection's value or box are highlighted.
    #[default]
    Restriction,
    /// Empty cells where the selection's digit could legally go are
    /// highlighted.
    Potential,
}

/// When detected mistakes are surfaced to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MistakeDisplay {
    /// Show mistakes as soon as they are made.
    #[default]
    Immediate,
    /// Show mistakes only once the board is full.
    OnFull,
    /// Never show mistakes.
    Never,
}

/// Resolved configuration for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// The highlight mode.
    pub highlight_mode: HighlightMode,
    /// The mistake display policy.
    pub mistake_display: MistakeDisplay,
    /// Whether the session starts in note-entry mode.
    pub note_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.highlight_mode, HighlightMode::Restriction);
        assert_eq!(config.mistake_display, MistakeDisplay::Immediate);
        assert!(!config.note_mode);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "highlightMode": "potential" }"#).unwrap();
        assert_eq!(config.highlight_mode, HighlightMode::Potential);
        assert_eq!(config.mistake_display, MistakeDisplay::Immediate);
    }
}
