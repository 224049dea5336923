//! Status badge styles.

use serde::Serialize;

/// Visual style of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusStyle {
    Positive,
    Caution,
    Danger,
    Info,
    Accent,
    Neutral,
}

impl StatusStyle {
    /// Maps a status word to its badge style.
    ///
    /// Case-insensitive and total: unrecognised words are `Neutral`.
    ///
    /// ```
    /// use policydesk_lib::view::StatusStyle;
    ///
    /// assert_eq!(StatusStyle::lookup("Active"), StatusStyle::Positive);
    /// assert_eq!(StatusStyle::lookup("NEGOTIATING"), StatusStyle::Caution);
    /// assert_eq!(StatusStyle::lookup("archived"), StatusStyle::Neutral);
    /// ```
    pub fn lookup(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "active" | "closed" => Self::Positive,
            "pending" | "medium" | "negotiating" => Self::Caution,
            "expired" | "high" => Self::Danger,
            "prospect" | "low" => Self::Info,
            "quoted" => Self::Accent,
            _ => Self::Neutral,
        }
    }

    /// Stable lowercase name, usable as a style class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Caution => "caution",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Accent => "accent",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for StatusStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
