//! Repeat cadence kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How often an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatKind {
    /// No repetition; the event happens exactly once.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatKind {
    /// Returns the lowercase wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Parses a kind from its wire token (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => return None,
        })
    }

    /// Returns true for every kind except `None`.
    #[must_use]
    pub const fn is_recurring(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns the Korean unit used in rule summaries (일/주/월/년),
    /// or `None` for a non-repeating kind.
    #[must_use]
    pub const fn unit_label(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Daily => Some("일"),
            Self::Weekly => Some("주"),
            Self::Monthly => Some("월"),
            Self::Yearly => Some("년"),
        }
    }
}

impl fmt::Display for RepeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse() {
        assert_eq!(RepeatKind::parse("weekly"), Some(RepeatKind::Weekly));
        assert_eq!(RepeatKind::parse("MONTHLY"), Some(RepeatKind::Monthly));
        assert_eq!(RepeatKind::parse("fortnightly"), None);
    }

    #[test]
    fn kind_round_trips_through_as_str() {
        for kind in [
            RepeatKind::None,
            RepeatKind::Daily,
            RepeatKind::Weekly,
            RepeatKind::Monthly,
            RepeatKind::Yearly,
        ] {
            assert_eq!(RepeatKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn kind_serde_uses_lowercase_tokens() {
        let token = serde_json::to_string(&RepeatKind::Daily).expect("serializes");
        assert_eq!(token, "\"daily\"");
        let kind: RepeatKind = serde_json::from_str("\"none\"").expect("deserializes");
        assert_eq!(kind, RepeatKind::None);
    }

    #[test]
    fn unit_labels() {
        assert_eq!(RepeatKind::Daily.unit_label(), Some("일"));
        assert_eq!(RepeatKind::Yearly.unit_label(), Some("년"));
        assert_eq!(RepeatKind::None.unit_label(), None);
    }
}
