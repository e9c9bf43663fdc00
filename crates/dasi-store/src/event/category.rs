//! Event categories offered by the editor's 카테고리 select.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of an event. Serialized with the same Korean labels the
/// form displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// 업무
    #[serde(rename = "업무")]
    Work,
    /// 개인
    #[serde(rename = "개인")]
    Personal,
    /// 가족
    #[serde(rename = "가족")]
    Family,
    /// 기타
    #[serde(rename = "기타")]
    Other,
}

impl EventCategory {
    /// Returns the Korean label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "업무",
            Self::Personal => "개인",
            Self::Family => "가족",
            Self::Other => "기타",
        }
    }

    /// Parses a category from its label.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "업무" => Self::Work,
            "개인" => Self::Personal,
            "가족" => Self::Family,
            "기타" => Self::Other,
            _ => return None,
        })
    }

    /// Returns all categories in the order the form lists them.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Work, Self::Personal, Self::Family, Self::Other]
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse() {
        assert_eq!(EventCategory::parse("업무"), Some(EventCategory::Work));
        assert_eq!(EventCategory::parse("개인"), Some(EventCategory::Personal));
        assert_eq!(EventCategory::parse("회의"), None);
    }

    #[test]
    fn category_serde_uses_korean_labels() {
        let json = serde_json::to_string(&EventCategory::Family).expect("serializes");
        assert_eq!(json, "\"가족\"");
        let category: EventCategory = serde_json::from_str("\"기타\"").expect("deserializes");
        assert_eq!(category, EventCategory::Other);
    }

    #[test]
    fn all_round_trips() {
        for category in EventCategory::all() {
            assert_eq!(EventCategory::parse(category.as_str()), Some(category));
        }
    }
}
