//! Domain tags for candidate items.
//!
//! Domains arrive as free-text labels. Known labels map to dedicated variants,
//! everything else (including user-created domains) is kept as `Custom`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Label used when an item carries no domain at all.
pub const GENERAL_DOMAIN: &str = "General";

/// Category label of a candidate item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    FinTech,
    HealthTech,
    EdTech,
    ECommerce,
    Gaming,
    SaaS,
    AiMl,
    Sustainability,
    /// Unrecognized or user-created domain, keeping its original label.
    Custom(String),
}

/// Presentation palette for a domain: a gradient from one tone to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainPalette {
    pub from: &'static str,
    pub to: &'static str,
}

impl Domain {
    /// Parses a wire label. Blank labels become `Custom("General")`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "FinTech" => Self::FinTech,
            "HealthTech" => Self::HealthTech,
            "EdTech" => Self::EdTech,
            "E-commerce" => Self::ECommerce,
            "Gaming" => Self::Gaming,
            "SaaS" => Self::SaaS,
            "AI/ML" => Self::AiMl,
            "Sustainability" => Self::Sustainability,
            "" => Self::Custom(GENERAL_DOMAIN.to_string()),
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::FinTech => "FinTech",
            Self::HealthTech => "HealthTech",
            Self::EdTech => "EdTech",
            Self::ECommerce => "E-commerce",
            Self::Gaming => "Gaming",
            Self::SaaS => "SaaS",
            Self::AiMl => "AI/ML",
            Self::Sustainability => "Sustainability",
            Self::Custom(label) => label,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::FinTech => "💳",
            Self::HealthTech => "🏥",
            Self::EdTech => "🎓",
            Self::ECommerce => "🛒",
            Self::Gaming => "🎮",
            Self::SaaS => "☁️",
            Self::AiMl => "🤖",
            Self::Sustainability => "🌱",
            Self::Custom(_) => "✨",
        }
    }

    pub fn palette(&self) -> DomainPalette {
        let (from, to) = match self {
            Self::FinTech => ("blue-500", "cyan-500"),
            Self::HealthTech => ("green-500", "emerald-500"),
            Self::EdTech => ("purple-500", "pink-500"),
            Self::ECommerce => ("orange-500", "red-500"),
            Self::Gaming => ("indigo-500", "purple-500"),
            Self::SaaS => ("teal-500", "blue-500"),
            Self::AiMl => ("pink-500", "rose-500"),
            Self::Sustainability => ("emerald-500", "green-500"),
            Self::Custom(_) => ("yellow-500", "orange-500"),
        };
        DomainPalette { from, to }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::Custom(GENERAL_DOMAIN.to_string())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Accepts a string label, `null`, or a missing field (with `#[serde(default)]`).
impl<'de> Deserialize<'de> for Domain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map(|l| Self::from_label(&l)).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_round_trip() {
        for label in [
            "FinTech",
            "HealthTech",
            "EdTech",
            "E-commerce",
            "Gaming",
            "SaaS",
            "AI/ML",
            "Sustainability",
        ] {
            let domain = Domain::from_label(label);
            assert!(!domain.is_custom(), "{label} should be a known domain");
            assert_eq!(domain.label(), label);
        }
    }

    #[test]
    fn test_custom_domain_uses_default_presentation() {
        let domain = Domain::from_label("Space Mining");
        assert_eq!(domain, Domain::Custom("Space Mining".to_string()));
        assert_eq!(domain.icon(), "✨");
        assert_eq!(domain.palette(), DomainPalette { from: "yellow-500", to: "orange-500" });
    }

    #[test]
    fn test_null_and_blank_become_general() {
        let from_null: Domain = serde_json::from_str("null").unwrap();
        assert_eq!(from_null.label(), GENERAL_DOMAIN);
        assert_eq!(Domain::from_label("  ").label(), GENERAL_DOMAIN);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Domain::AiMl).unwrap();
        assert_eq!(json, "\"AI/ML\"");
    }
}
