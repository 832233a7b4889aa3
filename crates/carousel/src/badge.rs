use crate::item::{Accent, Item};
use serde::Deserialize;
use std::collections::HashMap;

/// Tags shown per card; the rest only appear in the detail list.
pub const MAX_BADGES: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TagStyle {
    #[serde(default)]
    pub abbr: Option<String>,
    #[serde(default)]
    pub color: Option<Accent>,
}

/// Tag names are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, TagStyle>")]
pub struct TagStyles(HashMap<String, TagStyle>);

impl From<HashMap<String, TagStyle>> for TagStyles {
    fn from(styles: HashMap<String, TagStyle>) -> Self {
        Self(
            styles
                .into_iter()
                .map(|(name, style)| (name.to_lowercase(), style))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub label: String,
    pub abbr: String,
    pub color: Accent,
}

impl TagStyles {
    pub fn new(styles: HashMap<String, TagStyle>) -> Self {
        Self::from(styles)
    }

    /// Known tags use their configured look; anything else gets its first two letters and the card accent.
    pub fn badge(&self, tag: &str, accent: Accent) -> Badge {
        let style = self.0.get(&tag.to_lowercase());
        let abbr = style
            .and_then(|s| s.abbr.clone())
            .unwrap_or_else(|| tag.chars().take(2).collect::<String>().to_uppercase());

        Badge {
            label: tag.to_string(),
            abbr,
            color: style.and_then(|s| s.color).unwrap_or(accent),
        }
    }

    pub fn badges(&self, item: &Item) -> Vec<Badge> {
        item.tags
            .iter()
            .take(MAX_BADGES)
            .map(|tag| self.badge(tag, item.accent))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles() -> TagStyles {
        serde_json::from_str(
            r#"{
                "Python": { "abbr": "Py", "color": "55, 118, 171" },
                "Slack": { "abbr": "Sl" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_known_tag() {
        let badge = styles().badge("Python", Accent::default());
        assert_eq!(badge.abbr, "Py");
        assert_eq!(badge.color, Accent::new(55, 118, 171));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let badge = styles().badge("PYTHON", Accent::default());
        assert_eq!(badge.abbr, "Py");
        assert_eq!(badge.label, "PYTHON");
    }

    #[test]
    fn test_partial_style_falls_back_to_accent() {
        let accent = Accent::new(167, 139, 250);
        let badge = styles().badge("Slack", accent);
        assert_eq!(badge.abbr, "Sl");
        assert_eq!(badge.color, accent);
    }

    #[test]
    fn test_unknown_tag() {
        let accent = Accent::new(250, 204, 21);
        let badge = styles().badge("scikit-learn", accent);
        assert_eq!(badge.abbr, "SC");
        assert_eq!(badge.label, "scikit-learn");
        assert_eq!(badge.color, accent);
    }

    #[test]
    fn test_badges_are_capped() {
        let mut item = Item::new("x", "X", "https://x.dev");
        item.tags = (0..10).map(|i| format!("t{i}")).collect();
        assert_eq!(styles().badges(&item).len(), MAX_BADGES);
    }
}
