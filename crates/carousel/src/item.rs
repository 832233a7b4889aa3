use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemUrl(String);

crate::impl_string_newtype!(ItemUrl);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ItemError {
    #[error("No items to show")]
    Empty,
    #[error("Duplicate item id '{0}'")]
    DuplicateId(ItemId),
    #[error("Item '{0}' has no url")]
    MissingUrl(ItemId),
    #[error("Invalid accent color '{0}'")]
    InvalidAccent(String),
}

/// Accent color of a card. Accepts `"250, 204, 21"`, `"250 204 21"` or a hex code.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct Accent(Srgb<u8>);

impl Accent {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn components(&self) -> (u8, u8, u8) {
        (self.0.red, self.0.green, self.0.blue)
    }

    pub fn to_srgba(self, alpha: f64) -> Srgba<f64> {
        let rgb = self.0.into_format::<f64>();
        Srgba::new(rgb.red, rgb.green, rgb.blue, alpha)
    }
}

impl Default for Accent {
    fn default() -> Self {
        Self::new(59, 130, 246)
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.components();
        write!(f, "{}, {}, {}", r, g, b)
    }
}

impl FromStr for Accent {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ItemError::InvalidAccent(s.to_string());

        if trimmed.starts_with('#') {
            return trimmed.parse::<Srgb<u8>>().map(Self).map_err(|_| invalid());
        }

        let parts = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(str::parse::<u8>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match parts[..] {
            [r, g, b] => Ok(Self::new(r, g, b)),
            _ => Err(invalid()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    /// Short label under the title, usually a date or year.
    #[serde(default, alias = "year", alias = "date")]
    pub meta: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    pub url: ItemUrl,
    #[serde(default, alias = "stack")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub accent: Accent,
    #[serde(default, alias = "thumb")]
    pub thumbnail: Option<PathBuf>,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            title: title.into(),
            meta: String::new(),
            description: String::new(),
            bullets: Vec::new(),
            url: ItemUrl::new(url),
            tags: Vec::new(),
            accent: Accent::default(),
            thumbnail: None,
        }
    }
}

/// Checks the invariants a carousel relies on: at least one item, unique ids, a url on every item.
pub fn validate(items: &[Item]) -> Result<(), ItemError> {
    if items.is_empty() {
        return Err(ItemError::Empty);
    }

    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(&item.id) {
            return Err(ItemError::DuplicateId(item.id.clone()));
        }
        if item.url.trim().is_empty() {
            return Err(ItemError::MissingUrl(item.id.clone()));
        }
    }
    Ok(())
}
