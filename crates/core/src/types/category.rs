//! Catalog product categories.

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A product category as named by the catalog feed.
///
/// The feed uses free-form lowercase names. The four categories the demo
/// catalog ships with get their own variants; anything else is carried
/// through untouched as [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Electronics,
    /// Spelled the way the catalog spells it.
    Jewelery,
    MensClothing,
    WomensClothing,
    Other(String),
}

impl Category {
    /// The categories the demo catalog is known to serve, in display order.
    pub const KNOWN: [Self; 4] = [
        Self::Electronics,
        Self::Jewelery,
        Self::MensClothing,
        Self::WomensClothing,
    ];

    /// The catalog's name for this category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Electronics => "electronics",
            Self::Jewelery => "jewelery",
            Self::MensClothing => "men's clothing",
            Self::WomensClothing => "women's clothing",
            Self::Other(name) => name,
        }
    }

    /// Category name with the first letter capitalized, for menus.
    #[must_use]
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        let trimmed = name.trim();
        match trimmed.to_lowercase().as_str() {
            "electronics" => Self::Electronics,
            "jewelery" => Self::Jewelery,
            "men's clothing" => Self::MensClothing,
            "women's clothing" => Self::WomensClothing,
            // Case is kept: the feed matches category paths exactly.
            _ => Self::Other(trimmed.to_owned()),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}
