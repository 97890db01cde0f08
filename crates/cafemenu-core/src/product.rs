use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Modifier key for alternative milk, the only modifier priced per volume.
pub const ALT_MILK: &str = "alt_milk";
pub const SAUCE: &str = "sauce";
pub const SYRUP: &str = "syrup";
pub const SUGAR: &str = "sugar";

/// Whether a product needs the full option picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Simple,
    /// Has portion sizes, so the buyer must choose one.
    Complex,
}

/// A named portion size with its own price, e.g. `("0.3 L", 900)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub label: String,
    pub price: u32,
}

/// Surcharge rule of one modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifierPrice {
    Flat(u32),
    /// One surcharge per volume position (alternative milk only).
    PerVolume(Vec<u32>),
}

impl ModifierPrice {
    /// Surcharge when the volume at `index` is selected.
    ///
    /// A per-volume sequence shorter than the volume list falls back to its
    /// first entry; an empty sequence costs nothing.
    #[must_use]
    pub fn for_volume(&self, index: usize) -> u32 {
        match self {
            Self::Flat(amount) => *amount,
            Self::PerVolume(amounts) => amounts
                .get(index)
                .or_else(|| amounts.first())
                .copied()
                .unwrap_or(0),
        }
    }
}

/// Price as shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPrice {
    Exact(u32),
    /// Cheapest portion of a product with volumes.
    From(u32),
}

impl fmt::Display for DisplayPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayPrice::Exact(price) => write!(f, "{price} ₸"),
            DisplayPrice::From(price) => write!(f, "from {price} ₸"),
        }
    }
}

/// Visual flavour of a card badge, picked from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Hot,
    New,
    Plain,
}

/// One sellable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Uppercased category label.
    pub category: String,
    pub name: String,
    pub short_description: String,
    /// Falls back to `short_description` when the feed has none.
    pub full_description: String,
    pub image: Option<String>,
    /// Ignored when the product has volumes.
    pub base_price: u32,
    pub available: bool,
    pub popular: bool,
    pub badge: Option<String>,
    pub volumes: Vec<Volume>,
    pub modifiers: BTreeMap<String, ModifierPrice>,
}

impl Product {
    #[must_use]
    pub fn has_volumes(&self) -> bool {
        !self.volumes.is_empty()
    }

    /// `true` iff the product offers alternative milk.
    #[must_use]
    pub fn has_milk(&self) -> bool {
        self.modifiers.contains_key(ALT_MILK)
    }

    #[must_use]
    pub fn kind(&self) -> ProductKind {
        if self.has_volumes() {
            ProductKind::Complex
        } else {
            ProductKind::Simple
        }
    }

    #[must_use]
    pub fn modifier(&self, key: &str) -> Option<&ModifierPrice> {
        self.modifiers.get(key)
    }

    #[must_use]
    pub fn has_modifier(&self, key: &str) -> bool {
        self.modifiers.contains_key(key)
    }

    #[must_use]
    pub fn display_price(&self) -> DisplayPrice {
        match self.volumes.first() {
            Some(volume) => DisplayPrice::From(volume.price),
            None => DisplayPrice::Exact(self.base_price),
        }
    }

    /// Badge style for available products; sold-out cards show no badge.
    #[must_use]
    pub fn badge_style(&self) -> Option<BadgeStyle> {
        if !self.available {
            return None;
        }
        let text = self.badge.as_deref()?.to_lowercase();
        let style = if text.contains("hot") || text.contains("хит") {
            BadgeStyle::Hot
        } else if text.contains("new") || text.contains("новинка") {
            BadgeStyle::New
        } else {
            BadgeStyle::Plain
        };
        Some(style)
    }

    /// A copy of this product filed under another category.
    #[must_use]
    pub fn in_category(&self, category: &str) -> Self {
        Self {
            category: category.to_owned(),
            ..self.clone()
        }
    }
}
