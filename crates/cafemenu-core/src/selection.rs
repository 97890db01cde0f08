//! The buyer's choices for one product, independent of any UI.

use std::collections::BTreeSet;
use std::str::FromStr;

use thiserror::Error;

use crate::cart::CartOptions;
use crate::product::{Product, SAUCE, SUGAR, SYRUP};
use crate::settings::{MenuSettings, NONE_OPTION};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("portion {index} does not exist, the product has {count} portions")]
    VolumeOutOfRange { index: usize, count: usize },

    #[error("this product is not offered with a milk choice")]
    MilkNotOffered,

    #[error("unknown alternative milk: {0}")]
    UnknownAltMilk(String),

    #[error("sauce {0} is not offered for this product")]
    SauceNotOffered(String),

    #[error("syrup {0} is not offered for this product")]
    SyrupNotOffered(String),

    #[error("unknown add-on: {0}")]
    UnknownAddOn(String),
}

/// On/off extras, each priced by the product modifier of the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddOn {
    Milk,
    Cream,
    Honey,
    Lemon,
    Cinnamon,
    Shot,
    Egg,
    Cheese,
    Jalapeno,
    Onion,
}

impl AddOn {
    /// Every add-on in the order options are listed on a cart line.
    pub const ALL: [AddOn; 10] = [
        AddOn::Milk,
        AddOn::Cream,
        AddOn::Honey,
        AddOn::Lemon,
        AddOn::Cinnamon,
        AddOn::Shot,
        AddOn::Egg,
        AddOn::Cheese,
        AddOn::Jalapeno,
        AddOn::Onion,
    ];

    /// Modifier key in the feed.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            AddOn::Milk => "milk",
            AddOn::Cream => "cream",
            AddOn::Honey => "honey",
            AddOn::Lemon => "lemon",
            AddOn::Cinnamon => "cinnamon",
            AddOn::Shot => "shot",
            AddOn::Egg => "egg",
            AddOn::Cheese => "cheese",
            AddOn::Jalapeno => "jalapeno",
            AddOn::Onion => "onion",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AddOn::Milk => "Extra milk",
            AddOn::Cream => "Extra cream",
            AddOn::Honey => "Honey",
            AddOn::Lemon => "Lemon",
            AddOn::Cinnamon => "Cinnamon",
            AddOn::Shot => "Extra shot",
            AddOn::Egg => "Extra egg",
            AddOn::Cheese => "Cheese",
            AddOn::Jalapeno => "Jalapeno",
            AddOn::Onion => "Fried onion",
        }
    }
}

impl std::fmt::Display for AddOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AddOn {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AddOn::ALL
            .into_iter()
            .find(|add_on| add_on.key() == wanted)
            .ok_or_else(|| SelectionError::UnknownAddOn(s.to_owned()))
    }
}

/// Milk tier of a milk drink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MilkChoice {
    #[default]
    Standard,
    LactoseFree,
    /// Plant milk, by its configured name.
    Alternative(String),
}

/// Everything the buyer picked for one unit of a product.
///
/// Built with the `with_*` methods, checked against a product with
/// [`Selection::validate`] and priced by [`crate::compute_price`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub volume_index: usize,
    pub milk: MilkChoice,
    pub add_ons: BTreeSet<AddOn>,
    /// `None` when no sauce was picked.
    pub sauce: Option<String>,
    pub syrup: Option<String>,
    /// Spoonfuls of sugar; free.
    pub sugar: u32,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_volume(mut self, index: usize) -> Self {
        self.volume_index = index;
        self
    }

    #[must_use]
    pub fn with_milk(mut self, milk: MilkChoice) -> Self {
        self.milk = milk;
        self
    }

    #[must_use]
    pub fn with_add_on(mut self, add_on: AddOn) -> Self {
        self.add_ons.insert(add_on);
        self
    }

    /// Picks a sauce; [`NONE_OPTION`] clears it.
    #[must_use]
    pub fn with_sauce(mut self, sauce: impl Into<String>) -> Self {
        self.sauce = named_choice(sauce.into());
        self
    }

    /// Picks a syrup; [`NONE_OPTION`] clears it.
    #[must_use]
    pub fn with_syrup(mut self, syrup: impl Into<String>) -> Self {
        self.syrup = named_choice(syrup.into());
        self
    }

    #[must_use]
    pub fn with_sugar(mut self, sugar: u32) -> Self {
        self.sugar = sugar;
        self
    }

    /// Checks that every choice is one the product and settings offer.
    ///
    /// Add-ons the product lacks are not an error; they are simply neither
    /// priced nor listed.
    ///
    /// # Errors
    ///
    /// Returns the first [`SelectionError`] found.
    pub fn validate(&self, product: &Product, settings: &MenuSettings) -> Result<(), SelectionError> {
        if product.has_volumes() && self.volume_index >= product.volumes.len() {
            return Err(SelectionError::VolumeOutOfRange {
                index: self.volume_index,
                count: product.volumes.len(),
            });
        }

        match &self.milk {
            MilkChoice::Standard => {}
            _ if !product.has_milk() => return Err(SelectionError::MilkNotOffered),
            MilkChoice::LactoseFree => {}
            MilkChoice::Alternative(kind) => {
                if !settings.alt_milks().contains(kind) {
                    return Err(SelectionError::UnknownAltMilk(kind.clone()));
                }
            }
        }

        if let Some(sauce) = &self.sauce {
            if !product.has_modifier(SAUCE) || !settings.sauces().contains(sauce) {
                return Err(SelectionError::SauceNotOffered(sauce.clone()));
            }
        }
        if let Some(syrup) = &self.syrup {
            if !product.has_modifier(SYRUP) || !settings.syrups().contains(syrup) {
                return Err(SelectionError::SyrupNotOffered(syrup.clone()));
            }
        }
        Ok(())
    }

    /// Volume position actually used for pricing: out-of-range indexes fall
    /// back to the first portion.
    #[must_use]
    pub fn effective_volume(&self, product: &Product) -> usize {
        if self.volume_index < product.volumes.len() {
            self.volume_index
        } else {
            0
        }
    }

    /// Human-readable option list of a cart line, in a fixed order so equal
    /// selections always produce equal options.
    #[must_use]
    pub fn option_labels(&self, product: &Product) -> CartOptions {
        let mut labels = Vec::new();

        if let Some(volume) = product.volumes.get(self.effective_volume(product)) {
            labels.push(format!("Portion: {}", volume.label));
        }

        if product.has_milk() {
            match &self.milk {
                MilkChoice::Standard => {}
                MilkChoice::LactoseFree => labels.push("Milk: Lactose-free".to_owned()),
                MilkChoice::Alternative(kind) => labels.push(format!("Milk: Alt ({kind})")),
            }
        }

        labels.extend(
            AddOn::ALL
                .into_iter()
                .filter(|a| self.add_ons.contains(a) && product.has_modifier(a.key()))
                .map(|a| format!("Extra: {}", a.label())),
        );

        if let Some(sauce) = self.sauce.as_ref().filter(|_| product.has_modifier(SAUCE)) {
            labels.push(format!("Sauce: {sauce}"));
        }
        if self.sugar > 0 && product.has_modifier(SUGAR) {
            labels.push(format!("Sugar: {}", self.sugar));
        }
        if let Some(syrup) = self.syrup.as_ref().filter(|_| product.has_modifier(SYRUP)) {
            labels.push(format!("Syrup: {syrup}"));
        }

        CartOptions::new(labels)
    }
}

fn named_choice(name: String) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == NONE_OPTION {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
