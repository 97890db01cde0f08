//! Global menu settings read from the `SETTINGS` row of the feed.
//!
//! The settings row's description cell is a `;`-separated list of
//! `key=value` pairs that override the built-in defaults: surcharge prices,
//! the syrup/sauce/alternative-milk option lists, the promo toggle and the
//! opening hours. [`parse_settings`] produces a [`MenuSettings`] once per
//! feed load; afterwards it is only ever read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::price::parse_price;
use crate::row::Row;

/// Free "nothing selected" entry that heads the syrup and sauce lists.
pub const NONE_OPTION: &str = "None";

/// Price table entry for the lactose-free milk surcharge.
pub const LACTOSE_FREE_PRICE: &str = "milk_lf_price";

const DEFAULT_PRICES: &[(&str, u32)] = &[
    ("alt_milk", 400),
    ("add_milk", 50),
    ("add_cream", 50),
    ("add_honey", 100),
    ("add_lemon", 50),
    ("syrup", 0),
    ("shot", 300),
    ("hd_cheese", 150),
    ("hd_jalapeno", 150),
    ("hd_onion", 150),
    ("egg", 70),
    ("sauce", 150),
    ("sauce_paid", 150),
    ("breakfast_add_egg", 70),
    ("cinnamon", 0),
    (LACTOSE_FREE_PRICE, 0),
];

/// Price table entry used when a modifier is listed without an explicit
/// price. Keys not listed here fall back to `<key>`, then `add_<key>`.
const MODIFIER_DEFAULTS: &[(&str, &str)] = &[
    ("milk", "add_milk"),
    ("cream", "add_cream"),
    ("honey", "add_honey"),
    ("lemon", "add_lemon"),
    ("shot", "shot"),
    ("syrup", "syrup"),
    ("sauce", "sauce_paid"),
    ("egg", "breakfast_add_egg"),
    ("cinnamon", "cinnamon"),
    ("alt_milk", "alt_milk"),
];

const DEFAULT_SYRUPS: &[&str] = &["Caramel", "Vanilla", "Nut"];
const DEFAULT_SAUCES: &[&str] = &["Ketchup"];
const DEFAULT_ALT_MILKS: &[&str] = &["Coconut"];
const DEFAULT_OPEN_HOUR: u32 = 9;
const DEFAULT_CLOSE_HOUR: u32 = 23;

/// Named surcharge prices, in tenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable(BTreeMap<String, u32>);

impl Default for PriceTable {
    fn default() -> Self {
        Self(
            DEFAULT_PRICES
                .iter()
                .map(|(name, price)| ((*name).to_owned(), *price))
                .collect(),
        )
    }
}

impl PriceTable {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    fn set(&mut self, name: &str, price: u32) {
        self.0.insert(name.to_owned(), price);
    }

    /// Price of a modifier listed in the feed without an explicit value.
    ///
    /// Unknown keys with no matching entry resolve to `0`.
    #[must_use]
    pub fn modifier_default(&self, key: &str) -> u32 {
        match MODIFIER_DEFAULTS.iter().find(|(k, _)| *k == key) {
            Some((_, name)) => self.get(name).unwrap_or(0),
            None => self
                .get(key)
                .or_else(|| self.get(&format!("add_{key}")))
                .unwrap_or(0),
        }
    }
}

/// Immutable global configuration for one catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSettings {
    prices: PriceTable,
    syrups: Vec<String>,
    sauces: Vec<String>,
    alt_milks: Vec<String>,
    promos_enabled: bool,
    open_hour: u32,
    close_hour: u32,
}

impl Default for MenuSettings {
    fn default() -> Self {
        let mut settings = Self {
            prices: PriceTable::default(),
            syrups: to_owned_list(DEFAULT_SYRUPS),
            sauces: to_owned_list(DEFAULT_SAUCES),
            alt_milks: to_owned_list(DEFAULT_ALT_MILKS),
            promos_enabled: true,
            open_hour: DEFAULT_OPEN_HOUR,
            close_hour: DEFAULT_CLOSE_HOUR,
        };
        settings.ensure_none_options();
        settings
    }
}

impl MenuSettings {
    /// Applies a settings description (`key=value;key=value`) on top of the
    /// defaults.
    #[must_use]
    pub fn from_description(description: &str) -> Self {
        let mut settings = Self::default();
        for pair in description.split(';') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                continue;
            }
            settings.apply(key, value);
        }
        settings.ensure_none_options();
        settings
    }

    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "alt_milks" => self.alt_milks = split_list(value),
            "syrup_names" => self.syrups = split_list(value),
            "sauce_names" => self.sauces = split_list(value),
            "enable_promos" => self.promos_enabled = value.eq_ignore_ascii_case("true"),
            "open_time" => set_hour(&mut self.open_hour, key, value),
            "close_time" => set_hour(&mut self.close_hour, key, value),
            _ => {
                if let Some(name) = key.strip_prefix("price_") {
                    self.prices.set(name, parse_price(value));
                } else if key.starts_with("hd_") || key == "br_egg" {
                    self.prices.set(key, parse_price(value));
                } else {
                    tracing::debug!(key, "ignoring unknown settings key");
                }
            }
        }
    }

    fn ensure_none_options(&mut self) {
        for list in [&mut self.syrups, &mut self.sauces] {
            if list.first().map(String::as_str) != Some(NONE_OPTION) {
                list.insert(0, NONE_OPTION.to_owned());
            }
        }
    }

    #[must_use]
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Named price, `0` when the table has no such entry.
    #[must_use]
    pub fn price(&self, name: &str) -> u32 {
        self.prices.get(name).unwrap_or(0)
    }

    #[must_use]
    pub fn lactose_free_surcharge(&self) -> u32 {
        self.price(LACTOSE_FREE_PRICE)
    }

    /// Syrup choices, always headed by [`NONE_OPTION`].
    #[must_use]
    pub fn syrups(&self) -> &[String] {
        &self.syrups
    }

    /// Sauce choices, always headed by [`NONE_OPTION`].
    #[must_use]
    pub fn sauces(&self) -> &[String] {
        &self.sauces
    }

    #[must_use]
    pub fn alt_milks(&self) -> &[String] {
        &self.alt_milks
    }

    #[must_use]
    pub fn promos_enabled(&self) -> bool {
        self.promos_enabled
    }

    #[must_use]
    pub fn open_hour(&self) -> u32 {
        self.open_hour
    }

    #[must_use]
    pub fn close_hour(&self) -> u32 {
        self.close_hour
    }

    /// Whether the shop takes orders during `hour` (local, 0-23).
    #[must_use]
    pub fn is_open(&self, hour: u32) -> bool {
        hour >= self.open_hour && hour < self.close_hour
    }

    /// `"09:00 - 23:00"`.
    #[must_use]
    pub fn hours_label(&self) -> String {
        format!("{:02}:00 - {:02}:00", self.open_hour, self.close_hour)
    }
}

/// Pizza is only baked from 11:00.
#[must_use]
pub fn is_pizza_time(hour: u32) -> bool {
    hour >= 11
}

/// Finds the `SETTINGS` row and builds the settings from it, or returns the
/// defaults when the feed has no such row.
#[must_use]
pub fn parse_settings(rows: &[Row]) -> MenuSettings {
    rows.iter()
        .find(|row| is_settings_row(row))
        .map_or_else(MenuSettings::default, |row| {
            MenuSettings::from_description(row.resolve(columns::SETTINGS_DESCRIPTION))
        })
}

pub(crate) fn is_settings_row(row: &Row) -> bool {
    row.resolve(columns::ID)
        .trim()
        .eq_ignore_ascii_case(columns::SETTINGS_ID)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn set_hour(target: &mut u32, key: &str, value: &str) {
    let hour = value
        .split(':')
        .next()
        .and_then(|h| h.trim().parse::<u32>().ok())
        .filter(|h| *h <= 24);
    match hour {
        Some(hour) => *target = hour,
        None => tracing::warn!(key, value, "ignoring malformed hour in settings"),
    }
}
