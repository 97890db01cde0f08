//! Menu parsing: raw feed rows to a [`Catalog`] of [`Product`]s.
//!
//! The feed is a published spreadsheet edited by hand, so parsing is
//! lenient: missing cells become defaults, prices are dug out of free text
//! by [`parse_price`], and rows without an identifier are skipped. Only a
//! feed that yields no products at all is an error.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::columns;
use crate::price::parse_price;
use crate::product::{ModifierPrice, Product, Volume, ALT_MILK};
use crate::row::Row;
use crate::settings::{is_settings_row, parse_settings, MenuSettings, PriceTable};

pub const OTHER_CATEGORY: &str = "OTHER";
pub const COLD_DRINKS_CATEGORY: &str = "COLD DRINKS";
pub const POPULAR_CATEGORY: &str = "POPULAR";

const LEMONADE_MARKERS: &[&str] = &["lemonade", "лимонад"];
const AFFIRMATIVE: &[&str] = &["true", "да"];

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("menu feed is empty")]
    EmptyFeed,

    #[error("menu feed has {rows} rows but none describe a product")]
    NoProducts { rows: usize },
}

/// Result of one feed load: the frozen settings and the catalog built with
/// them.
#[derive(Debug, Clone)]
pub struct Menu {
    pub settings: MenuSettings,
    pub catalog: Catalog,
}

/// Parses a whole feed.
///
/// Settings are read first and then used, unchanged, for every product row.
/// Popular products are duplicated into [`POPULAR_CATEGORY`]; the copies
/// come first and keep their original ids.
///
/// # Errors
///
/// - [`MenuError::EmptyFeed`] when `rows` is empty.
/// - [`MenuError::NoProducts`] when no row yields a product.
pub fn parse_menu(rows: &[Row]) -> Result<Menu, MenuError> {
    if rows.is_empty() {
        return Err(MenuError::EmptyFeed);
    }

    let settings = parse_settings(rows);
    let products: Vec<Product> = rows
        .iter()
        .filter_map(|row| parse_product(row, &settings))
        .collect();

    if products.is_empty() {
        return Err(MenuError::NoProducts { rows: rows.len() });
    }

    let popular = products
        .iter()
        .filter(|p| p.popular)
        .map(|p| p.in_category(POPULAR_CATEGORY));
    let ordered: Vec<Product> = popular.chain(products.iter().cloned()).collect();

    tracing::debug!(
        products = products.len(),
        listed = ordered.len(),
        "parsed menu feed"
    );

    Ok(Menu {
        settings,
        catalog: Catalog::from_products(ordered),
    })
}

/// Maps one feed row to a product.
///
/// Returns `None` for the settings row and rows without an identifier.
#[must_use]
pub fn parse_product(row: &Row, settings: &MenuSettings) -> Option<Product> {
    let id = row.resolve(columns::ID).trim();
    if id.is_empty() {
        tracing::debug!("skipping feed row without an id");
        return None;
    }
    if is_settings_row(row) {
        return None;
    }

    let short_description = row.resolve(columns::SHORT_DESCRIPTION).trim().to_owned();
    let full_description = match row.resolve(columns::FULL_DESCRIPTION).trim() {
        "" => short_description.clone(),
        full => full.to_owned(),
    };

    Some(Product {
        id: id.to_owned(),
        category: normalize_category(row.resolve(columns::CATEGORY)),
        name: row.resolve(columns::NAME).trim().to_uppercase(),
        short_description,
        full_description,
        image: non_empty(row.resolve(columns::IMAGE)),
        base_price: parse_price(row.resolve(columns::PRICE)),
        available: is_affirmative(row.resolve(columns::AVAILABLE)),
        popular: is_affirmative(row.resolve(columns::POPULAR)),
        badge: non_empty(row.resolve(columns::BADGE)),
        volumes: parse_volumes(row.resolve(columns::VOLUMES)),
        modifiers: parse_modifiers(row.resolve(columns::MODIFIERS), settings.prices()),
    })
}

/// Uppercases the category, defaulting blanks to [`OTHER_CATEGORY`] and
/// folding every lemonade variant into [`COLD_DRINKS_CATEGORY`].
fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return OTHER_CATEGORY.to_owned();
    }
    let lower = trimmed.to_lowercase();
    if LEMONADE_MARKERS.iter().any(|m| lower.contains(m)) {
        return COLD_DRINKS_CATEGORY.to_owned();
    }
    trimmed.to_uppercase()
}

fn is_affirmative(raw: &str) -> bool {
    let lower = raw.trim().to_lowercase();
    AFFIRMATIVE.contains(&lower.as_str())
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Parses `S=500;L=700` into ordered volumes. Cells without `=` describe no
/// volumes.
fn parse_volumes(raw: &str) -> Vec<Volume> {
    if !raw.contains('=') {
        return Vec::new();
    }
    raw.split(';')
        .filter_map(|segment| {
            let (label, price) = segment.split_once('=').unwrap_or((segment, ""));
            let label = label.trim();
            (!label.is_empty()).then(|| Volume {
                label: label.to_owned(),
                price: parse_price(price),
            })
        })
        .collect()
}

/// Parses `milk, shot=250; alt_milk=300|500` into modifier prices.
///
/// `alt_milk` with a `|` in its value becomes a per-volume sequence. A key
/// without a value takes its default from the price table.
fn parse_modifiers(raw: &str, prices: &PriceTable) -> BTreeMap<String, ModifierPrice> {
    let mut modifiers = BTreeMap::new();
    for token in raw.split([',', ';']) {
        let mut parts = token.split('=');
        let key = parts.next().unwrap_or_default().trim();
        if key.is_empty() {
            continue;
        }
        let value = parts.next().map(str::trim).filter(|v| !v.is_empty());

        let price = match value {
            Some(value) if key == ALT_MILK && value.contains('|') => {
                ModifierPrice::PerVolume(value.split('|').map(parse_price).collect())
            }
            Some(value) => ModifierPrice::Flat(parse_price(value)),
            None => ModifierPrice::Flat(prices.modifier_default(key)),
        };
        modifiers.insert(key.to_owned(), price);
    }
    modifiers
}

#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;
