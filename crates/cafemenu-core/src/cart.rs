//! The in-session shopping cart.
//!
//! Lines are copied from products when added, so later catalog reloads never
//! change what is already in the cart. Two lines are the same line iff their
//! names and option lists are equal; the cart merges such lines instead of
//! holding both.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::compute_price;
use crate::product::Product;
use crate::selection::{Selection, SelectionError};
use crate::settings::MenuSettings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("cart has no line {index} (it has {len})")]
    NoSuchLine { index: usize, len: usize },

    #[error("{0} is sold out")]
    Unavailable(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Ordered option strings of a cart line. Equality is element-wise, which
/// makes it the merge key together with the product name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartOptions(Vec<String>);

impl CartOptions {
    #[must_use]
    pub fn new(options: Vec<String>) -> Self {
        Self(options)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CartOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Wire shape of a cart line, shared by the order payload and the stored
/// last order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLineRecord {
    name: String,
    #[serde(default)]
    cat: String,
    price: u32,
    #[serde(default)]
    options: CartOptions,
    #[serde(default = "one")]
    qty: u32,
    #[serde(default)]
    price_total: u32,
}

fn one() -> u32 {
    1
}

/// One aggregated cart entry. `line_total` is kept equal to
/// `unit_price * quantity` by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CartLineRecord", into = "CartLineRecord")]
pub struct CartLine {
    name: String,
    category: String,
    unit_price: u32,
    options: CartOptions,
    quantity: u32,
    line_total: u32,
}

impl From<CartLineRecord> for CartLine {
    fn from(record: CartLineRecord) -> Self {
        let mut line = CartLine::from_parts(record.name, record.cat, record.price, record.options);
        line.set_quantity(record.qty.max(1));
        line
    }
}

impl From<CartLine> for CartLineRecord {
    fn from(line: CartLine) -> Self {
        Self {
            name: line.name,
            cat: line.category,
            price: line.unit_price,
            options: line.options,
            qty: line.quantity,
            price_total: line.line_total,
        }
    }
}

impl CartLine {
    /// A quantity-one line with an already resolved unit price.
    #[must_use]
    pub fn from_parts(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: u32,
        options: CartOptions,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            unit_price,
            options,
            quantity: 1,
            line_total: unit_price,
        }
    }

    /// Prices `product` under `selection` and builds its line.
    ///
    /// # Errors
    ///
    /// - [`CartError::Unavailable`] when the product is sold out.
    /// - [`CartError::Selection`] when the selection does not fit the product.
    pub fn new(
        product: &Product,
        selection: &Selection,
        settings: &MenuSettings,
    ) -> Result<Self, CartError> {
        if !product.available {
            return Err(CartError::Unavailable(product.name.clone()));
        }
        selection.validate(product, settings)?;
        Ok(Self::from_parts(
            product.name.clone(),
            product.category.clone(),
            compute_price(product, selection, settings),
            selection.option_labels(product),
        ))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn unit_price(&self) -> u32 {
        self.unit_price
    }

    #[must_use]
    pub fn options(&self) -> &CartOptions {
        &self.options
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn line_total(&self) -> u32 {
        self.line_total
    }

    fn same_line(&self, other: &CartLine) -> bool {
        self.name == other.name && self.options == other.options
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.line_total = self.unit_price.saturating_mul(quantity);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `line`, merging with an equal line when present.
    /// Returns the index of the affected line.
    pub fn add(&mut self, line: CartLine) -> usize {
        self.add_quantity(line, 1)
    }

    fn add_quantity(&mut self, line: CartLine, quantity: u32) -> usize {
        if let Some(index) = self.lines.iter().position(|l| l.same_line(&line)) {
            let existing = &mut self.lines[index];
            existing.set_quantity(existing.quantity.saturating_add(quantity));
            return index;
        }
        let mut line = line;
        line.set_quantity(quantity);
        self.lines.push(line);
        self.lines.len() - 1
    }

    /// # Errors
    ///
    /// [`CartError::NoSuchLine`] when `index` is out of range.
    pub fn increment(&mut self, index: usize) -> Result<(), CartError> {
        let line = self.line_mut(index)?;
        line.set_quantity(line.quantity.saturating_add(1));
        Ok(())
    }

    /// Takes one unit off the line, removing it when it was the last one.
    /// Returns `true` when the line was removed.
    ///
    /// # Errors
    ///
    /// [`CartError::NoSuchLine`] when `index` is out of range.
    pub fn decrement(&mut self, index: usize) -> Result<bool, CartError> {
        let line = self.line_mut(index)?;
        if line.quantity > 1 {
            line.set_quantity(line.quantity - 1);
            return Ok(false);
        }
        self.lines.remove(index);
        Ok(true)
    }

    /// # Errors
    ///
    /// [`CartError::NoSuchLine`] when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        self.line_mut(index)?;
        Ok(self.lines.remove(index))
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut CartLine, CartError> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(CartError::NoSuchLine { index, len })
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |sum, line| sum.saturating_add(line.line_total))
    }

    /// Units in the cart, as opposed to [`Self::len`] which counts lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |sum, line| sum.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// Re-adds a stored snapshot with each line's quantity, merging into
    /// equal lines already in the cart.
    pub fn restore(&mut self, snapshot: &[CartLine]) {
        for line in snapshot {
            self.add_quantity(line.clone(), line.quantity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn espresso(options: &[&str]) -> CartLine {
        CartLine::from_parts(
            "ESPRESSO",
            "COFFEE",
            400,
            CartOptions::new(options.iter().map(|s| (*s).to_owned()).collect()),
        )
    }

    #[test]
    fn same_name_and_options_merge() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(espresso(&["Portion: S"])), 0);
        assert_eq!(cart.add(espresso(&["Portion: S"])), 0);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 2);
        assert_eq!(cart.lines()[0].line_total(), 800);
    }

    #[test]
    fn option_order_matters_for_merging() {
        let mut cart = Cart::new();
        cart.add(espresso(&["Extra: Honey", "Syrup: Nut"]));
        cart.add(espresso(&["Syrup: Nut", "Extra: Honey"]));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn increment_keeps_total_consistent() {
        let mut cart = Cart::new();
        cart.add(espresso(&[]));
        cart.increment(0).unwrap();
        cart.increment(0).unwrap();
        let line = &cart.lines()[0];
        assert_eq!(line.line_total(), line.unit_price() * line.quantity());
        assert_eq!(cart.total(), 1200);
    }

    #[test]
    fn decrement_of_single_unit_removes_line() {
        let mut cart = Cart::new();
        cart.add(espresso(&["Portion: S"]));
        cart.add(CartLine::from_parts("CROISSANT", "CROISSANTS", 650, CartOptions::default()));
        cart.add(CartLine::from_parts("CROISSANT", "CROISSANTS", 650, CartOptions::default()));

        assert!(cart.decrement(0).unwrap());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), 1300);

        assert!(!cart.decrement(0).unwrap());
        assert_eq!(cart.total(), 650);
    }

    #[test]
    fn index_operations_reject_missing_lines() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.increment(0),
            Err(CartError::NoSuchLine { index: 0, len: 0 })
        );
        cart.add(espresso(&[]));
        assert_eq!(
            cart.remove(3),
            Err(CartError::NoSuchLine { index: 3, len: 1 })
        );
        assert!(cart.remove(0).is_ok());
        assert!(cart.is_empty());
    }

    #[test]
    fn restore_keeps_quantities_and_merges() {
        let mut previous = Cart::new();
        previous.add(espresso(&[]));
        previous.add(espresso(&[]));
        previous.add(CartLine::from_parts("TEA", "TEA", 300, CartOptions::default()));

        let mut cart = Cart::new();
        cart.add(espresso(&[]));
        cart.restore(&previous.snapshot());

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].quantity(), 3);
        assert_eq!(cart.total(), 1200 + 300);
    }

    #[test]
    fn line_serializes_to_order_shape() {
        let mut cart = Cart::new();
        cart.add(espresso(&["Portion: S"]));
        cart.increment(0).unwrap();
        let json = serde_json::to_value(&cart.lines()[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "ESPRESSO",
                "cat": "COFFEE",
                "price": 400,
                "options": ["Portion: S"],
                "qty": 2,
                "priceTotal": 800
            })
        );
    }

    #[test]
    fn stored_line_total_is_recomputed_on_load() {
        let line: CartLine = serde_json::from_str(
            r#"{"name":"TEA","cat":"TEA","price":300,"options":[],"qty":3,"priceTotal":1}"#,
        )
        .unwrap();
        assert_eq!(line.line_total(), 900);

        let legacy: CartLine = serde_json::from_str(r#"{"name":"TEA","price":300}"#).unwrap();
        assert_eq!(legacy.quantity(), 1);
    }

    #[test]
    fn unavailable_product_cannot_be_added() {
        let product = crate::product::Product {
            id: "1".to_owned(),
            category: "COFFEE".to_owned(),
            name: "RAF".to_owned(),
            short_description: String::new(),
            full_description: String::new(),
            image: None,
            base_price: 900,
            available: false,
            popular: false,
            badge: None,
            volumes: Vec::new(),
            modifiers: std::collections::BTreeMap::new(),
        };
        let err = CartLine::new(&product, &Selection::new(), &MenuSettings::default()).unwrap_err();
        assert_eq!(err, CartError::Unavailable("RAF".to_owned()));
    }
}
