//! Unit price of a product under a [`Selection`].

use crate::product::{Product, ALT_MILK, SAUCE, SYRUP};
use crate::selection::{MilkChoice, Selection};
use crate::settings::MenuSettings;

/// Resolves the price of one unit.
///
/// Starts from the selected portion (or the base price for products without
/// portions) and adds:
/// - the alternative milk surcharge, per portion when priced that way;
/// - the lactose-free surcharge from `settings`, on milk products only;
/// - each toggled add-on the product actually offers;
/// - the flat sauce and syrup surcharges when one is picked.
///
/// Out-of-range portion indexes fall back to the first portion. Sugar is
/// free. Arithmetic saturates, so the result is never below zero or
/// wrapped.
#[must_use]
pub fn compute_price(product: &Product, selection: &Selection, settings: &MenuSettings) -> u32 {
    let volume = selection.effective_volume(product);
    let mut price = product
        .volumes
        .get(volume)
        .map_or(product.base_price, |v| v.price);

    let surcharge = |key: &str| product.modifier(key).map_or(0, |m| m.for_volume(volume));

    match &selection.milk {
        MilkChoice::Alternative(_) if product.has_milk() => {
            price = price.saturating_add(surcharge(ALT_MILK));
        }
        MilkChoice::LactoseFree if product.has_milk() => {
            price = price.saturating_add(settings.lactose_free_surcharge());
        }
        _ => {}
    }

    for add_on in &selection.add_ons {
        price = price.saturating_add(surcharge(add_on.key()));
    }

    if selection.sauce.is_some() {
        price = price.saturating_add(surcharge(SAUCE));
    }
    if selection.syrup.is_some() {
        price = price.saturating_add(surcharge(SYRUP));
    }

    price
}
