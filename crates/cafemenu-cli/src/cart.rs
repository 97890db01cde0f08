//! Cart and repeat-order command handlers.

use anyhow::Context;
use cafemenu_core::{Cart, Checkout, ClientStorage, KeyValueStore, RepeatOrder};
use clap::Subcommand;

use crate::session::Session;

/// Sub-commands available under `cart`. Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartCommands {
    /// List the cart lines and totals
    Show,
    /// Add one more of a line
    Inc { line: usize },
    /// Take one off a line, dropping it at zero
    Dec { line: usize },
    /// Drop a line
    Remove { line: usize },
    /// Empty the cart and forget the promo code
    Clear,
}

fn line_index(line: usize) -> anyhow::Result<usize> {
    line.checked_sub(1)
        .context("line numbers start at 1")
}

pub(crate) fn print_cart(cart: &Cart, checkout: &Checkout) {
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }

    for (index, line) in cart.lines().iter().enumerate() {
        println!(
            "{:>3}. {} x{}  {} ₸",
            index + 1,
            line.name(),
            line.quantity(),
            line.line_total()
        );
        if !line.options().is_empty() {
            println!("     {}", line.options());
        }
    }

    println!("items: {}", cart.item_count());
    if let Some(code) = checkout.promo_code() {
        println!(
            "promo {code}: -{}% (-{} ₸)",
            checkout.discount_percent(),
            checkout.discount_amount(cart)
        );
    }
    println!("total: {} ₸", checkout.total(cart));
}

/// Runs a cart sub-command against the stored session.
///
/// # Errors
///
/// Returns an error for a line number outside the cart or when the session
/// cannot be saved.
pub(crate) fn run_cart<S: KeyValueStore>(
    storage: &mut ClientStorage<S>,
    command: CartCommands,
) -> anyhow::Result<()> {
    let mut session = Session::load(storage);

    match command {
        CartCommands::Show => {
            print_cart(&session.cart, &session.checkout);
            return Ok(());
        }
        CartCommands::Inc { line } => session.cart.increment(line_index(line)?)?,
        CartCommands::Dec { line } => {
            if session.cart.decrement(line_index(line)?)? {
                println!("line {line} removed");
            }
        }
        CartCommands::Remove { line } => {
            let removed = session.cart.remove(line_index(line)?)?;
            println!("removed {}", removed.name());
        }
        CartCommands::Clear => {
            session.cart.clear();
            session.checkout.reset();
        }
    }

    session.save(storage)?;
    print_cart(&session.cart, &session.checkout);
    Ok(())
}

/// Shows the last submitted order, or copies it into the cart with `apply`.
///
/// # Errors
///
/// Returns an error when the session cannot be saved.
pub(crate) fn run_repeat<S: KeyValueStore>(
    storage: &mut ClientStorage<S>,
    apply: bool,
) -> anyhow::Result<()> {
    let Some(snapshot) = storage.last_order() else {
        println!("no previous order");
        return Ok(());
    };
    let Some(repeat) = RepeatOrder::summary(&snapshot) else {
        println!("no previous order");
        return Ok(());
    };

    if !apply {
        println!("last order: {} ({} ₸)", repeat.summary, repeat.total);
        println!("run `cafemenu repeat --apply` to order it again");
        return Ok(());
    }

    let mut session = Session::load(storage);
    session.cart.restore(&snapshot);
    session.save(storage)?;
    tracing::info!(lines = snapshot.len(), "last order restored to cart");
    print_cart(&session.cart, &session.checkout);
    Ok(())
}

#[cfg(test)]
mod tests {
    use cafemenu_core::{CartLine, CartOptions, MemoryStore};

    use super::*;

    fn storage_with_cart() -> ClientStorage<MemoryStore> {
        let mut storage = ClientStorage::new(MemoryStore::new());
        let mut session = Session::default();
        session
            .cart
            .add(CartLine::from_parts("LATTE", "COFFEE", 900, CartOptions::default()));
        session.save(&mut storage).unwrap();
        storage
    }

    #[test]
    fn inc_and_dec_use_one_based_lines() {
        let mut storage = storage_with_cart();

        run_cart(&mut storage, CartCommands::Inc { line: 1 }).unwrap();
        assert_eq!(Session::load(&storage).cart.item_count(), 2);

        run_cart(&mut storage, CartCommands::Dec { line: 1 }).unwrap();
        run_cart(&mut storage, CartCommands::Dec { line: 1 }).unwrap();
        assert!(Session::load(&storage).cart.is_empty());
    }

    #[test]
    fn line_zero_is_rejected() {
        let mut storage = storage_with_cart();
        assert!(run_cart(&mut storage, CartCommands::Remove { line: 0 }).is_err());
        assert!(run_cart(&mut storage, CartCommands::Remove { line: 2 }).is_err());
        assert_eq!(Session::load(&storage).cart.len(), 1);
    }

    #[test]
    fn repeat_apply_restores_last_order() {
        let mut storage = ClientStorage::new(MemoryStore::new());
        let lines = vec![CartLine::from_parts("MOJITO", "COLD DRINKS", 1200, CartOptions::default())];
        storage.save_last_order(&lines).unwrap();

        run_repeat(&mut storage, false).unwrap();
        assert!(Session::load(&storage).cart.is_empty());

        run_repeat(&mut storage, true).unwrap();
        let cart = Session::load(&storage).cart;
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), 1200);
    }
}
