//! Menu browsing, pricing and adding products to the cart.

use anyhow::Context;
use cafemenu_core::{
    compute_price, AddOn, BadgeStyle, CartLine, ClientStorage, KeyValueStore, Menu, MilkChoice,
    Product, Selection,
};
use clap::{Args, ValueEnum};
use rand::seq::IndexedRandom;

use crate::session::Session;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum MilkArg {
    #[default]
    Standard,
    /// Lactose-free
    Lf,
    /// Plant milk, see --alt-milk
    Alt,
}

/// Product and the options picked for it.
#[derive(Debug, Args)]
pub(crate) struct SelectionArgs {
    /// Product id
    pub id: String,
    /// Portion number as listed by `menu`, starting at 1
    #[arg(long, default_value_t = 1)]
    pub volume: usize,
    #[arg(long, value_enum, default_value_t = MilkArg::Standard)]
    pub milk: MilkArg,
    /// Plant milk name (defaults to the first one offered)
    #[arg(long)]
    pub alt_milk: Option<String>,
    /// Add-on key, repeatable (milk, cream, honey, lemon, cinnamon, shot, egg, cheese, jalapeno, onion)
    #[arg(long = "add")]
    pub add_ons: Vec<AddOn>,
    #[arg(long)]
    pub sauce: Option<String>,
    #[arg(long)]
    pub syrup: Option<String>,
    /// Spoons of sugar
    #[arg(long, default_value_t = 0)]
    pub sugar: u32,
}

impl SelectionArgs {
    /// Turns the flags into a [`Selection`] against the menu's configured
    /// milk names.
    pub fn selection(&self, menu: &Menu) -> Selection {
        let milk = match self.milk {
            MilkArg::Standard => MilkChoice::Standard,
            MilkArg::Lf => MilkChoice::LactoseFree,
            MilkArg::Alt => MilkChoice::Alternative(
                self.alt_milk
                    .clone()
                    .or_else(|| menu.settings.alt_milks().first().cloned())
                    .unwrap_or_default(),
            ),
        };

        let mut selection = Selection::new()
            .with_volume(self.volume.saturating_sub(1))
            .with_milk(milk)
            .with_sugar(self.sugar);
        for add_on in &self.add_ons {
            selection = selection.with_add_on(*add_on);
        }
        if let Some(sauce) = &self.sauce {
            selection = selection.with_sauce(sauce.as_str());
        }
        if let Some(syrup) = &self.syrup {
            selection = selection.with_syrup(syrup.as_str());
        }
        selection
    }
}

fn find_product<'a>(menu: &'a Menu, id: &str) -> anyhow::Result<&'a Product> {
    menu.catalog
        .find(id)
        .with_context(|| format!("no product with id {id}"))
}

fn badge_text(product: &Product) -> String {
    let Some(style) = product.badge_style() else {
        return String::new();
    };
    let text = product.badge.as_deref().unwrap_or_default();
    match style {
        BadgeStyle::Hot => format!(" [{text}!]"),
        BadgeStyle::New => format!(" [{text}*]"),
        BadgeStyle::Plain => format!(" [{text}]"),
    }
}

fn print_product(product: &Product, favorites: &[String]) {
    let star = if favorites.contains(&product.id) { "♥ " } else { "" };
    let price = if product.available {
        product.display_price().to_string()
    } else {
        "sold out".to_owned()
    };
    println!(
        "  {:<6}{star}{}{}  {price}",
        product.id,
        product.name,
        badge_text(product)
    );
    if !product.short_description.is_empty() {
        println!("        {}", product.short_description);
    }
    for (index, volume) in product.volumes.iter().enumerate() {
        println!("        {}. {}  {} ₸", index + 1, volume.label, volume.price);
    }
}

/// Prints the menu grouped by category, favorites first.
pub(crate) fn run_menu<S: KeyValueStore>(
    menu: &Menu,
    storage: &ClientStorage<S>,
    search: Option<&str>,
    category: Option<&str>,
) {
    let favorites = storage.favorites();

    if let Some(query) = search.filter(|q| !q.trim().is_empty()) {
        let found = menu.catalog.search(query);
        if found.is_empty() {
            println!("nothing matches \"{query}\"");
        }
        for product in found {
            print_product(product, &favorites);
        }
        return;
    }

    let products = menu.catalog.display_products(&favorites);
    let wanted = category.map(str::to_uppercase);
    for name in menu.catalog.categories(&favorites) {
        if wanted.as_ref().is_some_and(|w| *w != name) {
            continue;
        }
        println!("{name}");
        for product in products.iter().filter(|p| p.category == name) {
            print_product(product, &favorites);
        }
        println!();
    }

    println!("Open {}", menu.settings.hours_label());
}

/// Prints the price of a product with the given options.
///
/// # Errors
///
/// Returns an error for an unknown product or options it does not offer.
pub(crate) fn run_price(menu: &Menu, args: &SelectionArgs) -> anyhow::Result<()> {
    let product = find_product(menu, &args.id)?;
    let selection = args.selection(menu);
    selection.validate(product, &menu.settings)?;

    let options = selection.option_labels(product);
    let price = compute_price(product, &selection, &menu.settings);
    if options.is_empty() {
        println!("{}: {price} ₸", product.name);
    } else {
        println!("{} ({options}): {price} ₸", product.name);
    }
    Ok(())
}

/// Adds a product to the stored cart and suggests a companion item.
///
/// # Errors
///
/// Returns an error for an unknown or sold-out product, invalid options, or
/// when the cart cannot be saved.
pub(crate) fn run_add<S: KeyValueStore>(
    menu: &Menu,
    storage: &mut ClientStorage<S>,
    args: &SelectionArgs,
) -> anyhow::Result<()> {
    let product = find_product(menu, &args.id)?;
    let line = CartLine::new(product, &args.selection(menu), &menu.settings)?;

    let mut session = Session::load(storage);
    let index = session.cart.add(line);
    session.save(storage)?;

    if let Some(line) = session.cart.lines().get(index) {
        println!(
            "added {} x{} ({} ₸), cart total {} ₸",
            line.name(),
            line.quantity(),
            line.line_total(),
            session.checkout.total(&session.cart)
        );
    }

    let candidates = menu.catalog.upsell_candidates(product);
    if let Some(suggestion) = candidates.choose(&mut rand::rng()) {
        println!(
            "goes well with: {} ({}), `cafemenu add {}`",
            suggestion.name,
            suggestion.display_price(),
            suggestion.id
        );
    }
    Ok(())
}

/// Toggles a product in the favorites list.
///
/// # Errors
///
/// Returns an error for an unknown product or when favorites cannot be saved.
pub(crate) fn run_favorite<S: KeyValueStore>(
    menu: &Menu,
    storage: &mut ClientStorage<S>,
    id: &str,
) -> anyhow::Result<()> {
    let product = find_product(menu, id)?;
    let added = storage
        .toggle_favorite(&product.id)
        .context("failed to save favorites")?;
    if added {
        println!("{} added to favorites", product.name);
    } else {
        println!("{} removed from favorites", product.name);
    }
    Ok(())
}
