//! The product list of one feed load and the views built on top of it.

use std::collections::HashSet;

use crate::menu::{COLD_DRINKS_CATEGORY, POPULAR_CATEGORY};
use crate::product::Product;

/// Synthetic category holding the buyer's favorite products.
pub const FAVORITES_CATEGORY: &str = "FAVORITES";

/// Canonical display order. Each entry lists every uppercased label the
/// feed may use for that category.
const CATEGORY_ORDER: &[&[&str]] = &[
    &[FAVORITES_CATEGORY, "ИЗБРАННОЕ"],
    &[POPULAR_CATEGORY, "ПОПУЛЯРНОЕ"],
    &["SEASONAL", "СЕЗОННОЕ"],
    &["COFFEE", "КОФЕ"],
    &["TEA", "ЧАЙ"],
    &[COLD_DRINKS_CATEGORY, "ХОЛОДНЫЕ НАПИТКИ"],
    &["MILKSHAKES", "МОЛОЧНЫЕ КОКТЕЙЛИ"],
    &["BREAKFASTS", "ЗАВТРАКИ"],
    &["CROISSANTS", "КРУАССАНЫ"],
    &["HOT DOGS", "ХОТ-ДОГИ"],
    &["SALADS", "САЛАТЫ"],
    &["PIZZA", "ПИЦЦА"],
    &["PASTA", "ПАСТЫ"],
    &["SNACKS", "ЗАКУСКИ"],
];

/// Cross-sell pairing: a product whose category contains one of `triggers`
/// suggests products from categories containing one of `targets`.
struct UpsellRule {
    triggers: &'static [&'static str],
    targets: &'static [&'static str],
}

const DRINKS_FOR_FOOD: &[&str] = &[COLD_DRINKS_CATEGORY, "ХОЛОДНЫЕ НАПИТКИ", "LEMONADE", "ЛИМОНАД"];

const UPSELL_RULES: &[UpsellRule] = &[
    UpsellRule {
        triggers: &["COFFEE", "КОФЕ", "TEA", "ЧАЙ"],
        targets: &["CROISSANTS", "КРУАССАНЫ", "SNACKS", "ЗАКУСКИ"],
    },
    UpsellRule {
        triggers: &["PIZZA", "ПИЦЦА", "PASTA", "ПАСТЫ", "HOT DOGS", "ХОТ-ДОГИ"],
        targets: DRINKS_FOR_FOOD,
    },
    UpsellRule {
        triggers: &["BREAKFASTS", "ЗАВТРАКИ"],
        targets: &["COFFEE", "КОФЕ", "TEA", "ЧАЙ"],
    },
];

/// Products in feed order, popular duplicates first.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The regular listing of `id`. Popular duplicates share their id with
    /// the original and are only returned when no other entry exists.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        let mut matches = self.products.iter().filter(|p| p.id == id);
        let first = matches.next()?;
        if first.category != POPULAR_CATEGORY {
            return Some(first);
        }
        Some(matches.find(|p| p.category != POPULAR_CATEGORY).unwrap_or(first))
    }

    /// Products as shown to the buyer: each favorite id once under
    /// [`FAVORITES_CATEGORY`], ahead of the regular listing.
    #[must_use]
    pub fn display_products(&self, favorites: &[String]) -> Vec<Product> {
        let wanted: HashSet<&str> = favorites.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let favorite_copies = self
            .products
            .iter()
            .filter(|p| wanted.contains(p.id.as_str()) && seen.insert(p.id.as_str()))
            .map(|p| p.in_category(FAVORITES_CATEGORY))
            .collect::<Vec<_>>();

        favorite_copies
            .into_iter()
            .chain(self.products.iter().cloned())
            .collect()
    }

    /// Distinct categories of [`Self::display_products`] in canonical order.
    /// Categories outside the canonical list follow in first-seen order.
    #[must_use]
    pub fn categories(&self, favorites: &[String]) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.display_products(favorites) {
            if !categories.contains(&product.category) {
                categories.push(product.category);
            }
        }
        categories.sort_by_key(|category| category_rank(category));
        categories
    }

    /// Case-insensitive name search.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Available products worth suggesting after `trigger` was added to the
    /// cart. Empty when the trigger's category has no pairing.
    #[must_use]
    pub fn upsell_candidates(&self, trigger: &Product) -> Vec<&Product> {
        let category = trigger.category.to_uppercase();
        let Some(rule) = UPSELL_RULES
            .iter()
            .find(|rule| rule.triggers.iter().any(|t| category.contains(t)))
        else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.available && p.id != trigger.id)
            .filter(|p| {
                let candidate = p.category.to_uppercase();
                rule.targets.iter().any(|t| candidate.contains(t))
            })
            .collect()
    }
}

fn category_rank(category: &str) -> usize {
    let upper = category.to_uppercase();
    CATEGORY_ORDER
        .iter()
        .position(|labels| labels.contains(&upper.as_str()))
        .unwrap_or(CATEGORY_ORDER.len())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn product(id: &str, category: &str, name: &str) -> Product {
        Product {
            id: id.to_owned(),
            category: category.to_owned(),
            name: name.to_owned(),
            short_description: String::new(),
            full_description: String::new(),
            image: None,
            base_price: 500,
            available: true,
            popular: false,
            badge: None,
            volumes: Vec::new(),
            modifiers: BTreeMap::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_products(vec![
            product("1", "PIZZA", "MARGHERITA"),
            product("2", "COFFEE", "LATTE"),
            product("3", "CROISSANTS", "ALMOND CROISSANT"),
            product("4", "DESSERTS", "CHEESECAKE"),
            product("5", "COLD DRINKS", "MINT LEMONADE"),
            product("6", "SNACKS", "NACHOS"),
        ])
    }

    #[test]
    fn find_skips_popular_copy() {
        let mut products = catalog().products().to_vec();
        let popular = products[1].in_category(POPULAR_CATEGORY);
        products.insert(0, popular);
        let catalog = Catalog::from_products(products);
        assert_eq!(catalog.find("2").unwrap().category, "COFFEE");
        assert!(catalog.find("99").is_none());
    }

    #[test]
    fn popular_only_entry_is_still_found() {
        let catalog = Catalog::from_products(vec![product("8", POPULAR_CATEGORY, "FLAT WHITE")]);
        assert_eq!(catalog.find("8").unwrap().name, "FLAT WHITE");
    }

    #[test]
    fn favorites_are_listed_once_and_first() {
        let catalog = catalog();
        let shown = catalog.display_products(&["3".to_owned(), "3".to_owned(), "42".to_owned()]);
        assert_eq!(shown.len(), catalog.len() + 1);
        assert_eq!(shown[0].id, "3");
        assert_eq!(shown[0].category, FAVORITES_CATEGORY);
    }

    #[test]
    fn categories_follow_canonical_order_unknown_last() {
        let categories = catalog().categories(&["1".to_owned()]);
        assert_eq!(
            categories,
            [
                "FAVORITES",
                "COFFEE",
                "COLD DRINKS",
                "CROISSANTS",
                "PIZZA",
                "SNACKS",
                "DESSERTS"
            ]
        );
    }

    #[test]
    fn localized_categories_share_rank_with_english() {
        assert_eq!(category_rank("Кофе"), category_rank("COFFEE"));
        assert!(category_rank("ЗАВТРАКИ") < category_rank("ПИЦЦА"));
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = catalog();
        let hits = catalog.search("lemon");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "5");
    }

    #[test]
    fn coffee_upsells_pastry_and_snacks() {
        let catalog = catalog();
        let latte = catalog.find("2").unwrap();
        let ids: Vec<&str> = catalog
            .upsell_candidates(latte)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["3", "6"]);
    }

    #[test]
    fn upsell_skips_unavailable_products() {
        let mut products = catalog().products().to_vec();
        products[4].available = false;
        let catalog = Catalog::from_products(products);
        let pizza = catalog.find("1").unwrap();
        assert!(catalog.upsell_candidates(pizza).is_empty());
    }

    #[test]
    fn unpaired_category_has_no_upsell() {
        let catalog = catalog();
        let cake = catalog.find("4").unwrap();
        assert!(catalog.upsell_candidates(cake).is_empty());
    }
}
