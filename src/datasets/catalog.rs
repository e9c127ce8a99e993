//! Demo product catalog: the large "performance demo" item grid.

use std::fmt;

use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::logic::{DiscreteFilter, EmptySearchPolicy, SortKey, distinct_values};
use crate::view::ViewConfig;

/// Label of the category selector's "any category" option.
pub const ALL_CATEGORIES: &str = "all";

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Sequential identifier.
    pub id: u32,
    /// Display name, e.g. "Item 42".
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Price in whole currency units.
    pub price: u32,
    /// Category label, e.g. "Category 2".
    pub category: String,
    /// Three rotating tags.
    pub tags: Vec<String>,
    /// Availability flag.
    pub in_stock: bool,
    /// Rating from 1 to 5.
    pub rating: u8,
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<5} {:<12} {:>5}  {}  {}  {}",
            self.id,
            self.name,
            self.price,
            self.category,
            "*".repeat(usize::from(self.rating)),
            if self.in_stock { "in stock" } else { "sold out" }
        )
    }
}

/// What: Build one catalog entry with the given random attributes.
///
/// Inputs:
/// - `id`: Sequential identifier driving name, category, and tags
/// - `price`, `in_stock`, `rating`: Randomized (or fixed, in tests) attributes
///
/// Output:
/// - `CatalogItem` with category `id % 10` and tags `id % 5 .. id % 5 + 2`.
#[must_use]
pub fn catalog_item(id: u32, price: u32, in_stock: bool, rating: u8) -> CatalogItem {
    CatalogItem {
        id,
        name: format!("Item {id}"),
        description: format!(
            "This is a description for item {id}. It contains some text that makes each item unique."
        ),
        price,
        category: format!("Category {}", id % 10),
        tags: (0..3).map(|k| format!("tag{}", (id + k) % 5)).collect(),
        in_stock,
        rating,
    }
}

/// Generate `count` items with random price (10..=1009), stock (70% in stock), and rating (1..=5).
#[must_use]
pub fn generate_catalog(count: usize) -> Vec<CatalogItem> {
    let mut rng = rand::rng();
    (0..count)
        .map(|i| {
            let id = u32::try_from(i).unwrap_or(u32::MAX);
            catalog_item(
                id,
                rng.random_range(10..=1009_u32),
                rng.random_range(0.0..1.0_f64) > 0.3,
                rng.random_range(1..=5_u8),
            )
        })
        .collect()
}

/// Category selector options: "all" then each category in first-seen order.
#[must_use]
pub fn category_options(items: &[CatalogItem]) -> Vec<String> {
    distinct_values(items, |item| item.category.as_str(), ALL_CATEGORIES)
}

/// What: View preset for the catalog grid.
///
/// Inputs: None
///
/// Output:
/// - Config searching name and description, with `category` and `in_stock`
///   filters and `name` / `price` / `rating` sort keys.
///
/// Details:
/// - Nothing is shown until a search term is entered (`ShowNone`).
/// - Price sorts ascending, rating descending.
#[must_use]
pub fn catalog_view_config() -> ViewConfig<CatalogItem> {
    ViewConfig::new()
        .search_field("name", |item: &CatalogItem| item.name.as_str())
        .search_field("description", |item: &CatalogItem| item.description.as_str())
        .discrete_filter(DiscreteFilter::text_equals(
            "category",
            ALL_CATEGORIES,
            |item: &CatalogItem| item.category.as_str(),
        ))
        .discrete_filter(DiscreteFilter::require_flag("in_stock", |item: &CatalogItem| {
            item.in_stock
        }))
        .sort_key(SortKey::by_text("name", |item: &CatalogItem| item.name.as_str()))
        .sort_key(SortKey::ascending("price", |item: &CatalogItem| item.price))
        .sort_key(SortKey::descending("rating", |item: &CatalogItem| item.rating))
        .empty_search_policy(EmptySearchPolicy::ShowNone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;
    use crate::view::View;

    #[test]
    /// What: Generated items respect documented attribute ranges.
    ///
    /// - Input: 500 generated items
    /// - Output: Prices 10..=1009, ratings 1..=5, ten categories, three tags each
    fn generated_catalog_ranges() {
        let items = generate_catalog(500);
        assert_eq!(items.len(), 500);
        assert!(items.iter().all(|i| (10..=1009).contains(&i.price)));
        assert!(items.iter().all(|i| (1..=5).contains(&i.rating)));
        assert!(items.iter().all(|i| i.tags.len() == 3));
        assert_eq!(category_options(&items).len(), 11);
        assert_eq!(category_options(&items)[0], "all");
        assert_eq!(items[13].category, "Category 3");
        assert_eq!(items[4].tags, vec!["tag4", "tag0", "tag1"]);
    }

    #[test]
    /// What: The catalog preset hides everything until a search commits and sorts rating descending.
    ///
    /// Inputs:
    /// - 30 fixed items; search "item 1"; sort "rating"; filter in_stock.
    ///
    /// Output:
    /// - Empty before search; 11 matches (1, 10..=19); ratings non-increasing; 5 in stock.
    fn catalog_preset_behaviour() {
        let items: Vec<CatalogItem> = (0..30)
            .map(|i| catalog_item(i, 100 + i, i % 2 == 0, u8::try_from(i % 5 + 1).unwrap_or(1)))
            .collect();
        let mut view =
            View::with_clock(items, catalog_view_config(), ManualClock::new()).expect("valid preset");
        assert_eq!(view.current().total_matched, 0);

        view.commit_search_term("item 1");
        assert_eq!(view.current().total_matched, 11);

        view.set_sort_key("rating").expect("declared key");
        let snap = view.current();
        assert!(snap.visible.windows(2).all(|w| w[0].rating >= w[1].rating));

        view.set_filter("in_stock", true).expect("declared filter");
        let snap = view.current();
        assert!(snap.visible.iter().all(|i| i.in_stock));
        assert_eq!(snap.total_matched, 5);
    }

    #[test]
    /// What: Display line shows id, name, price, and stock.
    fn catalog_display_line() {
        let line = catalog_item(7, 250, false, 3).to_string();
        assert!(line.contains("Item 7"));
        assert!(line.contains("250"));
        assert!(line.contains("***"));
        assert!(line.contains("sold out"));
    }
}
