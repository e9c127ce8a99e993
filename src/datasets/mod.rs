//! Demo collections and their view presets.
//!
//! The two presets differ on purpose: the catalog hides results until a search
//! term is entered, while the post feed lists everything by default.

pub mod catalog;
pub mod posts;

pub use catalog::{CatalogItem, catalog_item, catalog_view_config, category_options, generate_catalog};
pub use posts::{Post, generate_posts, posts_view_config};

/// Which demo collection to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DatasetKind {
    /// Product catalog (hidden until searched).
    #[default]
    Catalog,
    /// Post feed (everything shown by default).
    Posts,
}

impl DatasetKind {
    /// Map a config value to a dataset.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "catalog" | "items" | "products" => Some(Self::Catalog),
            "posts" | "feed" => Some(Self::Posts),
            _ => None,
        }
    }

    /// Default record count for the dataset.
    #[must_use]
    pub const fn default_count(self) -> usize {
        match self {
            Self::Catalog => 5000,
            Self::Posts => 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DatasetKind;

    #[test]
    /// What: Dataset config keys and aliases map to the right variant.
    fn dataset_kind_config_keys() {
        assert_eq!(DatasetKind::from_config_key("Catalog"), Some(DatasetKind::Catalog));
        assert_eq!(DatasetKind::from_config_key("feed"), Some(DatasetKind::Posts));
        assert_eq!(DatasetKind::from_config_key("users"), None);
        assert_eq!(DatasetKind::default(), DatasetKind::Catalog);
        assert_eq!(DatasetKind::Posts.default_count(), 1000);
    }
}
