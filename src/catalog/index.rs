//! Whole-catalog snapshot used by search and slug resolution.
//!
//! The index is one full load of every registered category in registry
//! order. It is always rebuilt from the store, never patched, so a stale
//! view across reloads is impossible. Lookup stays linear: the catalog is
//! small enough that a scan beats maintaining a keyed map, and the
//! first-match collision behavior of slug resolution is part of the
//! contract.

use crate::catalog::identity::slugify;
use crate::catalog::model::CableRecord;
use crate::catalog::store::{CableStore, Category, CategoryInfo};

/// A record paired with the category it was loaded from.
pub struct ResolvedCable<'a> {
    pub record: &'a CableRecord,
    pub category: &'static CategoryInfo,
}

/// Immutable snapshot of every category's records.
pub struct CatalogIndex {
    categories: Vec<Category>,
}

impl CatalogIndex {
    /// Load the full catalog from the store.
    pub fn load(store: &CableStore) -> Self {
        Self {
            categories: store.load_catalog(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Total record count across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate every record in catalog order (registry order, then type
    /// order within each category).
    pub fn records(&self) -> impl Iterator<Item = ResolvedCable<'_>> {
        self.categories.iter().flat_map(|category| {
            category.records.iter().map(|record| ResolvedCable {
                record,
                category: category.info,
            })
        })
    }

    /// Resolve a URL slug to its record.
    ///
    /// Returns the first catalog-ordered record whose derived type slug
    /// matches; collisions resolve silently to the earliest entry.
    pub fn resolve_by_slug(&self, slug: &str) -> Option<ResolvedCable<'_>> {
        self.records()
            .find(|entry| slugify(&entry.record.cable_type.0) == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::identity::CategorySlug;
    use std::fs;
    use tempfile::TempDir;

    fn record_json(cable_type: &str) -> String {
        serde_json::json!({
            "type": cable_type,
            "name": cable_type,
            "standard_body": "Test Body",
            "connector": {
                "pin_count": 2,
                "width": 1.0,
                "height": 1.0,
                "reversible": false,
                "shape": "circular",
                "units": "mm"
            },
            "last_updated": "2025-01-01"
        })
        .to_string()
    }

    fn store_with(entries: &[(&CategorySlug, &str)]) -> (TempDir, CableStore) {
        let temp = TempDir::new().unwrap();
        let store = CableStore::new(temp.path());
        for &(category, cable_type) in entries {
            let dir = store.category_dir(category);
            fs::create_dir_all(&dir).unwrap();
            fs::write(store.record_path(category, cable_type), record_json(cable_type))
                .unwrap();
        }
        (temp, store)
    }

    #[test]
    fn records_iterate_in_catalog_order() {
        let (_temp, store) = store_with(&[
            (&CategorySlug::Video, "HDMI"),
            (&CategorySlug::Usb, "USB-C"),
            (&CategorySlug::Usb, "Micro-USB"),
        ]);
        let index = CatalogIndex::load(&store);
        assert_eq!(index.len(), 3);
        let order: Vec<String> = index
            .records()
            .map(|entry| entry.record.cable_type.0.clone())
            .collect();
        // usb sorts before video in the registry; types sort within usb.
        assert_eq!(order, vec!["Micro-USB", "USB-C", "HDMI"]);
    }

    #[test]
    fn slug_collisions_resolve_to_first_catalog_entry() {
        // Same type identifier in two categories collides on slug.
        let (_temp, store) = store_with(&[
            (&CategorySlug::Video, "Combo"),
            (&CategorySlug::Usb, "Combo"),
        ]);
        let index = CatalogIndex::load(&store);
        let hit = index.resolve_by_slug("combo").expect("resolves");
        assert_eq!(hit.category.slug, CategorySlug::Usb);
    }
}
