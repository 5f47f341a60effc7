//! Flat-file record store and the fixed category registry.
//!
//! `CableStore` wraps the `data/` tree: one directory per category, one JSON
//! file per record, filename equal to the record's type slug. Loads always
//! re-read the file system; nothing is cached between calls. Failures here
//! degrade — a missing or malformed file is logged with its category/type
//! context and dropped, never propagated. Callers that need strict errors
//! use `model::load_record_from_path` or the validator.

use crate::catalog::DEFAULT_DATA_DIR;
use crate::catalog::identity::{CategorySlug, slugify};
use crate::catalog::model::{CableRecord, load_record_from_path};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Registry entry for one category. Independent of the file system; the
/// store populates it by loading the matching directory.
pub struct CategoryInfo {
    pub slug: CategorySlug,
    pub name: &'static str,
    pub description: &'static str,
}

/// A registry category together with its loaded records.
pub struct Category {
    pub info: &'static CategoryInfo,
    pub records: Vec<CableRecord>,
}

// Adding a category means adding a registry entry AND creating the matching
// directory under data/; there is no auto-discovery.
static CATEGORIES: [CategoryInfo; 5] = [
    CategoryInfo {
        slug: CategorySlug::Usb,
        name: "USB",
        description: "Universal Serial Bus connectors across generations and form factors.",
    },
    CategoryInfo {
        slug: CategorySlug::Video,
        name: "Video",
        description: "Display and video signal connectors, analog and digital.",
    },
    CategoryInfo {
        slug: CategorySlug::Audio,
        name: "Audio",
        description: "Analog and digital audio interconnects.",
    },
    CategoryInfo {
        slug: CategorySlug::Power,
        name: "Power",
        description: "DC and mains power connectors for consumer equipment.",
    },
    CategoryInfo {
        slug: CategorySlug::Legacy,
        name: "Legacy",
        description: "Serial, parallel, PS/2 and other retired interfaces.",
    },
];

/// The fixed category registry, in catalog iteration order.
pub fn categories() -> &'static [CategoryInfo] {
    &CATEGORIES
}

/// Look up a registry entry by its slug string.
pub fn category_by_slug(slug: &str) -> Option<&'static CategoryInfo> {
    CATEGORIES.iter().find(|info| info.slug.as_str() == slug)
}

/// Handle on a store root directory (the parent of `data/`).
pub struct CableStore {
    root: PathBuf,
}

impl CableStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the store at the discovered repository root.
    pub fn discover() -> anyhow::Result<Self> {
        Ok(Self::new(crate::find_store_root()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DEFAULT_DATA_DIR)
    }

    pub fn category_dir(&self, category: &CategorySlug) -> PathBuf {
        self.data_dir().join(category.as_str())
    }

    /// Path of the record file for a type identifier within a category.
    pub fn record_path(&self, category: &CategorySlug, cable_type: &str) -> PathBuf {
        self.category_dir(category)
            .join(format!("{}.json", slugify(cable_type)))
    }

    /// Read exactly one record.
    ///
    /// Any failure — missing file, unreadable file, malformed JSON — is
    /// logged with the category and type and collapses to `None`.
    pub fn load_record(&self, category: &CategorySlug, cable_type: &str) -> Option<CableRecord> {
        let path = self.record_path(category, cable_type);
        match load_record_from_path(&path) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    category = category.as_str(),
                    cable_type, "failed to load record: {err:#}"
                );
                None
            }
        }
    }

    /// Read every record in a category directory, sorted by `type`
    /// (case-sensitive lexical order).
    ///
    /// A malformed file is logged and skipped; a directory-read failure is
    /// logged and yields an empty list. Callers cannot distinguish "no
    /// data" from "load error" by design.
    pub fn load_category(&self, category: &CategorySlug) -> Vec<CableRecord> {
        let dir = self.category_dir(category);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    category = category.as_str(),
                    "failed to read category directory {}: {err}",
                    dir.display()
                );
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    warn!(
                        category = category.as_str(),
                        "failed to read directory entry: {err}"
                    );
                    continue;
                }
            };
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match load_record_from_path(&path) {
                Ok(record) => records.push(record),
                Err(err) => {
                    let stem = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("<unknown>");
                    warn!(
                        category = category.as_str(),
                        cable_type = stem,
                        "dropping malformed record: {err:#}"
                    );
                }
            }
        }

        records.sort_by(|a, b| a.cable_type.0.cmp(&b.cable_type.0));
        records
    }

    /// Load the whole catalog in registry order.
    pub fn load_catalog(&self) -> Vec<Category> {
        categories()
            .iter()
            .map(|info| Category {
                info,
                records: self.load_category(&info.slug),
            })
            .collect()
    }

    /// Resolve a URL slug to its record, loading the catalog fresh.
    ///
    /// Linear in total record count; the first category-ordered match wins
    /// silently on collision. Use `catalog-validate` to surface collisions.
    pub fn resolve_by_slug(
        &self,
        slug: &str,
    ) -> Option<(CableRecord, &'static CategoryInfo)> {
        for category in self.load_catalog() {
            for record in category.records {
                if slugify(&record.cable_type.0) == slug {
                    return Some((record, category.info));
                }
            }
        }
        None
    }
}
