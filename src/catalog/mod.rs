//! Cable catalog wiring.
//!
//! This module wraps the flat-file store under `data/` so the binaries can
//! load typed records and expose consistent identifiers. Types mirror the
//! record schema; callers use `CableStore` for single loads, `CatalogIndex`
//! for whole-catalog iteration, search, and slug resolution.

pub mod identity;
pub mod index;
pub mod model;
pub mod store;

pub use identity::{CableType, CategorySlug, ConnectorShape, slugify};
pub use index::{CatalogIndex, ResolvedCable};
pub use model::{
    CableRecord, CompatibilityInfo, ConnectorGeometry, ElectricalLimits, ProtocolVariant,
    SourceRef, load_record_from_path,
};
pub use store::{CableStore, Category, CategoryInfo, categories, category_by_slug};

/// Directory under the store root holding the category directories.
pub const DEFAULT_DATA_DIR: &str = "data";
