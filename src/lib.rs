//! Shared library for the cabledex catalog tools.
//!
//! The crate exposes the typed cable catalog (records, categories, index),
//! the derived-metric and search functions, and the HTML card renderer used
//! by the helper binaries. Public functions here form the contract the
//! binaries depend on: store root discovery, logging setup, and the
//! load/search/render pipeline over `data/`.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod metrics;
pub mod render;
pub mod search;
pub mod validate;

pub(crate) mod schema_loader;

pub use catalog::{
    CableRecord, CableStore, CableType, CatalogIndex, Category, CategoryInfo, CategorySlug,
    CompatibilityInfo, ConnectorGeometry, ConnectorShape, ElectricalLimits, ProtocolVariant,
    ResolvedCable, SourceRef, categories, category_by_slug, load_record_from_path, slugify,
};
pub use metrics::{has_video_support, max_data_rate, max_power, video_capabilities};
pub use render::{CardView, escape_html, render_card, render_page};
pub use search::{QueryThresholds, search};
pub use validate::{Problem, ValidationReport, validate_store};

const DATA_DIR: &str = catalog::DEFAULT_DATA_DIR;
pub(crate) const RECORD_SCHEMA: &str = "schema/cable_record.schema.json";

/// Returns true when `candidate` looks like a store root.
///
/// The detection is intentionally strict: both the data tree and the record
/// schema must be present so helpers never bind to a half-checkout.
fn is_store_root(candidate: &Path) -> bool {
    candidate.join(DATA_DIR).is_dir() && candidate.join(RECORD_SCHEMA).is_file()
}

/// Verifies that an explicit `CABLEDEX_ROOT` hint points at a valid store.
fn store_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_store_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_store_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the store root.
///
/// Search order: honor `CABLEDEX_ROOT` if it points at a real store, fall
/// back to climbing up from the current executable, then use the build-time
/// hint. Callers can treat failure as fatal because nothing works without
/// the data tree.
pub fn find_store_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("CABLEDEX_ROOT") {
        if let Some(root) = store_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("CABLEDEX_ROOT_HINT") {
        if let Some(root) = store_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!("Unable to locate the cabledex store root. Set CABLEDEX_ROOT to the checkout.");
}

/// Install the tracing subscriber used by every binary.
///
/// Honors `RUST_LOG`; defaults to `warn` so the loader's degrade path stays
/// visible without drowning normal output.
pub fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    // try_init: tests and embedding callers may already have a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
