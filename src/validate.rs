//! Strict store validation.
//!
//! The loader deliberately degrades on bad input; this module is the
//! opposite surface. It walks every registered category, checks each record
//! file against the JSON Schema and the catalog invariants the loader
//! assumes but never enforces, and collects problems instead of failing
//! fast so one report covers the whole store.

use crate::catalog::identity::slugify;
use crate::catalog::model::CableRecord;
use crate::catalog::store::{CableStore, categories};
use crate::schema_loader::load_json_schema;
use crate::search::extract_rate_mbps;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

// Human data-rate strings are display-only but must agree with the numeric
// field; allow rounding slack below one Mbps.
const RATE_TOLERANCE_MBPS: f64 = 0.5;

#[derive(Clone, Debug, Serialize)]
/// One defect found in the store, anchored to a category and file.
pub struct Problem {
    pub category: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Default, Serialize)]
/// Outcome of a full store walk.
pub struct ValidationReport {
    pub records: usize,
    pub problems: Vec<Problem>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }

    fn push(&mut self, category: &str, subject: &str, message: impl Into<String>) {
        self.problems.push(Problem {
            category: category.to_string(),
            subject: subject.to_string(),
            message: message.into(),
        });
    }
}

/// Validate every record file under every registered category.
///
/// Errors only when the schema itself cannot be loaded; store defects are
/// reported, not raised.
pub fn validate_store(store: &CableStore) -> Result<ValidationReport> {
    let schema_path = store.root().join(crate::RECORD_SCHEMA);
    let schema = load_json_schema(&schema_path)
        .with_context(|| format!("loading record schema {}", schema_path.display()))?;

    let mut report = ValidationReport::default();
    // slug -> first (category, type) claiming it, for cross-catalog checks.
    let mut slug_owners: BTreeMap<String, (String, String)> = BTreeMap::new();
    let mut known_types: BTreeSet<String> = BTreeSet::new();
    let mut loaded: Vec<(String, String, CableRecord)> = Vec::new();

    for info in categories() {
        let category = info.slug.as_str();
        let dir = store.category_dir(&info.slug);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                report.push(category, "<directory>", format!("unreadable: {err}"));
                continue;
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .collect();
        paths.sort();

        let mut seen_types: BTreeSet<String> = BTreeSet::new();
        for path in paths {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("<unknown>")
                .to_string();

            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err) => {
                    report.push(category, &stem, format!("unreadable: {err}"));
                    continue;
                }
            };
            let value: Value = match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    report.push(category, &stem, format!("malformed JSON: {err}"));
                    continue;
                }
            };

            if let Err(errors) = schema.compiled.validate(&value) {
                for error in errors {
                    report.push(category, &stem, format!("schema violation: {error}"));
                }
                continue;
            }

            let record: CableRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(err) => {
                    report.push(category, &stem, format!("does not deserialize: {err}"));
                    continue;
                }
            };

            let cable_type = record.cable_type.0.clone();
            let slug = slugify(&cable_type);
            if slug != stem {
                report.push(
                    category,
                    &stem,
                    format!("filename does not match type slug '{slug}'"),
                );
            }
            if !seen_types.insert(cable_type.clone()) {
                report.push(
                    category,
                    &stem,
                    format!("duplicate type '{cable_type}' within category"),
                );
            }
            if let Some((other_category, other_type)) = slug_owners.get(&slug) {
                report.push(
                    category,
                    &stem,
                    format!(
                        "slug '{slug}' collides with '{other_type}' in category '{other_category}'"
                    ),
                );
            } else {
                slug_owners.insert(slug, (category.to_string(), cable_type.clone()));
            }

            check_rate_strings(&mut report, category, &stem, &record);

            known_types.insert(cable_type);
            loaded.push((category.to_string(), stem, record));
        }
    }

    report.records = loaded.len();

    // Compatibility lists name other records by type; dangling references
    // rot silently in the UI, so they count as store defects.
    for (category, stem, record) in &loaded {
        for reference in record.compatibility.references() {
            if !known_types.contains(reference) {
                report.push(
                    category,
                    stem,
                    format!("compatibility reference '{reference}' names no known record"),
                );
            }
        }
    }

    Ok(report)
}

fn check_rate_strings(
    report: &mut ValidationReport,
    category: &str,
    stem: &str,
    record: &CableRecord,
) {
    for (variant_name, variant) in &record.protocols {
        let Some(stated) = extract_rate_mbps(&variant.data_rate.to_lowercase()) else {
            continue;
        };
        if (stated - variant.data_rate_mbps).abs() > RATE_TOLERANCE_MBPS {
            report.push(
                category,
                stem,
                format!(
                    "variant '{variant_name}' data_rate '{}' disagrees with data_rate_mbps {}",
                    variant.data_rate, variant.data_rate_mbps
                ),
            );
        }
    }
}
