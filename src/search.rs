//! Free-text catalog search with embedded numeric thresholds.
//!
//! A query is matched three ways at once: as a lower-cased substring over
//! the record's text fields, as a data-rate threshold when it embeds
//! `40 Gbps`-style figures, and as a power threshold when it embeds
//! `100W`-style figures. Any branch matching includes the record. Results
//! keep catalog iteration order; there is no relevance ranking.
//!
//! The power branch consults only the declared electrical limit — never the
//! free-text fallback `metrics::max_power` uses. That asymmetry is part of
//! the contract; do not unify the two paths.

use crate::catalog::index::CatalogIndex;
use crate::catalog::model::CableRecord;

// Recognized data-rate units, checked in order at each candidate position.
// A leading `g` means the figure is in Gbps and normalizes by x1000.
const RATE_UNITS: &[&str] = &["gbps", "mbps", "gb/s", "mb/s"];

/// Numeric thresholds extracted from a raw query string.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QueryThresholds {
    /// Minimum data rate in Mbps, when the query embeds one.
    pub rate_mbps: Option<f64>,
    /// Minimum declared power in watts, when the query embeds one.
    pub power_w: Option<f64>,
}

impl QueryThresholds {
    /// Extract both thresholds from a raw query.
    ///
    /// Each scanner takes the first (leftmost) match and ignores the rest,
    /// the way a single non-global regex match would.
    pub fn parse(query: &str) -> Self {
        let lowered = query.to_lowercase();
        Self {
            rate_mbps: extract_rate_mbps(&lowered),
            power_w: extract_power_w(&lowered),
        }
    }
}

/// Search the whole catalog.
pub fn search<'a>(index: &'a CatalogIndex, query: &str) -> Vec<&'a CableRecord> {
    let term = query.to_lowercase();
    let thresholds = QueryThresholds::parse(query);

    index
        .records()
        .filter(|entry| {
            let record = entry.record;
            if text_matches(record, &term) {
                return true;
            }
            if let Some(min_rate) = thresholds.rate_mbps {
                if record
                    .protocols
                    .values()
                    .any(|variant| variant.data_rate_mbps >= min_rate)
                {
                    return true;
                }
            }
            if let Some(min_power) = thresholds.power_w {
                // Declared field only; text-implied wattages never match here.
                if record
                    .electrical
                    .max_power_w
                    .is_some_and(|declared| declared >= min_power)
                {
                    return true;
                }
            }
            false
        })
        .map(|entry| entry.record)
        .collect()
}

/// Substring match over every searchable text field of a record.
fn text_matches(record: &CableRecord, term: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(term);

    contains(&record.cable_type.0)
        || contains(&record.name)
        || record.aliases.iter().any(|alias| contains(alias))
        || record.common_devices.iter().any(|device| contains(device))
        || record.protocols.iter().any(|(key, variant)| {
            contains(key)
                || contains(&variant.version)
                || variant.features.iter().any(|feature| contains(feature))
        })
}

/// First `<number> [ws] <unit>` occurrence in lower-cased text, as Mbps.
///
/// Also used by the validator to cross-check display rate strings.
pub(crate) fn extract_rate_mbps(lowered: &str) -> Option<f64> {
    scan_number(lowered, |rest| {
        RATE_UNITS
            .iter()
            .find(|unit| rest.starts_with(*unit))
            .map(|unit| if unit.starts_with('g') { 1000.0 } else { 1.0 })
    })
}

/// First `<number> [ws] w` occurrence in a lower-cased query, in watts.
fn extract_power_w(lowered: &str) -> Option<f64> {
    scan_number(lowered, |rest| rest.starts_with('w').then_some(1.0))
}

/// Left-to-right scan for a number whose suffix satisfies `accept_unit`.
///
/// At each digit position the scanner tries the longest number first
/// (digits plus a decimal part) and falls back to the bare integer run,
/// skipping whitespace before the unit check — the same order a
/// `\d+(\.\d+)?\s*unit` pattern backtracks in. `accept_unit` returns the
/// multiplier applied to the parsed number.
fn scan_number(text: &str, accept_unit: impl Fn(&str) -> Option<f64>) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }

        let mut candidates = [0usize; 2];
        let mut count = 0;
        if end < bytes.len() && bytes[end] == b'.' {
            let mut frac_end = end + 1;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            if frac_end > end + 1 {
                candidates[count] = frac_end;
                count += 1;
            }
        }
        candidates[count] = end;
        count += 1;

        for &number_end in &candidates[..count] {
            let mut unit_start = number_end;
            while unit_start < bytes.len() && bytes[unit_start].is_ascii_whitespace() {
                unit_start += 1;
            }
            if let Some(multiplier) = accept_unit(&text[unit_start..]) {
                let number: f64 = text[start..number_end].parse().ok()?;
                return Some(number * multiplier);
            }
        }

        // No unit after this run; resume one char in so decimals like
        // `1.5.5gbps` still find the later `5.5` the way a regex would.
        i = start + 1;
    }
    None
}
