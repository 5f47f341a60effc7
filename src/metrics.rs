//! Derived metrics over a record's protocol variants.
//!
//! These are pure functions; the heuristics (wattage scraping from
//! `power_delivery` text, video sniffing from feature strings) follow fixed
//! matching rules that are user-visible, so they intentionally err on the
//! side of under-reporting rather than getting cleverer.

use crate::catalog::model::CableRecord;
use std::collections::BTreeSet;

// Feature strings containing any of these mark a variant as video-capable
// even without an explicit video_standards entry.
const VIDEO_HINTS: &[&str] = &["displayport", "hdmi", "4k", "8k"];

/// Maximum data rate across all protocol variants, in Mbps.
///
/// A record with no variants reports `0.0` — the floor is explicit, never a
/// sentinel or a negative value.
pub fn max_data_rate(record: &CableRecord) -> f64 {
    record
        .protocols
        .values()
        .map(|variant| variant.data_rate_mbps)
        .fold(0.0, f64::max)
}

/// Maximum power in watts, preferring the declared electrical limit.
///
/// When no limit is declared, each variant's `power_delivery` text is
/// scanned for the first integer immediately followed by `W` (no space,
/// case-insensitive) and the maximum across variants is returned. `None`
/// means no data; a found `0` is a real value and is preserved.
pub fn max_power(record: &CableRecord) -> Option<f64> {
    if let Some(declared) = record.electrical.max_power_w {
        return Some(declared);
    }

    let mut best: Option<f64> = None;
    for variant in record.protocols.values() {
        let Some(text) = variant.power_delivery.as_deref() else {
            continue;
        };
        if let Some(watts) = first_wattage(text) {
            best = Some(best.map_or(watts, |current| current.max(watts)));
        }
    }
    best
}

/// Union of explicit video standards and video-hinting feature strings.
///
/// Duplicates collapse; ordering carries no meaning beyond determinism.
pub fn video_capabilities(record: &CableRecord) -> BTreeSet<String> {
    let mut capabilities = BTreeSet::new();
    for variant in record.protocols.values() {
        for standard in &variant.video_standards {
            capabilities.insert(standard.clone());
        }
        for feature in &variant.features {
            let lowered = feature.to_lowercase();
            if VIDEO_HINTS.iter().any(|hint| lowered.contains(hint)) {
                capabilities.insert(feature.clone());
            }
        }
    }
    capabilities
}

/// True iff the record advertises any video capability.
pub fn has_video_support(record: &CableRecord) -> bool {
    !video_capabilities(record).is_empty()
}

/// First integer immediately followed by `w`/`W` in free text.
///
/// `"100W"` matches; `"100 W"` does not — the letter must touch the digits.
/// This is deliberately narrower than the search-query power pattern.
fn first_wattage(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'w' || bytes[i] == b'W') {
                return text[start..i].parse().ok();
            }
        } else {
            i += 1;
        }
    }
    None
}
