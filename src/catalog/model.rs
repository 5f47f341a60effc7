//! Deserializable representation of the per-cable record files.
//!
//! The types mirror `schema/cable_record.schema.json` so the loader, metrics,
//! search, and renderer can reason about records without ad-hoc JSON
//! handling. Strict parsing lives here; the degrade-to-empty policy callers
//! expect from the store is applied in `catalog::store`.

use crate::catalog::identity::{CableType, ConnectorShape};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
/// One connector/cable type as stored on disk.
pub struct CableRecord {
    #[serde(rename = "type")]
    pub cable_type: CableType,
    pub name: String,
    pub standard_body: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Protocol-variant name (e.g., `USB 3.2 Gen 2`) to variant details.
    #[serde(default)]
    pub protocols: BTreeMap<String, ProtocolVariant>,
    pub connector: ConnectorGeometry,
    #[serde(default)]
    pub electrical: ElectricalLimits,
    #[serde(default)]
    pub compatibility: CompatibilityInfo,
    #[serde(default)]
    pub common_devices: Vec<String>,
    /// Free text describing real-world ambiguity around this connector.
    #[serde(default)]
    pub confusion_points: Vec<String>,
    #[serde(default)]
    pub buying_guide: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    pub last_updated: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// One protocol/spec revision a record supports.
///
/// `data_rate_mbps` is the canonical sortable/filterable value; `data_rate`
/// is display-only and must stay consistent with it (checked by the
/// validator, not the loader).
pub struct ProtocolVariant {
    pub version: String,
    pub data_rate: String,
    pub data_rate_mbps: f64,
    /// Free text; may embed a wattage (`"Up to 100W with USB PD"`).
    #[serde(default)]
    pub power_delivery: Option<String>,
    #[serde(default)]
    pub video_standards: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub cable_requirements: Option<String>,
    #[serde(default)]
    pub max_length: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Physical connector description. Dimensions are in `units`.
pub struct ConnectorGeometry {
    pub pin_count: u32,
    #[serde(default)]
    pub rows: Option<u32>,
    #[serde(default)]
    pub pitch: Option<f64>,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub depth: Option<f64>,
    pub reversible: bool,
    pub shape: ConnectorShape,
    pub units: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// Declared electrical ceilings. All fields optional; absence means the
/// standard does not pin the value down, not that it is zero.
pub struct ElectricalLimits {
    #[serde(default)]
    pub max_voltage: Option<f64>,
    #[serde(default)]
    pub max_current: Option<f64>,
    #[serde(default)]
    pub max_power_w: Option<f64>,
    #[serde(default)]
    pub impedance: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// Cross-references to other record `type` identifiers.
pub struct CompatibilityInfo {
    #[serde(default)]
    pub backward: Vec<String>,
    #[serde(default)]
    pub forward: Vec<String>,
    #[serde(default)]
    pub adapter_to: Vec<String>,
    #[serde(default)]
    pub adapter_from: Vec<String>,
}

impl CompatibilityInfo {
    /// All referenced type identifiers, in field order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.backward
            .iter()
            .chain(&self.forward)
            .chain(&self.adapter_to)
            .chain(&self.adapter_from)
            .map(String::as_str)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Citation attached to a record.
pub struct SourceRef {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Read and parse a single cable record from disk.
///
/// Both failure kinds (unreadable file, malformed JSON) surface as errors
/// with the path in context; the store decides whether to degrade.
pub fn load_record_from_path(path: &Path) -> Result<CableRecord> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let record: CableRecord = serde_json::from_str(&data)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_record_json() -> serde_json::Value {
        json!({
            "type": "USB-C",
            "name": "USB Type-C",
            "standard_body": "USB-IF",
            "aliases": ["Type-C", "USB Type-C"],
            "protocols": {
                "USB 2.0": {
                    "version": "2.0",
                    "data_rate": "480 Mbps",
                    "data_rate_mbps": 480.0,
                    "power_delivery": "Up to 15W without PD negotiation",
                    "features": ["Legacy device support"]
                },
                "USB4": {
                    "version": "USB4 Gen 3x2",
                    "data_rate": "40 Gbps",
                    "data_rate_mbps": 40000.0,
                    "power_delivery": "Up to 240W with USB PD EPR",
                    "video_standards": ["DisplayPort 2.0"],
                    "features": ["DisplayPort Alt Mode", "PCIe tunneling"],
                    "cable_requirements": "40 Gbps certified cable",
                    "max_length": "0.8 m passive"
                }
            },
            "connector": {
                "pin_count": 24,
                "rows": 2,
                "pitch": 0.5,
                "width": 8.34,
                "height": 2.56,
                "reversible": true,
                "shape": "oval",
                "units": "mm"
            },
            "electrical": {
                "max_voltage": 48.0,
                "max_current": 5.0,
                "max_power_w": 240.0
            },
            "compatibility": {
                "backward": ["USB-A"],
                "adapter_to": ["HDMI", "DisplayPort"]
            },
            "common_devices": ["Laptops", "Phones", "Tablets", "Monitors", "Docks"],
            "confusion_points": [
                "Identical plugs may carry wildly different data rates and wattages."
            ],
            "buying_guide": "Prefer certified cables; check the rated wattage.",
            "notes": "Reversible successor to USB-A and Micro-USB.",
            "sources": [{"title": "USB Type-C Specification", "url": "https://usb.org"}],
            "last_updated": "2025-11-02"
        })
    }

    #[test]
    fn record_round_trips_through_serde() {
        let value = sample_record_json();
        let record: CableRecord = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(record.cable_type.0, "USB-C");
        assert_eq!(record.protocols.len(), 2);
        assert_eq!(record.electrical.max_power_w, Some(240.0));
        assert!(record.connector.reversible);

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back.get("type").and_then(|v| v.as_str()), Some("USB-C"));
        assert_eq!(
            back.pointer("/connector/shape").and_then(|v| v.as_str()),
            Some("oval")
        );
    }

    #[test]
    fn optional_blocks_default_when_missing() {
        let value = json!({
            "type": "VGA",
            "name": "Video Graphics Array",
            "standard_body": "VESA",
            "connector": {
                "pin_count": 15,
                "rows": 3,
                "width": 16.0,
                "height": 8.0,
                "reversible": false,
                "shape": "trapezoidal",
                "units": "mm"
            },
            "last_updated": "2025-10-01"
        });
        let record: CableRecord = serde_json::from_value(value).unwrap();
        assert!(record.protocols.is_empty());
        assert!(record.electrical.max_power_w.is_none());
        assert_eq!(record.compatibility.references().count(), 0);
        assert!(record.sources.is_empty());
    }

    #[test]
    fn compatibility_references_iterate_in_field_order() {
        let compat = CompatibilityInfo {
            backward: vec!["USB-A".into()],
            forward: vec![],
            adapter_to: vec!["HDMI".into()],
            adapter_from: vec!["DVI-D".into()],
        };
        let refs: Vec<&str> = compat.references().collect();
        assert_eq!(refs, vec!["USB-A", "HDMI", "DVI-D"]);
    }
}
