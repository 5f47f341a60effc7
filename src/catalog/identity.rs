use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Short identifier for a cable record (e.g., `USB-C`, `HDMI`).
///
/// This is the display form as stored in the record file; URL-facing code
/// derives a slug from it with [`slugify`].
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CableType(pub String);

impl fmt::Display for CableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category a record directory belongs to.
///
/// Known variants keep serialization consistent with the directory names on
/// disk; `Other` preserves forward compatibility with stores that add a
/// category before the registry learns about it.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum CategorySlug {
    Usb,
    Video,
    Audio,
    Power,
    Legacy,
    Other(String),
}

impl CategorySlug {
    pub fn as_str(&self) -> &str {
        match self {
            CategorySlug::Usb => "usb",
            CategorySlug::Video => "video",
            CategorySlug::Audio => "audio",
            CategorySlug::Power => "power",
            CategorySlug::Legacy => "legacy",
            CategorySlug::Other(value) => value.as_str(),
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "usb" => CategorySlug::Usb,
            "video" => CategorySlug::Video,
            "audio" => CategorySlug::Audio,
            "power" => CategorySlug::Power,
            "legacy" => CategorySlug::Legacy,
            other => CategorySlug::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategorySlug {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategorySlug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

/// Connector housing shape tag mirrored from the record schema.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConnectorShape {
    Rectangular,
    Circular,
    Trapezoidal,
    Oval,
    Other(String),
}

impl ConnectorShape {
    pub fn as_str(&self) -> &str {
        match self {
            ConnectorShape::Rectangular => "rectangular",
            ConnectorShape::Circular => "circular",
            ConnectorShape::Trapezoidal => "trapezoidal",
            ConnectorShape::Oval => "oval",
            ConnectorShape::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "rectangular" => ConnectorShape::Rectangular,
            "circular" => ConnectorShape::Circular,
            "trapezoidal" => ConnectorShape::Trapezoidal,
            "oval" => ConnectorShape::Oval,
            other => ConnectorShape::Other(other.to_string()),
        }
    }
}

impl Serialize for ConnectorShape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConnectorShape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

/// Derive the URL-safe slug for a display identifier.
///
/// Lower-cases the input and collapses every maximal run of characters
/// outside `[a-z0-9]` into a single `-`. Runs at either end are dropped so
/// the result never starts or ends with a hyphen. Idempotent: applying it to
/// its own output is a no-op.
pub fn slugify(display: &str) -> String {
    let mut slug = String::with_capacity(display.len());
    let mut pending_separator = false;
    for c in display.chars() {
        let lowered = c.to_ascii_lowercase();
        if lowered.is_ascii_lowercase() || lowered.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(lowered);
        } else {
            pending_separator = true;
        }
    }
    slug
}
