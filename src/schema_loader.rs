//! JSON Schema loading for the record contract.
//!
//! Compiles `schema/cable_record.schema.json` once per validation run. The
//! compiled validator borrows the schema document, so the raw value is
//! pinned behind an `Arc` that lives alongside it.

use anyhow::{Context, Result};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// A compiled schema plus the document it was compiled from.
#[derive(Debug)]
pub(crate) struct CompiledSchema {
    pub compiled: JSONSchema,
    #[allow(dead_code)]
    raw: Arc<Value>,
}

pub(crate) fn load_json_schema(path: &Path) -> Result<CompiledSchema> {
    let file =
        File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;

    let raw = Arc::new(value);
    // JSONSchema::compile borrows the document; the Arc held next to the
    // compiled schema keeps that borrow alive for the struct's lifetime.
    let raw_static: &'static Value = unsafe { &*(Arc::as_ptr(&raw)) };
    let compiled = JSONSchema::compile(raw_static)
        .with_context(|| format!("compiling schema {}", path.display()))?;

    Ok(CompiledSchema { compiled, raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn compiles_and_validates_against_a_schema_file() {
        let schema = json!({
            "type": "object",
            "required": ["type"],
            "properties": {"type": {"type": "string"}}
        });
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{schema}").unwrap();

        let loaded = load_json_schema(file.path()).expect("schema compiles");
        assert!(loaded.compiled.is_valid(&json!({"type": "USB-C"})));
        assert!(!loaded.compiled.is_valid(&json!({"pin_count": 4})));
    }

    #[test]
    fn missing_and_malformed_schemas_error_with_path_context() {
        let err = load_json_schema(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(format!("{err:#}").contains("opening schema"));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_json_schema(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing schema"));
    }
}
