use crate::domain::models::MergeError;
use anyhow::Context;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;

/// The zone-catalog document. Entries stay as raw JSON objects so that
/// fields the merger does not own round-trip untouched, in their
/// original key order.
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    pub zones: Map<String, Value>,
}

pub fn load_catalog(path: &Path) -> anyhow::Result<ZoneCatalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read catalog: {}", path.display()))?;
    let doc: Value = serde_json::from_str(&raw).map_err(|e| MergeError::MalformedCatalog {
        detail: format!("{}: {}", path.display(), e),
    })?;
    let Value::Object(zones) = doc else {
        return Err(MergeError::MalformedCatalog {
            detail: format!("{}: document root must be an object of zones", path.display()),
        }
        .into());
    };
    validate_zones(&zones)?;
    Ok(ZoneCatalog { zones })
}

fn validate_zones(zones: &Map<String, Value>) -> Result<(), MergeError> {
    for (zone, entry) in zones {
        let Value::Object(entry) = entry else {
            return Err(MergeError::MalformedCatalog {
                detail: format!("zone {}: entry must be an object", zone),
            });
        };
        check_field(zone, entry, "notes", Value::is_string, "a string")?;
        check_field(zone, entry, "pois", Value::is_object, "an object")?;
        check_field(zone, entry, "walkthrough_steps", Value::is_array, "an array")?;
        check_field(zone, entry, "town_visits", Value::is_array, "an array")?;
    }
    Ok(())
}

fn check_field(
    zone: &str,
    entry: &Map<String, Value>,
    field: &str,
    ok: fn(&Value) -> bool,
    want: &str,
) -> Result<(), MergeError> {
    if let Some(value) = entry.get(field) {
        if !ok(value) {
            return Err(MergeError::MalformedCatalog {
                detail: format!("zone {}: field {} must be {}", zone, field, want),
            });
        }
    }
    Ok(())
}

/// Writes the document through a temp file in the destination directory,
/// so an interrupted run never leaves a partial catalog behind.
pub fn save_catalog(catalog: &ZoneCatalog, path: &Path) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(&Value::Object(catalog.zones.clone()))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(body.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .with_context(|| format!("write catalog: {}", path.display()))?;
    Ok(())
}
