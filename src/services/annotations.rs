use crate::domain::models::{AnnotationSet, MergeError, ZoneAnnotation};
use anyhow::Context;
use std::collections::HashSet;
use std::path::PathBuf;

/// Loads one or more annotation files into a single ordered set. A zone
/// may appear in at most one file; the whole run aborts on any
/// structural failure so nothing is ever half-applied.
pub fn load_annotations(paths: &[PathBuf]) -> anyhow::Result<AnnotationSet> {
    let mut set = AnnotationSet::new();
    for path in paths {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read annotations: {}", path.display()))?;
        let file = path.display().to_string();
        let doc: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&raw).map_err(|e| MergeError::MalformedAnnotation {
                file: file.clone(),
                detail: e.to_string(),
            })?;
        for (zone, value) in doc {
            let annotation: ZoneAnnotation =
                serde_json::from_value(value).map_err(|e| MergeError::MalformedAnnotation {
                    file: file.clone(),
                    detail: format!("zone {}: {}", zone, e),
                })?;
            validate_annotation(&file, &zone, &annotation)?;
            if set.insert(zone.clone(), annotation).is_some() {
                return Err(MergeError::MalformedAnnotation {
                    file,
                    detail: format!("zone {}: declared more than once", zone),
                }
                .into());
            }
        }
    }
    Ok(set)
}

fn validate_annotation(
    file: &str,
    zone: &str,
    annotation: &ZoneAnnotation,
) -> Result<(), MergeError> {
    // Town-visit order is unique within each after_zone group.
    if let Some(visits) = &annotation.town_visits {
        let mut seen = HashSet::new();
        for visit in visits {
            if !seen.insert((visit.after_zone.as_str(), visit.order)) {
                return Err(MergeError::MalformedAnnotation {
                    file: file.to_string(),
                    detail: format!(
                        "zone {}: duplicate town visit order {} after {}",
                        zone, visit.order, visit.after_zone
                    ),
                });
            }
        }
    }
    Ok(())
}
