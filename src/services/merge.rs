use crate::domain::models::{
    AnnotationSet, MergeError, MergeReport, MergeWarning, StepOrder, WalkthroughStep,
    ZoneAnnotation,
};
use crate::services::catalog::ZoneCatalog;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct MergePolicy {
    pub auto_create_zones: bool,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            auto_create_zones: true,
        }
    }
}

/// Applies the annotation set to the catalog in memory. Annotated fields
/// are set or replaced; every other field of every entry stays as loaded.
/// The caller decides whether the result is persisted.
pub fn merge(
    catalog: &mut ZoneCatalog,
    annotations: &AnnotationSet,
    policy: MergePolicy,
) -> anyhow::Result<MergeReport> {
    let mut report = MergeReport::default();
    for (zone, annotation) in annotations {
        if catalog.zones.contains_key(zone) {
            report.zones_updated.push(zone.clone());
        } else {
            if !policy.auto_create_zones {
                return Err(MergeError::UnknownZoneReference(zone.clone()).into());
            }
            catalog.zones.insert(zone.clone(), Value::Object(Map::new()));
            report.zones_created.push(zone.clone());
            report.warnings.push(MergeWarning {
                code: "zone_created".to_string(),
                zone: zone.clone(),
                detail: "zone missing from catalog, entry created".to_string(),
            });
        }
        let Some(entry) = catalog.zones.get_mut(zone).and_then(Value::as_object_mut) else {
            return Err(MergeError::MalformedCatalog {
                detail: format!("zone {}: entry must be an object", zone),
            }
            .into());
        };
        apply_annotation(zone, entry, annotation, &mut report)?;
    }
    Ok(report)
}

fn apply_annotation(
    zone: &str,
    entry: &mut Map<String, Value>,
    annotation: &ZoneAnnotation,
    report: &mut MergeReport,
) -> anyhow::Result<()> {
    if let Some(notes) = &annotation.notes {
        entry.insert("notes".to_string(), Value::String(notes.clone()));
    }
    if !annotation.pois.is_empty() {
        let pois = entry
            .entry("pois")
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(pois) = pois.as_object_mut() else {
            return Err(MergeError::MalformedCatalog {
                detail: format!("zone {}: field pois must be an object", zone),
            }
            .into());
        };
        for (name, info) in &annotation.pois {
            let value = serde_json::to_value(info)?;
            if pois.insert(name.clone(), value).is_some() {
                report.pois_overwritten += 1;
            } else {
                report.pois_added += 1;
            }
        }
    }
    if let Some(steps) = &annotation.walkthrough_steps {
        report
            .warnings
            .extend(duplicate_order_warnings(zone, steps));
        let normalized = normalize_steps(steps);
        entry.insert(
            "walkthrough_steps".to_string(),
            serde_json::to_value(&normalized)?,
        );
        report.steps_replaced += normalized.len();
    }
    if let Some(visits) = &annotation.town_visits {
        entry.insert("town_visits".to_string(), serde_json::to_value(visits)?);
        report.visits_replaced += visits.len();
    }
    Ok(())
}

/// Stable sort: numbered orders ascend, `"opt"` steps land after every
/// numbered step, authoring order is preserved among equals.
pub fn normalize_steps(steps: &[WalkthroughStep]) -> Vec<WalkthroughStep> {
    let mut out = steps.to_vec();
    out.sort_by_key(|step| step.order.rank());
    out
}

/// Two steps sharing a numeric order are only worth flagging when their
/// actions disagree; re-authored identical rows stay silent.
fn duplicate_order_warnings(zone: &str, steps: &[WalkthroughStep]) -> Vec<MergeWarning> {
    let mut actions_by_order: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for step in steps {
        if let StepOrder::Numbered(n) = step.order {
            actions_by_order.entry(n).or_default().push(&step.action);
        }
    }
    let mut warnings = Vec::new();
    for (order, actions) in actions_by_order {
        let mut distinct: Vec<&str> = actions.clone();
        distinct.dedup();
        if distinct.len() > 1 {
            warnings.push(MergeWarning {
                code: "duplicate_step_order".to_string(),
                zone: zone.to_string(),
                detail: format!(
                    "step order {} shared by conflicting actions: {}",
                    order,
                    actions.join(" / ")
                ),
            });
        }
    }
    warnings
}
