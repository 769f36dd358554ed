use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PoiInfo {
    pub optional: bool,
    pub location_hint: String,
}

/// Position of a walkthrough step. The catalog stores either a plain
/// number or the sentinel string `"opt"` for steps that carry no fixed
/// position and belong after every numbered step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOrder {
    Numbered(u32),
    Unordered,
}

impl StepOrder {
    /// Sort key: numbered steps ascend, unordered steps come last.
    pub fn rank(&self) -> (u8, u32) {
        match self {
            StepOrder::Numbered(n) => (0, *n),
            StepOrder::Unordered => (1, 0),
        }
    }
}

impl Serialize for StepOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StepOrder::Numbered(n) => serializer.serialize_u32(*n),
            StepOrder::Unordered => serializer.serialize_str("opt"),
        }
    }
}

impl<'de> Deserialize<'de> for StepOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Number(n) => {
                let Some(n) = n.as_u64() else {
                    return Err(D::Error::custom(format!(
                        "step order must be a non-negative integer, got {}",
                        n
                    )));
                };
                u32::try_from(n)
                    .map(StepOrder::Numbered)
                    .map_err(|_| D::Error::custom(format!("step order {} out of range", n)))
            }
            serde_json::Value::String(s) if s == "opt" => Ok(StepOrder::Unordered),
            other => Err(D::Error::custom(format!(
                "step order must be an integer or \"opt\", got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WalkthroughStep {
    pub order: StepOrder,
    pub action: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub tip: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TownVisit {
    pub after_zone: String,
    pub instructions: String,
    pub order: u32,
}

/// Everything an annotation file may say about one zone. A subset of the
/// catalog entry's curated fields; every other entry field is opaque to
/// the merger and survives untouched.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ZoneAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub pois: IndexMap<String, PoiInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walkthrough_steps: Option<Vec<WalkthroughStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_visits: Option<Vec<TownVisit>>,
}

/// Ordered zone name -> annotation, accumulated across annotation files.
pub type AnnotationSet = IndexMap<String, ZoneAnnotation>;

#[derive(Debug, Serialize, Clone)]
pub struct MergeWarning {
    pub code: String,
    pub zone: String,
    pub detail: String,
}

#[derive(Debug, Serialize, Default)]
pub struct MergeReport {
    pub zones_updated: Vec<String>,
    pub zones_created: Vec<String>,
    pub pois_added: usize,
    pub pois_overwritten: usize,
    pub steps_replaced: usize,
    pub visits_replaced: usize,
    pub warnings: Vec<MergeWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<String>,
}

#[derive(Serialize)]
pub struct ZoneSummary {
    pub zone: String,
    pub has_notes: bool,
    pub pois: usize,
    pub steps: usize,
    pub town_visits: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum MergeError {
    #[error("malformed catalog: {detail}")]
    MalformedCatalog { detail: String },
    #[error("malformed annotation ({file}): {detail}")]
    MalformedAnnotation { file: String, detail: String },
    #[error("annotation references unknown zone: {0}")]
    UnknownZoneReference(String),
}

impl MergeError {
    pub fn code(&self) -> &'static str {
        match self {
            MergeError::MalformedCatalog { .. } => "MALFORMED_CATALOG",
            MergeError::MalformedAnnotation { .. } => "MALFORMED_ANNOTATION",
            MergeError::UnknownZoneReference(_) => "UNKNOWN_ZONE",
        }
    }
}
