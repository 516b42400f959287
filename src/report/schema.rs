use serde_json::{Map, Value};
use thiserror::Error;

use super::photos::{PhotoSlot, Photos};
use super::vocab::Vocabulary;
use super::{AppraisalReport, ComponentStatus, Performance};

/// Reasons an incoming report is refused. `path` is the dotted JSON path
/// of the offending field, e.g. `status.dial` or `photos.others[2]`.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("report is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path}: expected an object")]
    NotAnObject { path: String },

    #[error("{path}: required field is missing")]
    MissingField { path: String },

    #[error("{path}: expected {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("{path}: {value:?} is not one of [{allowed}]")]
    InvalidValue {
        path: String,
        value: String,
        allowed: String,
    },
}

impl SchemaError {
    /// Dotted path of the field at fault, if the error concerns one.
    pub fn path(&self) -> Option<&str> {
        match self {
            SchemaError::Json(_) => None,
            SchemaError::NotAnObject { path }
            | SchemaError::MissingField { path }
            | SchemaError::WrongType { path, .. }
            | SchemaError::InvalidValue { path, .. } => Some(path),
        }
    }
}

// ── Field access helpers ───────────────────────────────────────────

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value.as_object().ok_or_else(|| SchemaError::NotAnObject {
        path: if path.is_empty() { "$".to_string() } else { path.to_string() },
    })
}

fn required<'a>(obj: &'a Map<String, Value>, parent: &str, key: &str) -> Result<&'a Value, SchemaError> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(SchemaError::MissingField {
            path: join(parent, key),
        }),
        Some(value) => Ok(value),
    }
}

fn string(obj: &Map<String, Value>, parent: &str, key: &str) -> Result<String, SchemaError> {
    required(obj, parent, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SchemaError::WrongType {
            path: join(parent, key),
            expected: "a string",
        })
}

fn vocab<T: Vocabulary>(obj: &Map<String, Value>, parent: &str, key: &str) -> Result<T, SchemaError> {
    let value = string(obj, parent, key)?;
    T::from_label(&value).ok_or_else(|| SchemaError::InvalidValue {
        path: join(parent, key),
        value,
        allowed: T::allowed(),
    })
}

fn string_list(obj: &Map<String, Value>, parent: &str, key: &str) -> Result<Vec<String>, SchemaError> {
    let path = join(parent, key);
    let items = required(obj, parent, key)?
        .as_array()
        .ok_or_else(|| SchemaError::WrongType {
            path: path.clone(),
            expected: "an array of strings",
        })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| SchemaError::WrongType {
                path: format!("{}[{}]", path, i),
                expected: "a string",
            })
        })
        .collect()
}

/// Optional URL slot: absent, `null` and `""` all mean no photo.
fn optional_url(obj: &Map<String, Value>, parent: &str, key: &str) -> Result<Option<String>, SchemaError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(SchemaError::WrongType {
            path: join(parent, key),
            expected: "a URL string",
        }),
    }
}

// ── Sections ───────────────────────────────────────────────────────

fn component_status(obj: &Map<String, Value>) -> Result<ComponentStatus, SchemaError> {
    let status = as_object(required(obj, "", "status")?, "status")?;
    let p = "status";
    Ok(ComponentStatus {
        case: vocab(status, p, "case")?,
        strap: vocab(status, p, "strap")?,
        crystal: vocab(status, p, "crystal")?,
        caseback: vocab(status, p, "caseback")?,
        hands: vocab(status, p, "hands")?,
        crown: vocab(status, p, "crown")?,
        buckle: vocab(status, p, "buckle")?,
        dial: vocab(status, p, "dial")?,
    })
}

fn performance(obj: &Map<String, Value>) -> Result<Performance, SchemaError> {
    let perf = as_object(required(obj, "", "performance")?, "performance")?;
    let p = "performance";
    Ok(Performance {
        function: vocab(perf, p, "function")?,
        movement: vocab(perf, p, "movement")?,
        waterproof: vocab(perf, p, "waterproof")?,
    })
}

fn photos(obj: &Map<String, Value>) -> Result<Photos, SchemaError> {
    let record = as_object(required(obj, "", "photos")?, "photos")?;
    let p = "photos";
    let url = |slot: PhotoSlot| optional_url(record, p, slot.key());
    Ok(Photos {
        front: url(PhotoSlot::Front)?,
        back: url(PhotoSlot::Back)?,
        side1: url(PhotoSlot::Side1)?,
        side2: url(PhotoSlot::Side2)?,
        buckle: url(PhotoSlot::Buckle)?,
        card: url(PhotoSlot::Card)?,
        others: string_list(record, p, "others")?,
    })
}

// ── Entry points ───────────────────────────────────────────────────

/// Check a JSON value against the report shape and build the report.
///
/// Fails on the first missing mandatory field or out-of-vocabulary value;
/// nothing is defaulted.
pub fn validate(value: &Value) -> Result<AppraisalReport, SchemaError> {
    let obj = as_object(value, "")?;

    Ok(AppraisalReport {
        brand: string(obj, "", "brand")?,
        warranty_date: string(obj, "", "warrantyDate")?,
        model_number: string(obj, "", "modelNumber")?,
        serial_number: string(obj, "", "serialNumber")?,
        overall_result: vocab(obj, "", "overallResult")?,
        movement_result: vocab(obj, "", "movementResult")?,
        card_result: vocab(obj, "", "cardResult")?,
        package_result: vocab(obj, "", "packageResult")?,
        status: component_status(obj)?,
        performance: performance(obj)?,
        notes: string(obj, "", "notes")?,
        tags: string_list(obj, "", "tags")?,
        photos: photos(obj)?,
    })
}

/// Parse report JSON text and validate it.
pub fn parse(text: &str) -> Result<AppraisalReport, SchemaError> {
    let value: Value = serde_json::from_str(text)?;
    validate(&value)
}
