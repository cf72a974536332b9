mod mapping;
mod normalizer;
mod portable;
mod showcase;
mod validation;

pub use validation::{validate, ValidationReport, ValidationStats};

use crate::inventory::domain::{ImportedInventory, InventorySource};
use chrono::Utc;
use serde_json::error::Category;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use validation::PORTABLE_FORMAT_TAG;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidInput { errors: Vec<String> },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read inventory payload: {}", err),
            ImportError::Json(err) => match err.classify() {
                Category::Io => write!(f, "failed to read inventory payload: {}", err),
                Category::Syntax | Category::Eof => {
                    write!(f, "inventory payload is not valid JSON: {}", err)
                }
                Category::Data => {
                    write!(f, "inventory payload could not be read as an inventory: {}", err)
                }
            },
            ImportError::InvalidInput { errors } => {
                write!(f, "inventory payload rejected: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Json(err) => Some(err),
            ImportError::InvalidInput { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Which input schema a payload follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeAdapter {
    Showcase,
    Portable,
}

impl NormalizeAdapter {
    pub fn detect(payload: &Value) -> Self {
        let is_showcase = payload.get("avatarInfoList").is_some()
            || payload.get("playerInfo").is_some();
        if is_showcase {
            NormalizeAdapter::Showcase
        } else {
            NormalizeAdapter::Portable
        }
    }

    pub const fn source(self) -> InventorySource {
        match self {
            NormalizeAdapter::Showcase => InventorySource::Showcase,
            NormalizeAdapter::Portable => InventorySource::Portable,
        }
    }
}

pub struct InventoryImporter;

impl InventoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportedInventory, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ImportedInventory, ImportError> {
        let payload: Value = serde_json::from_reader(reader)?;
        Self::from_value(payload)
    }

    pub fn from_value(payload: Value) -> Result<ImportedInventory, ImportError> {
        let inventory = match NormalizeAdapter::detect(&payload) {
            NormalizeAdapter::Showcase => import_showcase(payload)?,
            NormalizeAdapter::Portable => import_portable(payload)?,
        };

        info!(
            source = inventory.source.label(),
            holders = inventory.holders.len(),
            items = inventory.items.len(),
            warnings = inventory.warnings.len(),
            "inventory normalized"
        );
        Ok(inventory)
    }
}

fn import_showcase(payload: Value) -> Result<ImportedInventory, ImportError> {
    let raw = showcase::ShowcasePayload::from_object(into_object(payload)?)?;
    let parsed = showcase::normalize(raw);

    Ok(ImportedInventory {
        source: InventorySource::Showcase,
        source_label: InventorySource::Showcase.label().to_string(),
        version: 1,
        player: Some(parsed.player),
        holders: parsed.holders,
        items: parsed.items,
        warnings: parsed.warnings,
        imported_at: Utc::now(),
    })
}

fn import_portable(payload: Value) -> Result<ImportedInventory, ImportError> {
    let raw = portable::PortablePayload::from_object(into_object(payload)?)?;
    let mut warnings = precheck_portable(&raw)?;
    let version = raw.version.unwrap_or(1);
    let source_label = raw
        .source
        .clone()
        .filter(|source| !source.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    let parsed = portable::normalize(raw);
    warnings.extend(parsed.warnings);

    Ok(ImportedInventory {
        source: InventorySource::Portable,
        source_label,
        version,
        player: None,
        holders: parsed.holders,
        items: parsed.items,
        warnings,
        imported_at: Utc::now(),
    })
}

fn into_object(payload: Value) -> Result<Map<String, Value>, ImportError> {
    match payload {
        Value::Object(object) => Ok(object),
        _ => Err(ImportError::InvalidInput {
            errors: vec!["payload is not a JSON object".to_string()],
        }),
    }
}

/// Removes a top-level record collection. Absent and `null` both read as
/// `None`; any other non-array value rejects the payload.
fn take_records(
    object: &mut Map<String, Value>,
    field: &str,
) -> Result<Option<Vec<Value>>, ImportError> {
    match object.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(records)) => Ok(Some(records)),
        Some(other) => Err(ImportError::InvalidInput {
            errors: vec![format!(
                "\"{field}\" must be an array, found {}",
                json_kind(&other)
            )],
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Structural gate in front of the portable adapter. Returns the warnings to
/// carry into the imported inventory.
fn precheck_portable(raw: &portable::PortablePayload) -> Result<Vec<String>, ImportError> {
    let format = raw.format.as_deref();
    if format != Some(PORTABLE_FORMAT_TAG) && !raw.has_collections() {
        return Err(ImportError::InvalidInput {
            errors: vec![format!(
                "payload is neither a \"{PORTABLE_FORMAT_TAG}\" export nor carries artifacts or characters"
            )],
        });
    }

    let mut warnings = Vec::new();
    if let Some(format) = format.filter(|format| *format != PORTABLE_FORMAT_TAG) {
        warn!(format, "portable payload carries an unexpected format tag");
        warnings.push(format!(
            "format is \"{format}\" instead of \"{PORTABLE_FORMAT_TAG}\"; parsing may be incomplete"
        ));
    }

    Ok(warnings)
}
