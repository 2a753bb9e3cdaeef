use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Adt, Implementation, Variant};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("unknown template '{name}' (available: {available})")]
    UnknownTemplate { name: String, available: String },
}

/// A schema upgrade applied while importing an older document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
    /// `operations` list converted to `profiles`.
    OperationsToProfiles,
    /// Implementation stored as a bare string converted to a record.
    StringImplementation(Variant),
}

/// Decode a document, upgrading legacy shapes first.
pub fn from_json(text: &str) -> Result<Adt, DocumentError> {
    from_json_with_migrations(text).map(|(adt, _)| adt)
}

/// Like [`from_json`], also reporting which upgrades were applied.
pub fn from_json_with_migrations(text: &str) -> Result<(Adt, Vec<Migration>), DocumentError> {
    let mut value: Value = serde_json::from_str(text)?;
    let migrations = migrate(&mut value)?;
    let adt = serde_json::from_value(value)?;
    Ok((adt, migrations))
}

/// Upgrade a raw document in place to the current schema.
pub fn migrate(value: &mut Value) -> Result<Vec<Migration>, DocumentError> {
    let kind = json_kind(value);
    let Value::Object(doc) = value else {
        return Err(DocumentError::NotAnObject(kind));
    };
    let mut applied = Vec::new();

    let has_profiles = doc.get("profiles").is_some_and(|p| !p.is_null());
    let legacy_profiles = match doc.get("operations") {
        Some(Value::Array(operations)) if !has_profiles => {
            Some(operations.iter().map(operation_to_profile).collect::<Vec<_>>())
        }
        _ => None,
    };
    if let Some(profiles) = legacy_profiles {
        doc.insert("profiles".to_string(), Value::Array(profiles));
        log::debug!("migrated legacy operations list to profiles");
        applied.push(Migration::OperationsToProfiles);
    }

    if let Some(Value::Object(implementations)) = doc.get_mut("implementations") {
        for variant in Variant::ALL {
            let domain_space = match implementations.get(variant.key()) {
                Some(Value::String(text)) => text.clone(),
                _ => continue,
            };
            let record = Implementation {
                domain_space,
                ..Implementation::empty(variant)
            };
            implementations.insert(variant.key().to_string(), serde_json::to_value(record)?);
            log::debug!("migrated string implementation for {}", variant);
            applied.push(Migration::StringImplementation(variant));
        }
    }

    Ok(applied)
}

fn operation_to_profile(operation: &Value) -> Value {
    match operation {
        Value::Object(fields) => {
            let mut profile: Map<String, Value> = fields.clone();
            profile.insert("preconditions".to_string(), Value::Array(Vec::new()));
            Value::Object(profile)
        }
        other => other.clone(),
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

/// Encode a document as pretty-printed JSON.
pub fn to_json(adt: &Adt) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(adt)?)
}

/// File name used when exporting `adt`.
pub fn export_file_name(adt: &Adt) -> String {
    let stem = if adt.name.is_empty() { "adt" } else { adt.name.as_str() };
    format!("{}.json", stem)
}

pub fn load(path: impl AsRef<Path>) -> Result<Adt, DocumentError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&text)
}

pub fn save(adt: &Adt, path: impl AsRef<Path>) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let mut text = to_json(adt)?;
    text.push('\n');
    std::fs::write(path, text).map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}
