//! Structural validation of manifest documents
//!
//! Checks a raw JSON document against the rules of the FBP manifest format and reports
//! every violation with the JSON pointer of the offending value, e.g.
//! `/modules/0/components/2/name: must be a non-empty string`.

use crate::errors::ManifestError;
use crate::types::MANIFEST_VERSION;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Validate a manifest file on disk
pub fn validate_file(path: &Path) -> Result<(), ManifestError> {
    debug!("Validating manifest file: {:?}", path);
    let content = std::fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
    validate_str(&content)
}

/// Validate manifest JSON text
pub fn validate_str(content: &str) -> Result<(), ManifestError> {
    let value: Value = serde_json::from_str(content)?;
    validate_value(&value)
}

/// Validate an already-parsed manifest document
pub fn validate_value(value: &Value) -> Result<(), ManifestError> {
    let mut violations = Vec::new();
    check_manifest(value, &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ManifestError::Invalid(violations))
    }
}

fn check_manifest(value: &Value, violations: &mut Vec<String>) {
    let Some(manifest) = value.as_object() else {
        violations.push(": must be an object".to_string());
        return;
    };

    match manifest.get("version") {
        Some(version) if version.as_u64() == Some(u64::from(MANIFEST_VERSION)) => {}
        Some(_) => violations.push(format!("/version: must be {MANIFEST_VERSION}")),
        None => violations.push("/version: is required".to_string()),
    }

    match manifest.get("modules") {
        Some(Value::Array(modules)) => {
            for (idx, module) in modules.iter().enumerate() {
                check_module(module, &format!("/modules/{idx}"), violations);
            }
        }
        Some(_) => violations.push("/modules: must be an array".to_string()),
        None => violations.push("/modules: is required".to_string()),
    }

    if let Some(main) = manifest.get("main") {
        check_component(main, "/main", violations);
    }
}

fn check_module(value: &Value, pointer: &str, violations: &mut Vec<String>) {
    let Some(module) = value.as_object() else {
        violations.push(format!("{pointer}: must be an object"));
        return;
    };

    for key in ["name", "runtime", "base"] {
        required_string(module, key, pointer, false, violations);
    }
    for key in ["description", "icon"] {
        optional_string(module, key, pointer, violations);
    }

    match module.get("components") {
        Some(Value::Array(components)) => {
            for (idx, component) in components.iter().enumerate() {
                check_component(component, &format!("{pointer}/components/{idx}"), violations);
            }
        }
        Some(_) => violations.push(format!("{pointer}/components: must be an array")),
        None => violations.push(format!("{pointer}/components: is required")),
    }
}

fn check_component(value: &Value, pointer: &str, violations: &mut Vec<String>) {
    let Some(component) = value.as_object() else {
        violations.push(format!("{pointer}: must be an object"));
        return;
    };

    required_string(component, "name", pointer, true, violations);
    for key in ["description", "path", "source", "tests", "exec"] {
        optional_string(component, key, pointer, violations);
    }
    if let Some(elementary) = component.get("elementary") {
        if !elementary.is_boolean() {
            violations.push(format!("{pointer}/elementary: must be a boolean"));
        }
    }

    for ports_key in ["inports", "outports"] {
        match component.get(ports_key) {
            None => {}
            Some(Value::Array(ports)) => {
                for (idx, port) in ports.iter().enumerate() {
                    check_port(port, &format!("{pointer}/{ports_key}/{idx}"), violations);
                }
            }
            Some(_) => violations.push(format!("{pointer}/{ports_key}: must be an array")),
        }
    }
}

fn check_port(value: &Value, pointer: &str, violations: &mut Vec<String>) {
    let Some(port) = value.as_object() else {
        violations.push(format!("{pointer}: must be an object"));
        return;
    };
    required_string(port, "name", pointer, true, violations);
    required_string(port, "type", pointer, false, violations);
    optional_string(port, "description", pointer, violations);
    for key in ["addressable", "required"] {
        if port.get(key).is_some_and(|v| !v.is_boolean()) {
            violations.push(format!("{pointer}/{key}: must be a boolean"));
        }
    }
}

fn required_string(
    object: &Map<String, Value>,
    key: &str,
    pointer: &str,
    non_empty: bool,
    violations: &mut Vec<String>,
) {
    match object.get(key) {
        Some(Value::String(s)) if non_empty && s.is_empty() => {
            violations.push(format!("{pointer}/{key}: must be a non-empty string"));
        }
        Some(Value::String(_)) => {}
        Some(_) => violations.push(format!("{pointer}/{key}: must be a string")),
        None => violations.push(format!("{pointer}/{key}: is required")),
    }
}

fn optional_string(
    object: &Map<String, Value>,
    key: &str,
    pointer: &str,
    violations: &mut Vec<String>,
) {
    if object.get(key).is_some_and(|v| !v.is_string()) {
        violations.push(format!("{pointer}/{key}: must be a string"));
    }
}
