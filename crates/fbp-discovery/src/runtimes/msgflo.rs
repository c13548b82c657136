//! MsgFlo package scanner
//!
//! MsgFlo participants are external programs. A package lists them in the `msgflo`
//! section of `package.json` as command templates:
//!
//! ```json
//! "msgflo": {
//!   "variables": {"PYTHON": "python3"},
//!   "components": {"mypkg/Repeat": "#PYTHON repeat.py #COMPONENTNAME"}
//! }
//! ```
//!
//! Each `#NAME` marker is replaced once with the matching variable. `COMPONENTNAME`
//! (the part after `/`) and `COMPONENT` (the full key) are always available.

use fbp_manifest::{Component, Module};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

use crate::errors::DiscoveryError;
use crate::listing::{dir_basename, relative_path};
use crate::package_info::PackageDescriptor;
use crate::runtimes::ScanContext;

pub const RUNTIME: &str = "msgflo";

/// Scan one package directory
pub fn scan(dir: &Path, ctx: &ScanContext<'_>) -> Result<Vec<Module>, DiscoveryError> {
    let Some(descriptor) = PackageDescriptor::read(dir)? else {
        return Ok(Vec::new());
    };
    let Some(msgflo) = descriptor.msgflo else {
        return Ok(Vec::new());
    };
    debug!("Scanning MsgFlo package {:?}", dir);

    let module = Module {
        name: descriptor.name.unwrap_or_else(|| dir_basename(dir)),
        description: descriptor.description,
        runtime: RUNTIME.to_string(),
        base: relative_path(ctx.root, dir),
        icon: msgflo.icon.filter(|icon| !icon.is_empty()),
        components: components_from_templates(&msgflo.variables, &msgflo.components),
        noflo: None,
    };
    Ok(vec![module])
}

fn components_from_templates(
    variables: &Map<String, Value>,
    templates: &Map<String, Value>,
) -> Vec<Component> {
    let mut markers: Vec<(String, String)> = variables
        .iter()
        .map(|(name, value)| (name.clone(), value_text(value)))
        .collect();

    templates
        .iter()
        .filter_map(|(key, template)| {
            let Some(template) = template.as_str() else {
                debug!("Ignoring non-string command template for {}", key);
                return None;
            };
            let name = component_name(key);
            set_marker(&mut markers, "COMPONENTNAME", name);
            set_marker(&mut markers, "COMPONENT", key);
            Some(Component {
                name: name.to_string(),
                exec: Some(expand_template(template, &markers)),
                elementary: false,
                ..Default::default()
            })
        })
        .collect()
}

/// `pkg/Name` -> `Name`; keys without a second segment are used whole
fn component_name(key: &str) -> &str {
    key.split('/')
        .nth(1)
        .filter(|name| !name.is_empty())
        .unwrap_or(key)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn set_marker(markers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match markers.iter_mut().find(|(marker, _)| marker == name) {
        Some((_, current)) => *current = value.to_string(),
        None => markers.push((name.to_string(), value.to_string())),
    }
}

/// Replace the first `#MARKER` occurrence of every marker, in marker order
fn expand_template(template: &str, markers: &[(String, String)]) -> String {
    markers
        .iter()
        .fold(template.to_string(), |command, (name, value)| {
            command.replacen(&format!("#{}", name.to_uppercase()), value, 1)
        })
}
