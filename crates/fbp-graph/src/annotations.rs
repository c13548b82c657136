//! Source annotations shared by component files, graph files and spec files
//!
//! Components and graphs may declare their identifier and target runtime inline:
//! - `@name Hello` overrides the identifier derived from the file name
//! - `@runtime noflo-nodejs` sets the runtime the component targets

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::GraphError;

/// A pattern compiled on first use
///
/// A pattern that fails to compile keeps its error so every lookup reports it.
pub(crate) type Pattern = Lazy<Result<Regex, regex::Error>>;

static NAME_ANNOTATION: Pattern = Lazy::new(|| Regex::new(r"@name ([A-Za-z0-9]+)"));

static RUNTIME_ANNOTATION: Pattern = Lazy::new(|| Regex::new(r"@runtime ([a-z-]+)"));

pub(crate) fn compiled(pattern: &'static Pattern) -> Result<&'static Regex, GraphError> {
    pattern
        .as_ref()
        .map_err(|err| GraphError::Pattern(err.clone()))
}

fn first_capture<'s>(
    pattern: &'static Pattern,
    source: &'s str,
) -> Result<Option<&'s str>, GraphError> {
    Ok(compiled(pattern)?
        .captures(source)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str()))
}

/// Find the `@name` annotation in a source text
pub fn name_annotation(source: &str) -> Result<Option<&str>, GraphError> {
    first_capture(&NAME_ANNOTATION, source)
}

/// Find the `@runtime` annotation in a source text
pub fn runtime_annotation(source: &str) -> Result<Option<&str>, GraphError> {
    first_capture(&RUNTIME_ANNOTATION, source)
}

/// Derive a component identifier from source and its file path
///
/// Uses the `@name` annotation when present, otherwise the file stem
/// (`components/Foo.js` -> `Foo`).
pub fn component_id(source: &str, path: &Path) -> Result<String, GraphError> {
    if let Some(name) = name_annotation(source)? {
        return Ok(name.to_string());
    }
    Ok(path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default())
}
