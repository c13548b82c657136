//! Package name normalization
//!
//! Module names are derived from package names by dropping the npm scope and the
//! `noflo-` family prefix: `@flowhub/noflo-core` and `noflo-core` both become `core`.
//! The `noflo` package itself provides the unnamed base module.

const FAMILY_PACKAGE: &str = "noflo";
const FAMILY_PREFIX: &str = "noflo-";

/// Derive a module name from a package name
pub fn normalize_package_name(name: &str) -> String {
    if name == FAMILY_PACKAGE {
        return String::new();
    }
    let unscoped = strip_scope(name);
    unscoped
        .strip_prefix(FAMILY_PREFIX)
        .unwrap_or(unscoped)
        .to_string()
}

/// Strip a leading `@scope/` where the scope is lowercase letters and dashes
fn strip_scope(name: &str) -> &str {
    let Some(scoped) = name.strip_prefix('@') else {
        return name;
    };
    let Some((scope, rest)) = scoped.split_once('/') else {
        return name;
    };
    if !scope.is_empty() && scope.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
        rest
    } else {
        name
    }
}
