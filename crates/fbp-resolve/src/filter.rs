//! Narrowing a catalogue to a resolved identifier set

use fbp_manifest::{Component, Module};
use std::collections::HashSet;
use tracing::debug;

use crate::errors::ResolveError;
use crate::lookup::module_claims;
use crate::resolver::resolve;
use crate::ResolveOptions;

/// Keep only the modules and components named by `ids`
///
/// A component is kept when its bare or qualified name is listed. Identifiers claimed by
/// a module's custom loader count as found and keep that module, even with no components.
/// Modules contributing neither are dropped. Fails with every identifier nothing provides.
pub fn filter_modules(modules: &[Module], ids: &[String]) -> Result<Vec<Module>, ResolveError> {
    let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let mut found: HashSet<String> = HashSet::new();
    let mut filtered = Vec::new();

    for module in modules {
        let matched: Vec<Component> = module
            .components
            .iter()
            .filter(|component| {
                let mut hit = false;
                if wanted.contains(component.name.as_str()) {
                    found.insert(component.name.clone());
                    hit = true;
                }
                let qualified = module.qualified_name(component);
                if wanted.contains(qualified.as_str()) {
                    found.insert(qualified);
                    hit = true;
                }
                hit
            })
            .cloned()
            .collect();

        let claimed: Vec<&String> = ids.iter().filter(|id| module_claims(module, id)).collect();
        found.extend(claimed.iter().map(|id| (*id).clone()));

        if matched.is_empty() && claimed.is_empty() {
            continue;
        }
        filtered.push(Module {
            name: module.name.clone(),
            description: module.description.clone(),
            runtime: module.runtime.clone(),
            base: module.base.clone(),
            icon: module.icon.clone(),
            components: matched,
            noflo: module.noflo.clone(),
        });
    }

    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !found.contains(id.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ResolveError::MissingComponents(missing));
    }
    debug!(
        "Filtered catalogue to {} of {} modules",
        filtered.len(),
        modules.len()
    );
    Ok(filtered)
}

/// Resolve `id` and narrow the catalogue to what it needs
pub fn find(
    modules: &[Module],
    id: &str,
    options: &ResolveOptions,
) -> Result<Vec<Module>, ResolveError> {
    let ids = resolve(modules, id, options)?;
    filter_modules(modules, &ids)
}

#[cfg(test)]
mod tests {
    use crate::filter::*;
    use fbp_manifest::NofloModuleInfo;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn component(name: &str, source: Option<&str>) -> Component {
        Component {
            name: name.to_string(),
            source: source.map(str::to_string),
            elementary: source.is_none(),
            ..Default::default()
        }
    }

    fn module(name: &str, base: &str, components: Vec<Component>) -> Module {
        Module {
            name: name.to_string(),
            runtime: "noflo-nodejs".to_string(),
            base: base.to_string(),
            components,
            ..Default::default()
        }
    }

    fn loader_module() -> Module {
        Module {
            name: "loader".to_string(),
            runtime: "noflo".to_string(),
            base: "node_modules/noflo-loader".to_string(),
            noflo: Some(NofloModuleInfo {
                loader: Some("lib/ComponentLoader".to_string()),
            }),
            ..Default::default()
        }
    }

    fn fixture(root: &Path) -> Vec<Module> {
        let graphs = [
            ("graphs/Hello.fbp", "'x' -> IN bar(deps/Bar) OUT -> IN foo(dep/Foo)"),
            ("graphs/Missing.fbp", "'x' -> IN baz(deps/Baz) OUT -> IN foo(deps/Foo)"),
            (
                "graphs/WithLoader.fbp",
                "'x' -> IN any(loader/Anything) OUT -> IN foo(deps/Foo)",
            ),
        ];
        for (path, source) in graphs {
            let full = root.join(path);
            if let Some(parent) = full.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = fs::write(full, source);
        }
        vec![
            module(
                "deps",
                "",
                vec![
                    component("Bar", None),
                    component("Foo", None),
                    component("Hello", Some("graphs/Hello.fbp")),
                    component("Missing", Some("graphs/Missing.fbp")),
                    component("WithLoader", Some("graphs/WithLoader.fbp")),
                ],
            ),
            module(
                "dep",
                "node_modules/noflo-dep",
                vec![component("Bar", None), component("Foo", None)],
            ),
            loader_module(),
        ]
    }

    fn summary(modules: &[Module]) -> Vec<(String, Vec<String>)> {
        modules
            .iter()
            .map(|m| {
                (
                    m.name.clone(),
                    m.components.iter().map(|c| c.name.clone()).collect(),
                )
            })
            .collect()
    }

    fn options(root: &Path) -> ResolveOptions {
        ResolveOptions {
            base_dir: root.to_path_buf(),
            strict: false,
        }
    }

    #[test]
    fn test_find_groups_components_by_module() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let modules = fixture(temp_dir.path());
        let found = find(&modules, "deps/Hello", &options(temp_dir.path()));
        assert!(found.is_ok(), "Find failed: {found:?}");
        assert_eq!(
            summary(&found.unwrap_or_default()),
            vec![
                (
                    "deps".to_string(),
                    vec!["Bar".to_string(), "Hello".to_string()]
                ),
                ("dep".to_string(), vec!["Foo".to_string()]),
            ]
        );
    }

    #[test]
    fn test_missing_dependency_fails() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let modules = fixture(temp_dir.path());
        let err = find(&modules, "deps/Missing", &options(temp_dir.path()));
        assert!(
            matches!(&err, Err(ResolveError::MissingComponents(ids)) if ids == &["deps/Baz"]),
            "{err:?}"
        );
    }

    #[test]
    fn test_loader_module_is_kept_empty() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let modules = fixture(temp_dir.path());
        let found = find(&modules, "deps/WithLoader", &options(temp_dir.path()));
        assert!(found.is_ok(), "Find failed: {found:?}");
        let found = found.unwrap_or_default();
        assert_eq!(
            summary(&found),
            vec![
                (
                    "deps".to_string(),
                    vec!["Foo".to_string(), "WithLoader".to_string()]
                ),
                ("loader".to_string(), Vec::new()),
            ]
        );
        assert_eq!(found[1].loader(), Some("lib/ComponentLoader"));
    }

    #[test]
    fn test_bare_names_match_every_module() {
        let modules = vec![
            module("a", "", vec![component("Foo", None)]),
            module("b", "node_modules/b", vec![component("Foo", None)]),
            module("c", "node_modules/c", vec![component("Bar", None)]),
        ];
        let filtered = filter_modules(&modules, &["Foo".to_string()]);
        let names: Vec<String> = filtered
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_filter_then_resolve_is_idempotent() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let modules = fixture(temp_dir.path());
        let opts = options(temp_dir.path());
        for entry in ["deps/Hello", "deps/WithLoader", "dep/Foo"] {
            let ids = resolve(&modules, entry, &opts).unwrap_or_default();
            let filtered = filter_modules(&modules, &ids).unwrap_or_default();
            let again = resolve(&filtered, entry, &opts).unwrap_or_default();
            assert!(!ids.is_empty());
            assert_eq!(ids, again, "resolving {entry} from filtered catalogue");
        }
    }
}
