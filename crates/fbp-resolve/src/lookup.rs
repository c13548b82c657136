//! Catalogue lookups by component identifier
//!
//! An identifier is either a bare component name (`Foo`) or qualified with its module
//! name (`core/Foo`).

use fbp_manifest::{Component, Module};

/// First component matching `id` by bare or qualified name, in catalogue order
pub fn find_component<'a>(modules: &'a [Module], id: &str) -> Option<&'a Component> {
    modules.iter().find_map(|module| {
        module
            .components
            .iter()
            .find(|component| matches_component(module, component, id))
    })
}

pub(crate) fn matches_component(module: &Module, component: &Component, id: &str) -> bool {
    component.name == id || module.qualified_name(component) == id
}

/// Whether `module` registers a custom loader for the namespace of `id`
///
/// The namespace is the part of the identifier before the first `/`.
pub fn module_claims(module: &Module, id: &str) -> bool {
    if id.is_empty() || module.loader().is_none() {
        return false;
    }
    id.split('/').next() == Some(module.name.as_str())
}

/// Whether any module's custom loader claims `id`
pub fn has_custom_loader(modules: &[Module], id: &str) -> bool {
    modules.iter().any(|module| module_claims(module, id))
}

#[cfg(test)]
mod tests {
    use crate::lookup::*;
    use fbp_manifest::NofloModuleInfo;

    fn catalogue() -> Vec<Module> {
        vec![
            Module {
                name: "basic".to_string(),
                runtime: "noflo".to_string(),
                components: vec![Component {
                    name: "Foo".to_string(),
                    elementary: true,
                    ..Default::default()
                }],
                ..Default::default()
            },
            Module {
                name: "loader".to_string(),
                runtime: "noflo".to_string(),
                base: "node_modules/noflo-loader".to_string(),
                noflo: Some(NofloModuleInfo {
                    loader: Some("lib/ComponentLoader".to_string()),
                }),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_find_component_by_bare_and_qualified_name() {
        let modules = catalogue();
        assert!(find_component(&modules, "Foo").is_some_and(|c| c.name == "Foo"));
        assert!(find_component(&modules, "basic/Foo").is_some_and(|c| c.name == "Foo"));
        assert!(find_component(&modules, "other/Foo").is_none());
        assert!(find_component(&modules, "Bar").is_none());
    }

    #[test]
    fn test_custom_loader_claims() {
        let modules = catalogue();
        assert!(has_custom_loader(&modules, "loader/Anything"));
        assert!(has_custom_loader(&modules, "loader"));
        assert!(!has_custom_loader(&modules, "basic/Anything"));
        assert!(!has_custom_loader(&modules, ""));
        assert!(!module_claims(&modules[0], "basic/Foo"));
    }
}
