//! NoFlo package scanner
//!
//! A NoFlo package keeps code components in `components/`, graph components in `graphs/`
//! and their tests in `spec/`. Package metadata comes from `package.json`, where the
//! `noflo` section may carry an `icon` and a custom component `loader`.
//!
//! Components are bucketed into one module per target runtime (`noflo`, `noflo-nodejs`,
//! `noflo-browser`), taken from the `@runtime` annotation or the graph environment.

use fbp_graph::annotations::{component_id, runtime_annotation};
use fbp_graph::json::parse_properties;
use fbp_graph::{Environment, GraphFormat};
use fbp_manifest::{Component, Module, NofloModuleInfo};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::dependency_dirs::list_dependency_dirs;
use crate::errors::DiscoveryError;
use crate::listing::{
    canonical, dir_basename, has_extension, read_source, relative_path, sorted_entries,
};
use crate::naming::normalize_package_name;
use crate::package_info::PackageDescriptor;
use crate::runtimes::ScanContext;

/// Runtime tags a NoFlo component may target
pub const SUPPORTED_RUNTIMES: [&str; 3] = ["noflo", "noflo-nodejs", "noflo-browser"];

/// Directory holding installed dependency packages
pub const DEPENDENCY_DIR: &str = "node_modules";

const DEFAULT_RUNTIME: &str = "noflo";
const COMPONENT_EXTENSIONS: [&str; 4] = ["coffee", "ts", "js", "litcoffee"];
const SPEC_EXTENSIONS: [&str; 5] = ["coffee", "ts", "js", "yaml", "yml"];
const DECLARATIVE_SPEC_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// A discovered component before it is attached to a module
#[derive(Debug)]
struct TaggedComponent {
    runtime: String,
    component: Component,
}

/// Package metadata shared by every module of one package
#[derive(Debug)]
struct PackageMetadata {
    name: String,
    description: Option<String>,
    icon: Option<String>,
    loader: Option<String>,
}

impl PackageMetadata {
    fn read(dir: &Path) -> Result<Self, DiscoveryError> {
        let descriptor = PackageDescriptor::read(dir)?.unwrap_or_default();
        let raw_name = descriptor.name.unwrap_or_else(|| dir_basename(dir));
        let noflo = descriptor.noflo.unwrap_or_default();
        Ok(PackageMetadata {
            name: normalize_package_name(&raw_name),
            description: descriptor.description,
            icon: noflo.icon.filter(|icon| !icon.is_empty()),
            loader: noflo.loader.filter(|loader| !loader.is_empty()),
        })
    }

    fn module(&self, runtime: String, base: String, components: Vec<Component>) -> Module {
        Module {
            name: self.name.clone(),
            description: self.description.clone(),
            runtime,
            base,
            icon: self.icon.clone(),
            components,
            noflo: self.loader.as_ref().map(|loader| NofloModuleInfo {
                loader: Some(loader.clone()),
            }),
        }
    }
}

/// Scan one package directory
pub fn scan(dir: &Path, ctx: &ScanContext<'_>) -> Result<Vec<Module>, DiscoveryError> {
    debug!("Scanning NoFlo package {:?}", dir);
    let package = PackageMetadata::read(dir)?;
    let components = list_components(&dir.join("components"), ctx, &[])?;
    let graphs = list_graphs(&dir.join("graphs"), ctx)?;
    let found_any = !components.is_empty() || !graphs.is_empty();

    let mut by_runtime: Vec<(String, Vec<Component>)> = Vec::new();
    for tagged in components.into_iter().chain(graphs) {
        match by_runtime
            .iter_mut()
            .find(|(runtime, _)| *runtime == tagged.runtime)
        {
            Some((_, bucket)) => bucket.push(tagged.component),
            None => by_runtime.push((tagged.runtime, vec![tagged.component])),
        }
    }

    let base = relative_path(ctx.root, dir);
    let mut modules: Vec<Module> = by_runtime
        .into_iter()
        .map(|(runtime, components)| package.module(runtime, base.clone(), components))
        .collect();

    if !found_any && package.loader.is_some() {
        debug!("Registering loader-only package {:?}", package.name);
        modules.push(package.module(DEFAULT_RUNTIME.to_string(), base, Vec::new()));
    }

    if !modules.is_empty() {
        attach_specs(&mut modules, &dir.join("spec"), ctx)?;
    }
    Ok(modules)
}

/// Nested `node_modules` packages
pub fn dependency_dirs(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    list_dependency_dirs(dir, DEPENDENCY_DIR)
}

fn is_supported(runtime: &str) -> bool {
    SUPPORTED_RUNTIMES.contains(&runtime)
}

/// Runtime tag with `all` and missing tags mapped to the generic runtime
fn runtime_tag(tag: Option<&str>) -> String {
    match tag {
        None | Some("all") => DEFAULT_RUNTIME.to_string(),
        Some(tag) => tag.to_string(),
    }
}

fn is_component_source(path: &Path) -> bool {
    let is_declaration = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().contains(".d.ts"));
    has_extension(path, &COMPONENT_EXTENSIONS) && !is_declaration
}

/// Elementary components under `dir`
///
/// `ancestors` holds the canonical directories already being listed above `dir`.
fn list_components(
    dir: &Path,
    ctx: &ScanContext<'_>,
    ancestors: &[PathBuf],
) -> Result<Vec<TaggedComponent>, DiscoveryError> {
    let (sources, others): (Vec<_>, Vec<_>) = sorted_entries(dir)?
        .into_iter()
        .partition(|entry| is_component_source(entry.path()));

    let mut components = Vec::new();
    for entry in sources.iter().filter(|entry| entry.file_type().is_file()) {
        let path = entry.path();
        let source = read_source(path)?;
        let relative = relative_path(ctx.root, path);
        components.push(TaggedComponent {
            runtime: runtime_tag(runtime_annotation(&source)?),
            component: Component {
                name: component_id(&source, path)?,
                path: Some(relative.clone()),
                source: Some(relative),
                elementary: true,
                ..Default::default()
            },
        });
    }

    if ctx.subdirs {
        let mut chain = ancestors.to_vec();
        chain.push(canonical(dir));
        let subdirs: Vec<&Path> = others
            .iter()
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| entry.path())
            .filter(|subdir| !revisits(subdir, &chain))
            .collect();
        if !subdirs.is_empty() && ancestors.len() >= ctx.max_depth {
            warn!(
                "Not descending into {} subdirectories of {:?}: nesting limit {} reached",
                subdirs.len(),
                dir,
                ctx.max_depth
            );
        } else {
            let nested = subdirs
                .par_iter()
                .map(|subdir| list_components(subdir, ctx, &chain))
                .collect::<Result<Vec<_>, _>>()?;
            components.extend(nested.into_iter().flatten());
        }
    }

    components.retain(|tagged| is_supported(&tagged.runtime));
    Ok(components)
}

fn revisits(subdir: &Path, chain: &[PathBuf]) -> bool {
    let resolved = canonical(subdir);
    if chain.contains(&resolved) {
        warn!("Skipping {:?}: symlink loop back to {:?}", subdir, resolved);
        return true;
    }
    false
}

fn list_graphs(dir: &Path, ctx: &ScanContext<'_>) -> Result<Vec<TaggedComponent>, DiscoveryError> {
    let mut graphs = Vec::new();
    for entry in sorted_entries(dir)? {
        let path = entry.path();
        let Some(format) = GraphFormat::from_path(path) else {
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let source = read_source(path)?;

        let (name, runtime) = match format {
            GraphFormat::Fbp => (
                component_id(&source, path)?,
                runtime_tag(runtime_annotation(&source)?),
            ),
            GraphFormat::Json => {
                let properties = parse_properties(&source, path)?;
                if properties.is_main() {
                    debug!("Skipping main graph {:?}", path);
                    continue;
                }
                let name = match properties.id() {
                    Some(id) => id.to_string(),
                    None => component_id(&source, path)?,
                };
                let runtime = match properties.environment() {
                    Environment::Unspecified => runtime_tag(None),
                    Environment::Runtime(runtime) => runtime_tag(Some(runtime)),
                    Environment::Unrecognized => {
                        debug!("Skipping graph {:?} with unrecognized environment", path);
                        continue;
                    }
                };
                (name, runtime)
            }
        };

        if !is_supported(&runtime) {
            debug!("Skipping graph {:?} for runtime {}", path, runtime);
            continue;
        }
        let relative = relative_path(ctx.root, path);
        graphs.push(TaggedComponent {
            runtime,
            component: Component {
                name,
                path: Some(relative.clone()),
                source: Some(relative),
                elementary: false,
                ..Default::default()
            },
        });
    }
    Ok(graphs)
}

/// Map component identifiers to spec files, preferring declarative specs
fn list_specs(dir: &Path) -> Result<HashMap<String, PathBuf>, DiscoveryError> {
    let mut specs: HashMap<String, PathBuf> = HashMap::new();
    for entry in sorted_entries(dir)? {
        let path = entry.path();
        if !has_extension(path, &SPEC_EXTENSIONS) || !entry.file_type().is_file() {
            continue;
        }
        let source = read_source(path)?;
        let id = component_id(&source, path)?;
        if specs
            .get(&id)
            .is_some_and(|existing| has_extension(existing, &DECLARATIVE_SPEC_EXTENSIONS))
        {
            continue;
        }
        specs.insert(id, path.to_path_buf());
    }
    Ok(specs)
}

fn attach_specs(
    modules: &mut [Module],
    spec_dir: &Path,
    ctx: &ScanContext<'_>,
) -> Result<(), DiscoveryError> {
    let specs = list_specs(spec_dir)?;
    if specs.is_empty() {
        return Ok(());
    }
    for component in modules.iter_mut().flat_map(|m| m.components.iter_mut()) {
        if let Some(spec) = specs.get(&component.name) {
            component.tests = Some(relative_path(ctx.root, spec));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::runtimes::noflo::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(path, content);
    }

    fn scan_dir(root: &Path, subdirs: bool) -> Vec<Module> {
        let ctx = ScanContext {
            root,
            subdirs,
            max_depth: 8,
        };
        let modules = scan(root, &ctx);
        assert!(modules.is_ok(), "Scan failed: {modules:?}");
        modules.unwrap_or_default()
    }

    fn names(module: &Module) -> Vec<&str> {
        module.components.iter().map(|c| c.name.as_str()).collect()
    }

    fn basic_package(root: &Path) {
        write(root, "package.json", r#"{"name": "noflo-basic", "description": "Basic"}"#);
        write(root, "components/Foo.js", "// @name Foo\nexports.getComponent = () => {};");
        write(root, "components/Bar.js", "// @runtime noflo-nodejs");
        write(root, "components/Baz.coffee", "# @runtime noflo-nodejs");
        write(root, "components/Java.js", "// @runtime java");
        write(root, "components/types.d.ts", "// @runtime noflo-nodejs");
        write(root, "components/README.md", "# @runtime noflo-nodejs");
        write(
            root,
            "graphs/BrowserGraph.json",
            r#"{"properties": {"environment": {"type": "noflo-browser"}}, "processes": {}}"#,
        );
        write(
            root,
            "graphs/ExampleSubgraph.json",
            r#"{"properties": {"environment": {"type": "noflo-nodejs"}}, "processes": {"baz": {"component": "Baz"}}}"#,
        );
        write(root, "graphs/Hello.fbp", "# @runtime noflo-nodejs\n'x' -> IN Bar(Bar)");
        write(
            root,
            "graphs/Main.json",
            r#"{"properties": {"main": true, "environment": "noflo-nodejs"}}"#,
        );
        write(root, "graphs/notes.txt", "not a graph");
        write(root, "spec/ExampleSubgraph.yaml", "topic: ExampleSubgraph");
        write(root, "spec/ZExampleSubgraph.coffee", "# @name ExampleSubgraph");
        write(root, "spec/Foo.js", "describe('Foo')");
    }

    #[test]
    fn test_scan_groups_by_runtime() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        basic_package(temp_dir.path());
        let modules = scan_dir(temp_dir.path(), true);

        let runtimes: Vec<&str> = modules.iter().map(|m| m.runtime.as_str()).collect();
        assert_eq!(runtimes, vec!["noflo-nodejs", "noflo", "noflo-browser"]);
        assert!(modules.iter().all(|m| m.name == "basic" && m.base.is_empty()));

        assert_eq!(
            names(&modules[0]),
            vec!["Bar", "Baz", "ExampleSubgraph", "Hello"]
        );
        assert!(modules[0].components[1].elementary);
        assert!(!modules[0].components[2].elementary);
        assert_eq!(
            modules[0].components[2].tests.as_deref(),
            Some("spec/ExampleSubgraph.yaml")
        );
        assert_eq!(
            modules[0].components[3].source.as_deref(),
            Some("graphs/Hello.fbp")
        );

        assert_eq!(names(&modules[1]), vec!["Foo"]);
        assert_eq!(modules[1].components[0].tests.as_deref(), Some("spec/Foo.js"));
        assert_eq!(names(&modules[2]), vec!["BrowserGraph"]);
        assert_eq!(modules[2].description.as_deref(), Some("Basic"));
    }

    #[test]
    fn test_subdirectories() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        write(root, "components/Top.js", "");
        write(root, "components/nested/Inner.js", "");
        write(root, "components/nested/deeper/Deepest.coffee", "");

        let modules = scan_dir(root, true);
        assert_eq!(modules.len(), 1);
        assert_eq!(names(&modules[0]), vec!["Top", "Inner", "Deepest"]);
        assert_eq!(
            modules[0].components[2].path.as_deref(),
            Some("components/nested/deeper/Deepest.coffee")
        );

        let modules = scan_dir(root, false);
        assert_eq!(names(&modules[0]), vec!["Top"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_component_symlink_loops_are_skipped() {
        use std::os::unix::fs::symlink;

        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        write(root, "components/Foo.js", "");
        write(root, "components/sub/Inner.js", "");
        let components = root.join("components");
        let linked = symlink(&components, components.join("loop"))
            .and_then(|()| symlink(&components, components.join("sub").join("up")))
            .and_then(|()| symlink(&components, components.join("sub").join("again")));
        if linked.is_err() {
            return;
        }

        let modules = scan_dir(root, true);
        assert_eq!(modules.len(), 1);
        assert_eq!(names(&modules[0]), vec!["Foo", "Inner"]);
        assert_eq!(
            modules[0].components[1].path.as_deref(),
            Some("components/sub/Inner.js")
        );
    }

    #[test]
    fn test_missing_directories_and_descriptor() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let package_dir = temp_dir.path().join("noflo-empty");
        let _ = fs::create_dir_all(&package_dir);
        let ctx = ScanContext {
            root: temp_dir.path(),
            subdirs: true,
            max_depth: 8,
        };
        assert!(scan(&package_dir, &ctx).is_ok_and(|m| m.is_empty()));

        write(&package_dir, "components/Only.js", "");
        let modules = scan(&package_dir, &ctx).unwrap_or_default();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "empty");
        assert_eq!(modules[0].base, "noflo-empty");
        assert_eq!(
            modules[0].components[0].path.as_deref(),
            Some("noflo-empty/components/Only.js")
        );
    }

    #[test]
    fn test_loader_only_package() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        write(
            root,
            "package.json",
            r#"{"name": "noflo-loader", "noflo": {"icon": "cog", "loader": "lib/ComponentLoader"}}"#,
        );
        let modules = scan_dir(root, true);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "loader");
        assert_eq!(modules[0].runtime, "noflo");
        assert_eq!(modules[0].icon.as_deref(), Some("cog"));
        assert_eq!(modules[0].loader(), Some("lib/ComponentLoader"));
        assert!(modules[0].components.is_empty());
    }

    #[test]
    fn test_malformed_json_graph_is_an_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        write(root, "graphs/Broken.json", "{\"properties\": ");
        let ctx = ScanContext {
            root,
            subdirs: true,
            max_depth: 8,
        };
        assert!(matches!(scan(root, &ctx), Err(DiscoveryError::Graph(_))));
    }

    #[test]
    fn test_graph_environment_variants() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        write(root, "graphs/Anywhere.json", r#"{"properties": {"environment": "all"}}"#);
        write(root, "graphs/Custom.json", r#"{"properties": {"environment": {"src": "x"}}}"#);
        write(root, "graphs/Named.json", r#"{"properties": {"id": "Renamed"}}"#);
        write(root, "graphs/Python.fbp", "# @runtime python\n");

        let modules = scan_dir(root, true);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].runtime, "noflo");
        assert_eq!(names(&modules[0]), vec!["Anywhere", "Renamed"]);
    }
}
