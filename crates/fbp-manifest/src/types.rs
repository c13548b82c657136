//! Manifest data model
//!
//! A manifest lists every module found for a project: the project itself (`base == ""`)
//! and each nested dependency package, one module per runtime. Field names and optionality
//! follow the FBP manifest JSON format so documents round-trip through serde unchanged.

use serde::{Deserialize, Serialize};

/// The only manifest format version in use
pub const MANIFEST_VERSION: u32 = 1;

// =============================================================================
// MANIFEST
// =============================================================================

/// Top-level manifest document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Entry component, only set by dependency lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<Component>,
    pub version: u32,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Default for Manifest {
    fn default() -> Self {
        Manifest {
            main: None,
            version: MANIFEST_VERSION,
            modules: Vec::new(),
        }
    }
}

// =============================================================================
// MODULE
// =============================================================================

/// Components of one package that share a runtime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub runtime: String,
    /// Package directory relative to the discovery root, `""` for the root package
    pub base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noflo: Option<NofloModuleInfo>,
}

/// NoFlo-specific module metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NofloModuleInfo {
    /// Module path of a custom component loader registered by the package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,
}

impl Module {
    /// Custom component loader declared by this module, if any
    pub fn loader(&self) -> Option<&str> {
        self.noflo
            .as_ref()
            .and_then(|info| info.loader.as_deref())
            .filter(|loader| !loader.is_empty())
    }

    /// Whether the root package (not a dependency) provides this module
    pub fn is_local(&self) -> bool {
        self.base.is_empty()
    }

    /// `module/component` identifier for one of this module's components
    pub fn qualified_name(&self, component: &Component) -> String {
        format!("{}/{}", self.name, component.name)
    }
}

// =============================================================================
// COMPONENT
// =============================================================================

/// A component entry in a module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<String>,
    /// Command template for components run as external programs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<String>,
    #[serde(default)]
    pub elementary: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inports: Vec<Port>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outports: Vec<Port>,
}

/// How a component is implemented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Implemented directly in code, no further dependencies
    Elementary,
    /// Defined by a graph (or command) that may reference other components
    Composite,
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        if self.elementary {
            ComponentKind::Elementary
        } else {
            ComponentKind::Composite
        }
    }

    /// Non-empty `source` path
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.is_empty())
    }
}

/// Port declaration on a component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub port_type: String,
    #[serde(default)]
    pub addressable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}
