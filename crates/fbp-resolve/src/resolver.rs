//! Transitive component resolution
//!
//! Resolving an identifier yields every identifier needed to run it:
//! - elementary components and loader-claimed identifiers resolve to themselves
//! - graph components load their graph and resolve every referenced component
//!
//! The result lists the graph's direct references first, then anything new found in the
//! branches, then the graph itself. Duplicates keep their first position.

use fbp_graph::load_graph;
use fbp_manifest::{ComponentKind, Module};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::errors::ResolveError;
use crate::lookup::{find_component, has_custom_loader};
use crate::ResolveOptions;

struct Resolver<'a> {
    modules: &'a [Module],
    options: &'a ResolveOptions,
}

/// Resolve the transitive set of component identifiers `id` depends on
pub fn resolve(
    modules: &[Module],
    id: &str,
    options: &ResolveOptions,
) -> Result<Vec<String>, ResolveError> {
    let resolver = Resolver { modules, options };
    let resolved = resolver.resolve_component(id, &[])?;
    debug!("Resolved {} to {} components", id, resolved.len());
    Ok(resolved)
}

impl Resolver<'_> {
    /// `expanding` holds the graphs currently being expanded above this call
    fn resolve_component(&self, id: &str, expanding: &[&str]) -> Result<Vec<String>, ResolveError> {
        let Some(component) = find_component(self.modules, id) else {
            if has_custom_loader(self.modules, id) {
                debug!("{} is provided by a custom loader", id);
                return Ok(vec![id.to_string()]);
            }
            return Err(ResolveError::ComponentNotAvailable(id.to_string()));
        };

        if component.kind() == ComponentKind::Elementary {
            return Ok(vec![id.to_string()]);
        }
        if expanding.contains(&id) {
            warn!("Graph {} includes itself, not expanding it again", id);
            return Ok(vec![id.to_string()]);
        }

        let source = component
            .source()
            .ok_or_else(|| ResolveError::GraphSourceMissing(id.to_string()))?;
        let graph = load_graph(&self.options.base_dir.join(source))?;

        let mut references: Vec<String> = Vec::new();
        push_unique_all(&mut references, graph.components());
        debug!("Graph {} references {} components", id, references.len());

        let mut chain: Vec<&str> = expanding.to_vec();
        chain.push(id);

        let branches: Vec<Vec<String>> = if self.options.strict {
            // Ordered collection so the earliest failing reference is the one reported
            let outcomes: Vec<Result<Vec<String>, ResolveError>> = references
                .par_iter()
                .map(|reference| self.resolve_component(reference, &chain))
                .collect();
            outcomes.into_iter().collect::<Result<_, _>>()?
        } else {
            references
                .par_iter()
                .map(|reference| {
                    self.resolve_component(reference, &chain)
                        .unwrap_or_else(|err| {
                            debug!("Dropping dependencies of {}: {}", reference, err);
                            Vec::new()
                        })
                })
                .collect()
        };

        let mut resolved = references;
        for branch in &branches {
            push_unique_all(&mut resolved, branch.iter().map(String::as_str));
        }
        push_unique_all(&mut resolved, [id]);
        Ok(resolved)
    }
}

fn push_unique_all<'a>(list: &mut Vec<String>, ids: impl IntoIterator<Item = &'a str>) {
    let mut seen: HashSet<String> = list.iter().cloned().collect();
    for id in ids {
        if seen.insert(id.to_string()) {
            list.push(id.to_string());
        }
    }
}
