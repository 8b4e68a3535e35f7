//! Module dependency closure.
//!
//! Given a catalog and a selection, computes which modules are built and
//! which are skipped. Only active modules take part; obsolete and ignored
//! entries are dropped before the graph is built.

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use serde::Serialize;

use crate::core::features::ModuleSelection;
use crate::core::module::ModuleId;
use crate::core::ModuleCatalog;
use crate::resolver::errors::ResolveError;

/// Result of a module resolution.
///
/// `enabled` and `skipped` partition the active modules of the catalog, and
/// `enabled` is closed under dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleResolution {
    pub enabled: BTreeSet<ModuleId>,
    pub skipped: BTreeSet<ModuleId>,
}

impl ModuleResolution {
    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.contains(id)
    }
}

/// Dependency graph over the active modules of a catalog.
///
/// Edges point from a module to the modules it depends on.
#[derive(Debug)]
pub struct ModuleGraphResolver<'a> {
    catalog: &'a ModuleCatalog,
    graph: DiGraph<ModuleId, ()>,
    nodes: HashMap<ModuleId, NodeIndex>,
}

impl<'a> ModuleGraphResolver<'a> {
    /// Build the graph, rejecting catalogs whose active modules form a cycle.
    pub fn new(catalog: &'a ModuleCatalog) -> Result<Self, ResolveError> {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();

        for module in catalog.active() {
            let node = graph.add_node(module.id.clone());
            nodes.insert(module.id.clone(), node);
        }

        for module in catalog.active() {
            let from = nodes[&module.id];
            for dep in &module.depends_on {
                match nodes.get(dep) {
                    Some(&to) => {
                        if !graph.contains_edge(from, to) {
                            graph.add_edge(from, to, ());
                        }
                    }
                    None if catalog.contains(dep.as_str()) => {
                        tracing::warn!(
                            "module `{}` depends on inactive module `{}`; dependency ignored",
                            module.id,
                            dep
                        );
                    }
                    None => {
                        return Err(ResolveError::UnknownModule {
                            module: dep.to_string(),
                            referenced_by: Some(module.id.to_string()),
                        })
                    }
                }
            }
        }

        let resolver = ModuleGraphResolver {
            catalog,
            graph,
            nodes,
        };
        resolver.check_acyclic()?;

        Ok(resolver)
    }

    fn check_acyclic(&self) -> Result<(), ResolveError> {
        for component in tarjan_scc(&self.graph) {
            let cyclic = component.len() > 1
                || component
                    .first()
                    .is_some_and(|&n| self.graph.contains_edge(n, n));

            if cyclic {
                let mut modules: Vec<String> = component
                    .iter()
                    .map(|&n| self.graph[n].to_string())
                    .collect();
                modules.sort();
                return Err(ResolveError::DependencyCycle { modules });
            }
        }

        Ok(())
    }

    /// Compute the enabled/skipped partition for a selection.
    ///
    /// The root module is always enabled. Every requested module pulls in
    /// its transitive dependencies; a module already reached is not
    /// revisited.
    pub fn resolve(&self, selection: &ModuleSelection) -> Result<ModuleResolution, ResolveError> {
        for id in selection.mentioned() {
            if !self.catalog.contains(id.as_str()) {
                return Err(ResolveError::UnknownModule {
                    module: id.to_string(),
                    referenced_by: None,
                });
            }
        }

        let mut starts = vec![self.catalog.root()];
        for id in selection.requested() {
            if self.nodes.contains_key(id) {
                starts.push(id);
            } else {
                tracing::warn!("module `{}` is not active and cannot be enabled", id);
            }
        }

        let mut enabled = BTreeSet::new();
        let mut dfs = Dfs::empty(&self.graph);

        for start in starts {
            dfs.move_to(self.nodes[start]);
            while let Some(node) = dfs.next(&self.graph) {
                let id = &self.graph[node];
                tracing::debug!("enabling module `{}`", id);
                enabled.insert(id.clone());
            }
        }

        let skipped = self
            .catalog
            .active_ids()
            .difference(&enabled)
            .cloned()
            .collect();

        Ok(ModuleResolution { enabled, skipped })
    }
}

/// Resolve a selection against a catalog.
pub fn resolve(
    catalog: &ModuleCatalog,
    selection: &ModuleSelection,
) -> Result<ModuleResolution, ResolveError> {
    ModuleGraphResolver::new(catalog)?.resolve(selection)
}
