use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::{Direction, Graph};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{RewriteError, RewriteResult};
use crate::rewriter::Rewriter;
use crate::syntax::SyntaxNode;

/// A named rewrite step and the passes it must run after.
#[derive(Clone, Debug)]
pub struct Pass {
    /// Unique identifier for the pass.
    pub id: String,
    /// IDs of passes that must run before this one.
    pub dependencies: Vec<String>,
    pub rewriter: Rewriter,
}

impl Pass {
    pub fn new(id: impl Into<String>, rewriter: Rewriter) -> Self {
        Pass { id: id.into(), dependencies: Vec::new(), rewriter }
    }

    pub fn depends_on(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }
}

/// Manages a pipeline of rewrite passes applied to a syntax tree.
/// Passes are organized in a dependency graph and executed in topological order,
/// so a pass always sees the output of the passes it depends on. Passes with
/// no ordering constraint between them run in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    passes: Vec<Pass>,
}

impl Pipeline {
    /// Creates a new, empty pipeline.
    pub fn new() -> Self {
        Pipeline { passes: Vec::new() }
    }

    /// Adds a pass, replacing any earlier pass with the same ID in place.
    pub fn add_pass(&mut self, pass: Pass) -> &mut Self {
        match self.passes.iter_mut().find(|p| p.id == pass.id) {
            Some(existing) => *existing = pass,
            None => self.passes.push(pass),
        }
        self
    }

    /// Removes a pass by its ID. Passes depending on it will fail to resolve
    /// at `apply` time.
    pub fn remove_pass(&mut self, id: &str) -> Option<Pass> {
        let index = self.passes.iter().position(|p| p.id == id)?;
        Some(self.passes.remove(index))
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Pass IDs in the order `apply` runs them.
    pub fn execution_order(&self) -> RewriteResult<Vec<&str>> {
        let graph = self.graph()?;
        Ok(self.schedule(&graph)?.into_iter().map(|i| graph[i].id.as_str()).collect())
    }

    /// Applies all passes to `tree` in dependency order.
    ///
    /// # Errors
    /// `UnknownDependency` or `PipelineCycle` before any pass runs; otherwise
    /// the first error a pass reports.
    pub fn apply(&self, tree: &Arc<SyntaxNode>) -> RewriteResult<Arc<SyntaxNode>> {
        let graph = self.graph()?;
        let order = self.schedule(&graph)?;
        let mut current = Arc::clone(tree);
        for index in order {
            let pass = &graph[index];
            debug!(pass = %pass.id, "Applying pass");
            current = pass.rewriter.rewrite(&current)?;
        }
        Ok(current)
    }

    /// Dependency graph with edges from each dependency to its dependents.
    /// Node indices follow insertion order.
    fn graph(&self) -> RewriteResult<Graph<&Pass, ()>> {
        let mut graph = Graph::new();
        let mut node_indices: FxHashMap<&str, NodeIndex> = FxHashMap::default();
        for pass in &self.passes {
            let node = graph.add_node(pass);
            node_indices.insert(pass.id.as_str(), node);
        }
        for pass in &self.passes {
            let node = node_indices[pass.id.as_str()];
            for dependency in &pass.dependencies {
                let dep_node = node_indices.get(dependency.as_str()).ok_or_else(|| RewriteError::UnknownDependency {
                    pass: pass.id.clone(),
                    dependency: dependency.clone(),
                })?;
                graph.add_edge(*dep_node, node, ());
            }
        }
        Ok(graph)
    }

    /// Topological order preferring the earliest inserted ready pass.
    fn schedule(&self, graph: &Graph<&Pass, ()>) -> RewriteResult<Vec<NodeIndex>> {
        toposort(graph, None).map_err(|cycle| RewriteError::PipelineCycle {
            pass: graph[cycle.node_id()].id.clone(),
        })?;

        let mut in_degree: Vec<usize> = graph
            .node_indices()
            .map(|n| graph.neighbors_directed(n, Direction::Incoming).count())
            .collect();
        let mut ready: BinaryHeap<Reverse<usize>> = graph
            .node_indices()
            .filter(|n| in_degree[n.index()] == 0)
            .map(|n| Reverse(n.index()))
            .collect();
        let mut order = Vec::with_capacity(graph.node_count());
        while let Some(Reverse(index)) = ready.pop() {
            let node = NodeIndex::new(index);
            order.push(node);
            for next in graph.neighbors_directed(node, Direction::Outgoing) {
                in_degree[next.index()] -= 1;
                if in_degree[next.index()] == 0 {
                    ready.push(Reverse(next.index()));
                }
            }
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{factory, get_metadata, metadata::extend_metadata, to_full_string};

    fn leaf() -> Arc<SyntaxNode> {
        factory::identifier_name("x")
    }

    /// Appends `tag` to the identifier text of every identifier name.
    fn suffixer(tag: &'static str) -> Rewriter {
        Rewriter::new().with_identifier_name(move |_, _, name| {
            let renamed = name.with_identifier(Arc::new(name.identifier.with_text(format!("{}{}", name.identifier.text, tag))));
            Ok(Some(renamed.into_node()))
        })
    }

    #[test]
    fn test_pipeline_apply_identity() {
        let mut pipeline = Pipeline::new();
        pipeline.add_pass(Pass::new("identity", Rewriter::new()));
        let node = leaf()
            .with_metadata(Some(extend_metadata(None, "version", 0_usize)))
            .into_node();
        let result = pipeline.apply(&node).unwrap();
        assert!(Arc::ptr_eq(&node, &result));
        assert_eq!(result.metadata().and_then(|m| get_metadata::<usize>(m, "version")), Some(&0));
    }

    #[test]
    fn test_dependencies_order_passes() {
        let mut pipeline = Pipeline::new();
        pipeline
            .add_pass(Pass::new("c", suffixer("c")).depends_on("b"))
            .add_pass(Pass::new("a", suffixer("a")))
            .add_pass(Pass::new("b", suffixer("b")).depends_on("a"));
        assert_eq!(pipeline.execution_order().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(to_full_string(&pipeline.apply(&leaf()).unwrap()), "xabc");
    }

    #[test]
    fn test_unconstrained_passes_keep_insertion_order() {
        let mut pipeline = Pipeline::new();
        pipeline
            .add_pass(Pass::new("second", suffixer("2")))
            .add_pass(Pass::new("first", suffixer("1")))
            .add_pass(Pass::new("third", suffixer("3")));
        assert_eq!(pipeline.execution_order().unwrap(), vec!["second", "first", "third"]);
    }

    #[test]
    fn test_unknown_dependency() {
        let mut pipeline = Pipeline::new();
        pipeline.add_pass(Pass::new("rename", Rewriter::new()).depends_on("missing"));
        let err = pipeline.apply(&leaf()).unwrap_err();
        assert!(matches!(err, RewriteError::UnknownDependency { ref pass, ref dependency } if pass == "rename" && dependency == "missing"));
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut pipeline = Pipeline::new();
        pipeline
            .add_pass(Pass::new("a", Rewriter::new()).depends_on("b"))
            .add_pass(Pass::new("b", Rewriter::new()).depends_on("a"));
        assert!(matches!(pipeline.apply(&leaf()), Err(RewriteError::PipelineCycle { .. })));
    }

    #[test]
    fn test_remove_and_replace() {
        let mut pipeline = Pipeline::new();
        pipeline.add_pass(Pass::new("a", suffixer("a"))).add_pass(Pass::new("b", suffixer("b")));
        pipeline.add_pass(Pass::new("a", suffixer("A")));
        assert_eq!(pipeline.len(), 2);
        assert_eq!(to_full_string(&pipeline.apply(&leaf()).unwrap()), "xAb");
        assert!(pipeline.remove_pass("a").is_some());
        assert!(pipeline.remove_pass("a").is_none());
        assert_eq!(to_full_string(&pipeline.apply(&leaf()).unwrap()), "xb");
    }
}
