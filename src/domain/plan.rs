//! Deploy ordering for a release delta
//!
//! Builds a dependency graph over the releases of a delta and orders them so
//! that a release is deployed after the pending dependencies it still lists.
//! Uses petgraph for graph operations.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use super::release::ReleaseSpec;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("Dependency would create a cycle: {0} -> {1}")]
    CycleDetected(String, String),

    #[error("Chart depends on itself: {0}")]
    SelfDependency(String),
}

/// Releases arranged in a dependency graph
#[derive(Debug, Default)]
pub struct DeployPlan {
    /// Edges point from a dependency to its dependent
    graph: DiGraph<ReleaseSpec, ()>,

    /// Map from chart name to node index
    node_map: HashMap<String, NodeIndex>,
}

impl DeployPlan {
    /// Builds a plan from a release set
    ///
    /// Dependencies on charts outside the set are treated as external and
    /// do not constrain the order.
    pub fn from_releases(releases: &[ReleaseSpec]) -> Result<Self, PlanError> {
        let mut plan = Self::default();

        // First pass: add all nodes
        for release in releases {
            let idx = plan.graph.add_node(release.clone());
            plan.node_map.insert(release.chart_name.clone(), idx);
        }

        // Second pass: add all edges
        for release in releases {
            for dep in &release.dependencies {
                plan.add_dependency(&release.chart_name, dep)?;
            }
        }

        Ok(plan)
    }

    fn add_dependency(&mut self, chart: &str, depends_on: &str) -> Result<(), PlanError> {
        if chart == depends_on {
            return Err(PlanError::SelfDependency(chart.to_string()));
        }

        let (chart_idx, dep_idx) = match (self.node_map.get(chart), self.node_map.get(depends_on)) {
            (Some(c), Some(d)) => (*c, *d),
            _ => return Ok(()),
        };

        if self.graph.find_edge(dep_idx, chart_idx).is_some() {
            return Ok(());
        }

        let edge = self.graph.add_edge(dep_idx, chart_idx, ());

        if is_cyclic_directed(&self.graph) {
            self.graph.remove_edge(edge);
            return Err(PlanError::CycleDetected(
                chart.to_string(),
                depends_on.to_string(),
            ));
        }

        Ok(())
    }

    /// Returns releases with dependencies first
    ///
    /// Among releases that are ready at the same time, input order is kept.
    pub fn order(&self) -> Vec<ReleaseSpec> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                let degree = self.graph.neighbors_directed(idx, Direction::Incoming).count();
                (idx, degree)
            })
            .collect();

        let mut ready: BTreeSet<NodeIndex> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(idx, _)| *idx)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());

        while let Some(idx) = ready.pop_first() {
            order.push(self.graph[idx].clone());

            for dependent in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                if let Some(degree) = in_degree.get_mut(&dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        order
    }

    /// Returns the dependencies of a chart that are not part of this plan
    pub fn external_dependencies(&self, chart_name: &str) -> Vec<String> {
        self.node_map
            .get(chart_name)
            .map(|idx| {
                self.graph[*idx]
                    .dependencies
                    .iter()
                    .filter(|dep| !self.node_map.contains_key(*dep))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
