// Copyright 2025 Sociogram Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Directed multi-relational interaction graph.
//!
//! Nodes are actor identifiers from the raw platform; edges are keyed by
//! `(source, target, kind)` with at most one edge per triple. Adjacency is
//! tracked as distinct predecessor/successor sets, which is exactly what
//! degree centrality needs: edge weight and kind never influence adjacency.
//!
//! Node storage is ordered so that iteration, export and tests are
//! deterministic regardless of input ordering.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::InteractionKind;

pub type ActorId = String;

/// Attributes every node carries after the full pipeline has run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAttrs {
    pub in_degree_centrality: f64,
    pub out_degree_centrality: f64,
    pub community: u64,
    pub label: String,
    pub name: String,
    pub username: String,
    /// Attributes attached outside the standard pipeline (the demo harness
    /// adds community colors here). Coerced to primitives at export time.
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One aggregated directed edge.
///
/// `weight` is `Some(count)` under the weighted aggregation policy and
/// `None` under the deduplicated policy; when present it is always >= 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: ActorId,
    pub target: ActorId,
    pub kind: InteractionKind,
    pub weight: Option<u64>,
}

#[derive(Debug, Default)]
pub struct InteractionGraph {
    nodes: BTreeMap<ActorId, NodeAttrs>,
    edges: Vec<GraphEdge>,
    successors: BTreeMap<ActorId, BTreeSet<ActorId>>,
    predecessors: BTreeMap<ActorId, BTreeSet<ActorId>>,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with default attributes if it is not already present.
    pub fn add_node(&mut self, id: impl Into<ActorId>) {
        self.nodes.entry(id.into()).or_default();
    }

    /// Insert an aggregated edge. Endpoints are created as needed; the
    /// builder guarantees at most one call per `(source, target, kind)`.
    pub fn add_edge(
        &mut self,
        source: impl Into<ActorId>,
        target: impl Into<ActorId>,
        kind: InteractionKind,
        weight: Option<u64>,
    ) {
        let source = source.into();
        let target = target.into();

        self.nodes.entry(source.clone()).or_default();
        self.nodes.entry(target.clone()).or_default();
        self.successors
            .entry(source.clone())
            .or_default()
            .insert(target.clone());
        self.predecessors
            .entry(target.clone())
            .or_default()
            .insert(source.clone());

        self.edges.push(GraphEdge {
            source,
            target,
            kind,
            weight,
        });
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in deterministic (sorted id) order.
    pub fn nodes(&self) -> impl Iterator<Item = (&ActorId, &NodeAttrs)> {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &ActorId> {
        self.nodes.keys()
    }

    pub fn attrs(&self, id: &str) -> Option<&NodeAttrs> {
        self.nodes.get(id)
    }

    pub fn attrs_mut(&mut self, id: &str) -> Option<&mut NodeAttrs> {
        self.nodes.get_mut(id)
    }

    /// Mutable access to every node's attributes, in sorted id order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = (&ActorId, &mut NodeAttrs)> {
        self.nodes.iter_mut()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Number of distinct actors with at least one edge into `id`.
    pub fn predecessor_count(&self, id: &str) -> usize {
        self.predecessors.get(id).map_or(0, BTreeSet::len)
    }

    /// Number of distinct actors `id` has at least one edge towards.
    pub fn successor_count(&self, id: &str) -> usize {
        self.successors.get(id).map_or(0, BTreeSet::len)
    }
}
