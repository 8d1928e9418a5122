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

//! Community detection by modularity optimization.
//!
//! The directed graph is first projected to an undirected weighted simple
//! graph (all directed edges between a pair combine into one weight), then
//! partitioned by a Louvain-style optimizer: greedy local moving that
//! maximizes the gain in
//!
//! ```text
//! Q = (1/2m) * Σij [Aij - ki*kj/2m] * δ(ci, cj)
//! ```
//!
//! followed by coarsening communities into super-nodes and repeating until
//! no further gain is possible.
//!
//! Labels are contiguous from 0 and only meaningful within a single run:
//! visiting order is randomized, so ties in edge weight can land either
//! way. Callers that need reproducibility (tests) pass a seed; everything
//! else compares partitions by grouping, never by label value.

use std::collections::{BTreeMap, HashMap};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::error::PipelineError;
use crate::graph::{ActorId, InteractionGraph};

/// Actor id → community label. Request-scoped, never persisted.
pub type Partition = HashMap<ActorId, u64>;

/// Undirected weighted projection of an [`InteractionGraph`].
pub struct UndirectedGraph {
    node_ids: Vec<ActorId>,
    /// Per node: neighbor index → combined edge weight. Symmetric.
    adjacency: Vec<HashMap<usize, f64>>,
    /// Sum of all undirected edge weights (each pair counted once).
    total_weight: f64,
}

impl UndirectedGraph {
    /// Project the directed graph. Every directed edge between a pair
    /// contributes its weight (1.0 when unweighted) to the single
    /// undirected weight for that pair; nothing is double counted.
    pub fn project(graph: &InteractionGraph) -> Self {
        let node_ids: Vec<ActorId> = graph.node_ids().cloned().collect();
        let index: HashMap<&str, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut pair_weights: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for edge in graph.edges() {
            let (Some(&a), Some(&b)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            // No self-loops: guaranteed by the extractor.
            let key = if a < b { (a, b) } else { (b, a) };
            *pair_weights.entry(key).or_insert(0.0) += edge.weight.unwrap_or(1) as f64;
        }

        let mut adjacency = vec![HashMap::new(); node_ids.len()];
        let mut total_weight = 0.0;
        for (&(a, b), &w) in &pair_weights {
            adjacency[a].insert(b, w);
            adjacency[b].insert(a, w);
            total_weight += w;
        }

        Self {
            node_ids,
            adjacency,
            total_weight,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_edgeless(&self) -> bool {
        self.total_weight == 0.0
    }
}

/// The single capability the pipeline needs from a community detector.
/// Implementations may optimize however they like as long as they assign
/// every node of the projection a label.
pub trait CommunityDetector {
    fn detect(&self, graph: &UndirectedGraph) -> Partition;
}

#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Higher resolution favors more, smaller communities.
    pub resolution: f64,
    /// Maximum local-moving sweeps per coarsening level.
    pub max_passes: usize,
    /// RNG seed for the node visiting order. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_passes: 10,
            seed: None,
        }
    }
}

/// Louvain-style greedy modularity optimizer.
pub struct ModularityOptimizer {
    config: OptimizerConfig,
}

impl ModularityOptimizer {
    pub fn new() -> Self {
        Self {
            config: OptimizerConfig::default(),
        }
    }

    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Reproducible optimizer, for tests and debugging.
    pub fn seeded(seed: u64) -> Self {
        Self::with_config(OptimizerConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }
}

impl Default for ModularityOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetector for ModularityOptimizer {
    fn detect(&self, graph: &UndirectedGraph) -> Partition {
        let n = graph.node_count();
        if n == 0 {
            return Partition::new();
        }

        let mut rng = match self.config.seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };

        // Degenerate projection: every node is its own community.
        if graph.is_edgeless() {
            return graph
                .node_ids
                .iter()
                .enumerate()
                .map(|(i, id)| (id.clone(), i as u64))
                .collect();
        }

        // `membership[v]` tracks which current-level super-node each
        // original node belongs to.
        let mut membership: Vec<usize> = (0..n).collect();
        let mut level = LevelGraph::from_projection(graph);

        loop {
            let (assignment, improved) =
                local_moving(&level, self.config.resolution, self.config.max_passes, &mut rng);
            if !improved {
                break;
            }

            let (assignment, community_count) = renumber(&assignment);
            for m in membership.iter_mut() {
                *m = assignment[*m];
            }
            if community_count == level.len() {
                break;
            }
            level = level.aggregate(&assignment, community_count);
        }

        let (labels, community_count) = renumber(&membership);
        debug!(
            nodes = n,
            communities = community_count,
            "community detection finished"
        );

        graph
            .node_ids
            .iter()
            .zip(labels)
            .map(|(id, label)| (id.clone(), label as u64))
            .collect()
    }
}

/// Working graph at one coarsening level. Aggregated internal edges live
/// in `self_loops`.
struct LevelGraph {
    adjacency: Vec<HashMap<usize, f64>>,
    self_loops: Vec<f64>,
}

impl LevelGraph {
    fn from_projection(graph: &UndirectedGraph) -> Self {
        Self {
            adjacency: graph.adjacency.clone(),
            self_loops: vec![0.0; graph.node_count()],
        }
    }

    fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Weighted degree of a node, self-loops counted twice.
    fn degree(&self, i: usize) -> f64 {
        self.adjacency[i].values().sum::<f64>() + 2.0 * self.self_loops[i]
    }

    /// Collapse each community into one super-node.
    fn aggregate(&self, assignment: &[usize], community_count: usize) -> Self {
        let mut adjacency = vec![HashMap::new(); community_count];
        let mut self_loops = vec![0.0; community_count];

        for (i, &ci) in assignment.iter().enumerate() {
            self_loops[ci] += self.self_loops[i];
            for (&j, &w) in &self.adjacency[i] {
                let cj = assignment[j];
                if ci == cj {
                    // Each internal pair is visited from both ends.
                    self_loops[ci] += w / 2.0;
                } else {
                    *adjacency[ci].entry(cj).or_insert(0.0) += w;
                }
            }
        }

        Self {
            adjacency,
            self_loops,
        }
    }
}

/// Greedy local moving: sweep nodes in random order, moving each to the
/// neighboring community with the best positive modularity gain, until a
/// full sweep changes nothing or the pass budget runs out.
fn local_moving<R: rand::Rng>(
    level: &LevelGraph,
    resolution: f64,
    max_passes: usize,
    rng: &mut R,
) -> (Vec<usize>, bool) {
    let n = level.len();
    let mut community: Vec<usize> = (0..n).collect();
    let degrees: Vec<f64> = (0..n).map(|i| level.degree(i)).collect();
    let two_m: f64 = degrees.iter().sum();
    if two_m == 0.0 {
        return (community, false);
    }

    // Sum of degrees per community.
    let mut sigma: Vec<f64> = degrees.clone();
    let mut improved = false;

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    for _ in 0..max_passes {
        let mut moved = false;

        for &node in &order {
            let current = community[node];

            // Edge weight from `node` to each neighboring community.
            let mut neighbor_weights: HashMap<usize, f64> = HashMap::new();
            for (&neighbor, &w) in &level.adjacency[node] {
                *neighbor_weights.entry(community[neighbor]).or_insert(0.0) += w;
            }

            // Take the node out of its community before comparing gains.
            sigma[current] -= degrees[node];

            let stay_gain = gain(
                neighbor_weights.get(&current).copied().unwrap_or(0.0),
                degrees[node],
                sigma[current],
                two_m,
                resolution,
            );

            let mut best = current;
            let mut best_gain = stay_gain;
            for (&candidate, &w_ic) in &neighbor_weights {
                if candidate == current {
                    continue;
                }
                let candidate_gain =
                    gain(w_ic, degrees[node], sigma[candidate], two_m, resolution);
                if candidate_gain > best_gain {
                    best_gain = candidate_gain;
                    best = candidate;
                }
            }

            sigma[best] += degrees[node];
            if best != current {
                community[node] = best;
                moved = true;
                improved = true;
            }
        }

        if !moved {
            break;
        }
    }

    (community, improved)
}

/// Modularity gain of attaching a node with degree `k` to a community with
/// degree sum `sigma` via edges of total weight `w`.
fn gain(w: f64, k: f64, sigma: f64, two_m: f64, resolution: f64) -> f64 {
    w - resolution * k * sigma / two_m
}

/// Renumber labels to be contiguous from 0, preserving grouping.
fn renumber(assignment: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    let mut next = 0;
    let renumbered = assignment
        .iter()
        .map(|&c| {
            *mapping.entry(c).or_insert_with(|| {
                let id = next;
                next += 1;
                id
            })
        })
        .collect();
    (renumbered, next)
}

/// Run community detection over a built graph and write each node's label.
///
/// A graph with zero edges short-circuits: every node gets community 0 and
/// the detector is never invoked (partitioning an edgeless graph is
/// undefined).
pub fn assign_communities(
    graph: &mut InteractionGraph,
    detector: &dyn CommunityDetector,
) -> Result<(), PipelineError> {
    if graph.edge_count() == 0 {
        for (_, attrs) in graph.nodes_mut() {
            attrs.community = 0;
        }
        return Ok(());
    }

    let projection = UndirectedGraph::project(graph);
    let partition = detector.detect(&projection);

    let labels: Vec<(ActorId, u64)> = graph
        .node_ids()
        .map(|id| {
            partition
                .get(id)
                .map(|&label| (id.clone(), label))
                .ok_or_else(|| {
                    PipelineError::internal("community", format!("node {id} missing from partition"))
                })
        })
        .collect::<Result<_, _>>()?;

    for (id, label) in labels {
        if let Some(attrs) = graph.attrs_mut(&id) {
            attrs.community = label;
        }
    }

    Ok(())
}
