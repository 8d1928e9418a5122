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

//! Degree centrality over the directed graph.
//!
//! In-degree centrality of a node is its distinct predecessor count divided
//! by `N - 1`; out-degree centrality is the analogue over successors. Edge
//! weights and kinds are ignored: only the presence of at least one edge
//! between an ordered pair counts.

use crate::graph::InteractionGraph;

/// Write normalized in/out degree centrality into every node's attributes.
///
/// Both metrics are 0.0 for graphs with at most one node.
pub fn assign_degree_centrality(graph: &mut InteractionGraph) {
    let n = graph.node_count();
    if n <= 1 {
        for (_, attrs) in graph.nodes_mut() {
            attrs.in_degree_centrality = 0.0;
            attrs.out_degree_centrality = 0.0;
        }
        return;
    }

    let denom = (n - 1) as f64;
    let scores: Vec<(String, f64, f64)> = graph
        .node_ids()
        .map(|id| {
            (
                id.clone(),
                graph.predecessor_count(id) as f64 / denom,
                graph.successor_count(id) as f64 / denom,
            )
        })
        .collect();

    for (id, in_c, out_c) in scores {
        if let Some(attrs) = graph.attrs_mut(&id) {
            attrs.in_degree_centrality = in_c;
            attrs.out_degree_centrality = out_c;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InteractionKind;

    #[test]
    fn single_node_gets_zero() {
        let mut g = InteractionGraph::new();
        g.add_node("only");
        assign_degree_centrality(&mut g);
        let attrs = g.attrs("only").unwrap();
        assert_eq!(attrs.in_degree_centrality, 0.0);
        assert_eq!(attrs.out_degree_centrality, 0.0);
    }

    #[test]
    fn star_graph_centralities() {
        // a -> b, c -> b, d -> b
        let mut g = InteractionGraph::new();
        g.add_edge("a", "b", InteractionKind::Reply, Some(1));
        g.add_edge("c", "b", InteractionKind::Reply, Some(1));
        g.add_edge("d", "b", InteractionKind::Reply, Some(1));
        assign_degree_centrality(&mut g);

        let b = g.attrs("b").unwrap();
        assert!((b.in_degree_centrality - 1.0).abs() < f64::EPSILON);
        assert_eq!(b.out_degree_centrality, 0.0);

        let a = g.attrs("a").unwrap();
        assert_eq!(a.in_degree_centrality, 0.0);
        assert!((a.out_degree_centrality - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_edges_count_once() {
        let mut g = InteractionGraph::new();
        g.add_edge("a", "b", InteractionKind::Reply, Some(5));
        g.add_edge("a", "b", InteractionKind::Mentions, Some(2));
        assign_degree_centrality(&mut g);

        // Two nodes: denominator 1, and the pair counts once despite two
        // typed edges with weights.
        let b = g.attrs("b").unwrap();
        assert!((b.in_degree_centrality - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn centralities_are_bounded() {
        let mut g = InteractionGraph::new();
        g.add_edge("a", "b", InteractionKind::Reply, Some(1));
        g.add_edge("b", "c", InteractionKind::Quote, Some(1));
        g.add_edge("c", "a", InteractionKind::Retweet, Some(1));
        g.add_edge("a", "c", InteractionKind::Mentions, Some(1));
        assign_degree_centrality(&mut g);

        for (_, attrs) in g.nodes() {
            assert!((0.0..=1.0).contains(&attrs.in_degree_centrality));
            assert!((0.0..=1.0).contains(&attrs.out_degree_centrality));
        }
    }
}
