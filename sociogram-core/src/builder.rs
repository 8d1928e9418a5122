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

//! Graph Builder
//!
//! Aggregates the flat interaction list into the directed graph. Two
//! policies exist: `Weighted` collapses every `(source, target, kind)`
//! group into one edge weighted by the group size, `Deduplicated` keeps
//! one unweighted edge per distinct triple.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::PipelineError;
use crate::graph::InteractionGraph;
use crate::model::{Interaction, InteractionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// One edge per distinct triple, `weight` = number of raw interactions
    /// that collapsed onto it.
    #[default]
    Weighted,
    /// One edge per distinct triple, presence only.
    Deduplicated,
}

/// Build the directed graph from extracted interactions.
///
/// Fails with [`PipelineError::NoInteractions`] on an empty input and with
/// [`PipelineError::EmptyAggregate`] if grouping a non-empty input somehow
/// yields zero rows.
pub fn build_graph(
    interactions: &[Interaction],
    policy: EdgePolicy,
) -> Result<InteractionGraph, PipelineError> {
    if interactions.is_empty() {
        return Err(PipelineError::NoInteractions);
    }

    // Ordered grouping keeps edge order stable across runs.
    let mut groups: BTreeMap<(&str, &str, InteractionKind), u64> = BTreeMap::new();
    for interaction in interactions {
        *groups
            .entry((
                interaction.source.as_str(),
                interaction.target.as_str(),
                interaction.kind,
            ))
            .or_insert(0) += 1;
    }

    if groups.is_empty() {
        return Err(PipelineError::EmptyAggregate);
    }

    let mut graph = InteractionGraph::new();
    for ((source, target, kind), count) in groups {
        let weight = match policy {
            EdgePolicy::Weighted => Some(count),
            EdgePolicy::Deduplicated => None,
        };
        graph.add_edge(source, target, kind, weight);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        ?policy,
        "graph aggregated"
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(source: &str, target: &str, kind: InteractionKind) -> Interaction {
        Interaction::new(source, target, kind).unwrap()
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = build_graph(&[], EdgePolicy::Weighted).unwrap_err();
        assert_eq!(err.kind(), "no_interactions");
    }

    #[test]
    fn weighted_counts_per_triple() {
        let interactions = vec![
            interaction("a", "b", InteractionKind::Reply),
            interaction("a", "b", InteractionKind::Reply),
            interaction("a", "b", InteractionKind::Mentions),
            interaction("b", "a", InteractionKind::Reply),
        ];
        let graph = build_graph(&interactions, EdgePolicy::Weighted).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 3);

        let reply_ab = graph
            .edges()
            .iter()
            .find(|e| e.source == "a" && e.target == "b" && e.kind == InteractionKind::Reply)
            .unwrap();
        assert_eq!(reply_ab.weight, Some(2));

        let weights: Vec<u64> = graph.edges().iter().filter_map(|e| e.weight).collect();
        assert!(weights.iter().all(|&w| w >= 1));
    }

    #[test]
    fn deduplicated_drops_weights() {
        let interactions = vec![
            interaction("a", "b", InteractionKind::Reply),
            interaction("a", "b", InteractionKind::Reply),
        ];
        let graph = build_graph(&interactions, EdgePolicy::Deduplicated).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges()[0].weight, None);
    }

    #[test]
    fn reaggregation_is_a_no_op() {
        let interactions = vec![
            interaction("a", "b", InteractionKind::Reply),
            interaction("a", "b", InteractionKind::Reply),
            interaction("c", "b", InteractionKind::Retweet),
            interaction("a", "c", InteractionKind::Mentions),
            interaction("a", "c", InteractionKind::Mentions),
            interaction("a", "c", InteractionKind::Mentions),
        ];
        let first = build_graph(&interactions, EdgePolicy::Weighted).unwrap();

        // Expand the weighted edges back into raw interactions and rebuild.
        let expanded: Vec<Interaction> = first
            .edges()
            .iter()
            .flat_map(|e| {
                std::iter::repeat_with(move || {
                    Interaction::new(e.source.clone(), e.target.clone(), e.kind).unwrap()
                })
                .take(e.weight.unwrap() as usize)
            })
            .collect();
        let second = build_graph(&expanded, EdgePolicy::Weighted).unwrap();

        assert_eq!(first.edges(), second.edges());
        let total = |g: &InteractionGraph| g.edges().iter().filter_map(|e| e.weight).sum::<u64>();
        assert_eq!(total(&first), total(&second));
    }
}
