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

//! Self-contained demo graph for frontend development without real data.

use axum::Json;
use sociogram_core::export::{export_graph, CytoscapeDocument};
use sociogram_core::model::{Interaction, InteractionKind, UserLookup};
use sociogram_core::{
    assign_communities, assign_degree_centrality, build_graph, enrich_labels, EdgePolicy,
    ModularityOptimizer,
};

use crate::api::ApiError;

/// Fixed 12-actor interaction pattern with two loosely bridged clusters.
const DEMO_EDGES: &[(u8, u8)] = &[
    (0, 5),
    (1, 0),
    (1, 2),
    (1, 3),
    (2, 0),
    (2, 4),
    (3, 0),
    (4, 6),
    (5, 7),
    (6, 8),
    (8, 9),
    (8, 10),
    (8, 7),
    (9, 7),
    (10, 7),
    (10, 11),
    (11, 7),
];

/// Community colors keyed by label, unknown communities fall back to grey.
const COMMUNITY_PALETTE: &[&str] = &["#ff6666", "#66b3ff", "#99ff99"];
const FALLBACK_COLOR: &str = "#d3d3d3";

// Fixed seed keeps the demo payload stable across requests.
const DEMO_SEED: u64 = 42;

/// GET /api/graph - Canned graph exercising the full pipeline
pub async fn demo_graph() -> Result<Json<CytoscapeDocument>, ApiError> {
    let interactions: Vec<Interaction> = DEMO_EDGES
        .iter()
        .filter_map(|&(s, t)| {
            Interaction::new(s.to_string(), t.to_string(), InteractionKind::Mentions)
        })
        .collect();

    let mut graph = build_graph(&interactions, EdgePolicy::Weighted)?;
    assign_degree_centrality(&mut graph);
    assign_communities(&mut graph, &ModularityOptimizer::seeded(DEMO_SEED))?;
    enrich_labels(&mut graph, &UserLookup::new());

    for (_, attrs) in graph.nodes_mut() {
        let color = COMMUNITY_PALETTE
            .get(attrs.community as usize)
            .copied()
            .unwrap_or(FALLBACK_COLOR);
        attrs
            .extra
            .insert("color".to_string(), serde_json::Value::String(color.into()));
    }

    Ok(Json(export_graph(&graph)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociogram_core::AttrValue;

    #[tokio::test]
    async fn test_demo_graph_shape() {
        let Json(doc) = demo_graph().await.unwrap();
        assert_eq!(doc.elements.nodes.len(), 12);
        assert_eq!(doc.elements.edges.len(), DEMO_EDGES.len());
    }

    #[tokio::test]
    async fn test_demo_nodes_are_colored() {
        let Json(doc) = demo_graph().await.unwrap();
        let allowed: Vec<AttrValue> = COMMUNITY_PALETTE
            .iter()
            .chain(std::iter::once(&FALLBACK_COLOR))
            .map(|c| AttrValue::Str(c.to_string()))
            .collect();

        for node in &doc.elements.nodes {
            assert!(allowed.contains(&node.data["color"]));
        }
    }

    #[tokio::test]
    async fn test_demo_is_deterministic() {
        let Json(first) = demo_graph().await.unwrap();
        let Json(second) = demo_graph().await.unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
