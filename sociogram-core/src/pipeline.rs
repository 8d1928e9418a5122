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

//! Pipeline orchestration.
//!
//! One synchronous pass per request, no suspension points, no shared
//! state: decode → extract → aggregate → centrality → communities →
//! labels → export. Either the full exported document is produced or a
//! [`PipelineError`] is returned; there is no partial-graph success.

use tracing::debug;

use crate::builder::{build_graph, EdgePolicy};
use crate::centrality::assign_degree_centrality;
use crate::community::{assign_communities, ModularityOptimizer};
use crate::enrich::enrich_labels;
use crate::error::PipelineError;
use crate::export::{export_graph, CytoscapeDocument};
use crate::extract::extract_interactions;
use crate::model::RawDocument;

/// Decode raw bytes and run the full pipeline with the default (weighted)
/// aggregation policy. This is the entry point transport shells call.
pub fn process_bytes(raw: &[u8]) -> Result<CytoscapeDocument, PipelineError> {
    let doc: RawDocument = serde_json::from_slice(raw)?;
    process_document(&doc)
}

/// Run the pipeline over an already-decoded document.
pub fn process_document(doc: &RawDocument) -> Result<CytoscapeDocument, PipelineError> {
    let (interactions, users) = extract_interactions(doc);
    let mut graph = build_graph(&interactions, EdgePolicy::Weighted)?;

    assign_degree_centrality(&mut graph);
    assign_communities(&mut graph, &ModularityOptimizer::new())?;
    enrich_labels(&mut graph, &users);

    let exported = export_graph(&graph);
    debug!(
        nodes = exported.elements.nodes.len(),
        edges = exported.elements.edges.len(),
        "pipeline finished"
    );
    Ok(exported)
}
