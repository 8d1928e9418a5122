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

//! Sociogram Core
//!
//! Turns a raw social-platform export into a weighted, attributed
//! interaction graph ready for visualization:
//!
//! ```text
//! Raw export → Extraction → Aggregation → Centrality → Communities
//!                                                          ↓
//!                   Cytoscape document ← Export ← Label enrichment
//! ```
//!
//! The whole pipeline is synchronous and request-scoped: every invocation
//! builds its lookup tables and graph from scratch and drops them with the
//! response. [`pipeline::process_bytes`] is the single entry point transport
//! shells should call.

pub mod builder;
pub mod centrality;
pub mod community;
pub mod enrich;
pub mod error;
pub mod export;
pub mod extract;
pub mod graph;
pub mod model;
pub mod pipeline;

pub use builder::{build_graph, EdgePolicy};
pub use centrality::assign_degree_centrality;
pub use community::{
    assign_communities, CommunityDetector, ModularityOptimizer, OptimizerConfig, Partition,
    UndirectedGraph,
};
pub use enrich::enrich_labels;
pub use error::PipelineError;
pub use export::{export_graph, AttrValue, CytoscapeDocument};
pub use extract::extract_interactions;
pub use graph::{ActorId, GraphEdge, InteractionGraph, NodeAttrs};
pub use model::{Interaction, InteractionKind, RawDocument, RawTweet, RawUser, UserLookup};
