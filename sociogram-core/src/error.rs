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

//! Pipeline error taxonomy.
//!
//! Every failure is terminal for the request: the pipeline never returns a
//! partial graph and never retries. Transport shells map [`PipelineError::kind`]
//! to their own status codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The uploaded document is not well-formed JSON.
    #[error("invalid JSON document: {0}")]
    Decode(#[from] serde_json::Error),

    /// Extraction produced zero interaction edges.
    #[error("no valid interactions found in the document")]
    NoInteractions,

    /// Aggregation of a non-empty interaction set yielded zero edges.
    /// Unreachable by construction, but checked and reported rather than
    /// silently treated as success.
    #[error("aggregation produced an empty edge set")]
    EmptyAggregate,

    /// Unexpected failure inside a pipeline stage. Carries the failing
    /// stage name but never raw input contents.
    #[error("{stage} stage failed: {message}")]
    Internal {
        stage: &'static str,
        message: String,
    },
}

impl PipelineError {
    pub fn internal(stage: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            stage,
            message: message.into(),
        }
    }

    /// Stable machine-readable kind for transport shells.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Decode(_) => "decode",
            PipelineError::NoInteractions => "no_interactions",
            PipelineError::EmptyAggregate => "empty_aggregate",
            PipelineError::Internal { .. } => "internal",
        }
    }

    /// True when the failure is attributable to client input rather than
    /// an inconsistency inside the pipeline.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Decode(_) | PipelineError::NoInteractions
        )
    }
}
