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

use axum::{extract::Multipart, Json};
use sociogram_core::export::CytoscapeDocument;
use sociogram_core::pipeline::process_bytes;
use tracing::{debug, info};

use crate::api::ApiError;

/// POST /api/process - Upload a raw capture and get the interaction graph back
///
/// Expects a multipart form with a `file` field holding a `.json` document of
/// raw platform records. Responds with the Cytoscape node-link document.
pub async fn process_upload(mut multipart: Multipart) -> Result<Json<CytoscapeDocument>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            debug!(field = ?field.name(), "Skipping unrecognized form field");
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ApiError::BadRequest("No selected file".to_string()));
        }
        if !filename.ends_with(".json") {
            return Err(ApiError::BadRequest(
                "Invalid file type, please upload a JSON file".to_string(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;

        info!(filename = %filename, size = bytes.len(), "Processing uploaded capture");
        let document = process_bytes(&bytes)?;
        info!(
            nodes = document.elements.nodes.len(),
            edges = document.elements.edges.len(),
            "Graph built"
        );

        return Ok(Json(document));
    }

    Err(ApiError::BadRequest(
        "No file part in the request".to_string(),
    ))
}
