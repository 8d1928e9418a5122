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

//! Label enrichment.
//!
//! Attaches human-readable labels from the user lookup built during
//! extraction. Every node receives all three attributes unconditionally:
//! unresolved users fall back to the raw id (label/username) or the empty
//! string (name) rather than omitting the attribute.

use crate::graph::InteractionGraph;
use crate::model::UserLookup;

pub fn enrich_labels(graph: &mut InteractionGraph, users: &UserLookup) {
    for (id, attrs) in graph.nodes_mut() {
        match users.get(id) {
            Some(user) => {
                attrs.label = user.username.clone();
                attrs.username = user.username.clone();
                attrs.name = user.name.clone();
            }
            None => {
                attrs.label = id.clone();
                attrs.username = id.clone();
                attrs.name = String::new();
            }
        }
    }
}
