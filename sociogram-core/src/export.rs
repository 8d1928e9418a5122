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

//! Cytoscape node-link export.
//!
//! Serializes the enriched graph into the `{data, elements: {nodes, edges}}`
//! interchange shape a graph-visualization client consumes directly.
//!
//! Type-coercion invariant: every value nested under a `data` key is a
//! string, number or boolean. Attributes of any other JSON shape (null,
//! arrays, objects) are stringified, never dropped, so the document
//! round-trips through any generic JSON serializer.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::graph::InteractionGraph;

/// A strictly primitive attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl AttrValue {
    /// Coerce an arbitrary JSON value into a primitive. Composite and null
    /// values become their string representation.
    pub fn coerce(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => AttrValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AttrValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    AttrValue::Float(f)
                } else {
                    AttrValue::Str(n.to_string())
                }
            }
            serde_json::Value::String(s) => AttrValue::Str(s),
            other => AttrValue::Str(other.to_string()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

impl From<u64> for AttrValue {
    fn from(i: u64) -> Self {
        AttrValue::Int(i as i64)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

#[derive(Debug, Serialize)]
pub struct CytoscapeDocument {
    /// Top-level graph metadata.
    pub data: BTreeMap<String, AttrValue>,
    pub elements: Elements,
}

#[derive(Debug, Serialize)]
pub struct Elements {
    pub nodes: Vec<Element>,
    pub edges: Vec<Element>,
}

/// One node or edge, wrapped in the `{"data": {...}}` envelope Cytoscape
/// expects.
#[derive(Debug, Serialize)]
pub struct Element {
    pub data: BTreeMap<String, AttrValue>,
}

/// Serialize the enriched graph.
pub fn export_graph(graph: &InteractionGraph) -> CytoscapeDocument {
    let mut meta = BTreeMap::new();
    meta.insert("directed".to_string(), AttrValue::Bool(true));

    let nodes = graph
        .nodes()
        .map(|(id, attrs)| {
            let mut data: BTreeMap<String, AttrValue> = BTreeMap::new();
            data.insert("id".into(), id.clone().into());
            data.insert("label".into(), attrs.label.clone().into());
            data.insert("name".into(), attrs.name.clone().into());
            data.insert("username".into(), attrs.username.clone().into());
            data.insert(
                "in_degree_centrality".into(),
                attrs.in_degree_centrality.into(),
            );
            data.insert(
                "out_degree_centrality".into(),
                attrs.out_degree_centrality.into(),
            );
            data.insert("community".into(), attrs.community.into());
            for (key, value) in &attrs.extra {
                data.insert(key.clone(), AttrValue::coerce(value.clone()));
            }
            Element { data }
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| {
            let mut data: BTreeMap<String, AttrValue> = BTreeMap::new();
            data.insert("source".into(), edge.source.clone().into());
            data.insert("target".into(), edge.target.clone().into());
            data.insert("type".into(), edge.kind.as_str().into());
            if let Some(weight) = edge.weight {
                data.insert("weight".into(), weight.into());
            }
            Element { data }
        })
        .collect();

    CytoscapeDocument {
        data: meta,
        elements: Elements { nodes, edges },
    }
}
