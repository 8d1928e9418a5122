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

//! End-to-end pipeline tests over realistic raw documents.

use serde_json::json;
use sociogram_core::pipeline::process_bytes;
use sociogram_core::AttrValue;

/// Three tweets: A replies to B, A mentions C and D, B retweets a tweet
/// (present in includes) authored by C. Four interactions, four weighted
/// edges, four nodes.
fn scenario_document() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": "100",
                "author_id": "A",
                "text": "@B you make a fair point",
                "in_reply_to_user_id": "B"
            },
            {
                "id": "101",
                "author_id": "A",
                "text": "shout out to @C and @D",
                "entities": {
                    "mentions": [
                        {"id": "C", "username": "c_user"},
                        {"id": "D", "username": "d_user"}
                    ]
                }
            },
            {
                "id": "102",
                "author_id": "B",
                "text": "RT @C: the original take",
                "referenced_tweets": [{"id": "900", "type": "retweeted"}],
                "entities": {
                    "mentions": [{"id": "C", "username": "c_user"}]
                }
            }
        ],
        "includes": {
            "tweets": [
                {"id": "900", "author_id": "C", "text": "the original take"}
            ],
            "users": [
                {"id": "A", "username": "alice", "name": "Alice"},
                {"id": "B", "username": "bob", "name": "Bob"},
                {"id": "C", "username": "carol", "name": "Carol"}
            ]
        }
    })
}

#[test]
fn end_to_end_scenario() {
    let doc = process_bytes(scenario_document().to_string().as_bytes()).unwrap();

    assert_eq!(doc.elements.nodes.len(), 4);
    assert_eq!(doc.elements.edges.len(), 4);

    // Every edge carries a weight of exactly one raw interaction.
    for edge in &doc.elements.edges {
        assert_eq!(edge.data["weight"], AttrValue::Int(1));
    }

    let edge_types: Vec<&AttrValue> = doc
        .elements
        .edges
        .iter()
        .map(|e| &e.data["type"])
        .collect();
    assert!(edge_types.contains(&&AttrValue::Str("reply".into())));
    assert!(edge_types.contains(&&AttrValue::Str("retweet".into())));
    assert!(edge_types.contains(&&AttrValue::Str("mentions".into())));
}

#[test]
fn labels_resolve_with_fallbacks() {
    let doc = process_bytes(scenario_document().to_string().as_bytes()).unwrap();

    let node = |id: &str| {
        doc.elements
            .nodes
            .iter()
            .find(|n| n.data["id"] == AttrValue::Str(id.into()))
            .unwrap()
    };

    assert_eq!(node("A").data["username"], AttrValue::Str("alice".into()));
    assert_eq!(node("A").data["name"], AttrValue::Str("Alice".into()));
    // D is absent from includes.users: label falls back to the raw id and
    // name to the empty string.
    assert_eq!(node("D").data["label"], AttrValue::Str("D".into()));
    assert_eq!(node("D").data["name"], AttrValue::Str("".into()));
}

#[test]
fn centralities_stay_in_bounds() {
    let doc = process_bytes(scenario_document().to_string().as_bytes()).unwrap();

    for node in &doc.elements.nodes {
        for key in ["in_degree_centrality", "out_degree_centrality"] {
            match &node.data[key] {
                AttrValue::Float(f) => assert!((0.0..=1.0).contains(f), "{key} out of bounds"),
                other => panic!("{key} should be a float, got {other:?}"),
            }
        }
    }
}

#[test]
fn exported_values_are_all_primitive() {
    let doc = process_bytes(scenario_document().to_string().as_bytes()).unwrap();
    let value = serde_json::to_value(&doc).unwrap();

    for collection in ["nodes", "edges"] {
        for element in value["elements"][collection].as_array().unwrap() {
            for v in element["data"].as_object().unwrap().values() {
                assert!(v.is_string() || v.is_number() || v.is_boolean());
            }
        }
    }
}

#[test]
fn raw_retweet_suppression_holds_end_to_end() {
    // Tweet 102 starts with "RT @": its mention of C must not create a
    // mentions edge on top of the retweet edge.
    let doc = process_bytes(scenario_document().to_string().as_bytes()).unwrap();

    let b_to_c: Vec<&AttrValue> = doc
        .elements
        .edges
        .iter()
        .filter(|e| {
            e.data["source"] == AttrValue::Str("B".into())
                && e.data["target"] == AttrValue::Str("C".into())
        })
        .map(|e| &e.data["type"])
        .collect();
    assert_eq!(b_to_c, vec![&AttrValue::Str("retweet".into())]);
}
