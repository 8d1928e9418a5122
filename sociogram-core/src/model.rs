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

//! Raw platform records and interaction tuples.
//!
//! Raw exports are heterogeneous and partially missing: almost every field
//! below defaults when absent so that a truncated export still decodes.
//! Field access downstream is therefore always a checked lookup with a
//! documented fallback, never a panic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User profiles from `includes.users`, indexed by user id.
///
/// Request-scoped: built fresh by the extractor for each document and
/// dropped with the response.
pub type UserLookup = HashMap<String, RawUser>;

/// A full decoded export: the tweets under study plus the referenced
/// tweets and user profiles the platform bundled alongside them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub data: Vec<RawTweet>,
    #[serde(default)]
    pub includes: Includes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub tweets: Vec<RawTweet>,
    #[serde(default)]
    pub users: Vec<RawUser>,
}

/// One post from the export. Immutable input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTweet {
    #[serde(default)]
    pub id: String,
    /// Absent for tweets the platform redacted; such tweets are skipped.
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub in_reply_to_user_id: Option<String>,
    #[serde(default)]
    pub referenced_tweets: Vec<TweetRef>,
    #[serde(default)]
    pub entities: Entities,
}

/// A reference from one tweet to another (retweet, quote, reply thread).
#[derive(Debug, Clone, Deserialize)]
pub struct TweetRef {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RefKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    RepliedTo,
    Retweeted,
    Quoted,
    /// Reference kinds this pipeline does not know about decode here and
    /// are ignored instead of failing the whole document.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub mentions: Vec<Mention>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mention {
    /// Mentions without a resolved user id carry no graph signal.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: String,
}

/// One user profile from `includes.users`. Immutable input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
}

/// A single typed interaction edge between two actors.
///
/// Invariant: `source != target`. Self-interactions are rejected at
/// construction so nothing downstream has to re-check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interaction {
    pub source: String,
    pub target: String,
    pub kind: InteractionKind,
}

impl Interaction {
    /// Returns `None` when source and target coincide.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: InteractionKind,
    ) -> Option<Self> {
        let source = source.into();
        let target = target.into();
        if source == target {
            return None;
        }
        Some(Self {
            source,
            target,
            kind,
        })
    }
}

/// The kind of conversational act an interaction encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Reply,
    Retweet,
    Quote,
    Mentions,
}

impl InteractionKind {
    /// Wire name used in exported edge attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Reply => "reply",
            InteractionKind::Retweet => "retweet",
            InteractionKind::Quote => "quote",
            InteractionKind::Mentions => "mentions",
        }
    }
}
