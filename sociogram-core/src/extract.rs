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

//! Interaction Extraction
//!
//! Walks the raw export and emits one typed [`Interaction`] per
//! conversational act, resolving references against the document's own
//! `includes` section. This stage encodes the platform semantics the rest
//! of the pipeline relies on:
//!
//! - a retweet whose original is missing from `includes.tweets` (deleted,
//!   or the author went private) is attributed to the tweet's first
//!   mention, which the platform places at the `RT @author` position;
//! - replies within a self-thread are dropped;
//! - mentions inside a raw `RT @...` text are retweet markup, not genuine
//!   author mentions, and are suppressed wholesale;
//! - a mention of the user being replied to duplicates the reply edge and
//!   is suppressed per-mention (other mentions in the same tweet survive).
//!
//! Unresolvable references are dropped silently; they are expected noise in
//! real exports, not errors.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{Interaction, InteractionKind, RawDocument, RawTweet, RefKind, UserLookup};

/// Literal prefix the platform puts on raw, unparsed retweets.
const RAW_RETWEET_PREFIX: &str = "RT @";

/// Extract every interaction edge from a decoded export, together with the
/// user lookup table used later for label enrichment.
///
/// Tweets without an `author_id` are skipped without error. No emitted
/// interaction ever has `source == target`.
pub fn extract_interactions(doc: &RawDocument) -> (Vec<Interaction>, UserLookup) {
    let referenced_tweets_by_id: HashMap<&str, &RawTweet> = doc
        .includes
        .tweets
        .iter()
        .map(|tweet| (tweet.id.as_str(), tweet))
        .collect();

    let users: UserLookup = doc
        .includes
        .users
        .iter()
        .map(|user| (user.id.clone(), user.clone()))
        .collect();

    let mut interactions = Vec::new();

    for tweet in &doc.data {
        let source = match tweet.author_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => continue,
        };

        extract_reply(tweet, source, &mut interactions);
        extract_references(tweet, source, &referenced_tweets_by_id, &mut interactions);
        extract_mentions(tweet, source, &mut interactions);
    }

    debug!(
        interactions = interactions.len(),
        users = users.len(),
        tweets = doc.data.len(),
        "extraction finished"
    );

    (interactions, users)
}

fn extract_reply(tweet: &RawTweet, source: &str, out: &mut Vec<Interaction>) {
    if let Some(target) = tweet.in_reply_to_user_id.as_deref() {
        if !target.is_empty() {
            out.extend(Interaction::new(source, target, InteractionKind::Reply));
        }
    }
}

fn extract_references(
    tweet: &RawTweet,
    source: &str,
    referenced_tweets_by_id: &HashMap<&str, &RawTweet>,
    out: &mut Vec<Interaction>,
) {
    for reference in &tweet.referenced_tweets {
        // Reply threads are already covered by the in_reply_to_user_id edge.
        let kind = match reference.kind {
            RefKind::RepliedTo | RefKind::Other => continue,
            RefKind::Retweeted => InteractionKind::Retweet,
            RefKind::Quoted => InteractionKind::Quote,
        };

        let original = referenced_tweets_by_id.get(reference.id.as_str());

        let target = match (original, reference.kind) {
            (Some(original), _) => original.author_id.as_deref(),
            // Original gone from includes: for a retweet, the first mention
            // is the presumed original author. Quotes have no fallback.
            (None, RefKind::Retweeted) => tweet
                .entities
                .mentions
                .first()
                .and_then(|mention| mention.id.as_deref()),
            (None, _) => None,
        };

        if let Some(target) = target {
            if !target.is_empty() {
                out.extend(Interaction::new(source, target, kind));
            }
        }
    }
}

fn extract_mentions(tweet: &RawTweet, source: &str, out: &mut Vec<Interaction>) {
    // Mentions inside a raw retweet body are markup, not author mentions.
    if tweet.text.starts_with(RAW_RETWEET_PREFIX) {
        return;
    }

    let reply_target = tweet.in_reply_to_user_id.as_deref();

    for mention in &tweet.entities.mentions {
        let Some(target) = mention.id.as_deref() else {
            continue;
        };
        if target.is_empty() || reply_target == Some(target) {
            continue;
        }
        out.extend(Interaction::new(source, target, InteractionKind::Mentions));
    }
}
