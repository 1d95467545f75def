// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Topic title search.

use super::QueryEngine;
use crate::error::QueryResult;
use crate::keywords::{KeywordInput, KeywordSet};
use crate::matcher::match_titles;
use crate::types::{CallerId, Capability, IndexKey, Order, RankWindow, TopicId, TopicSummary};
use tracing::debug;

impl QueryEngine<'_> {
    /// Topics in the recency window whose title matches any keyword.
    ///
    /// Results keep the order the topics had in the window.
    pub fn search_topics(
        &self,
        caller: CallerId,
        keywords: impl Into<KeywordInput>,
        window: RankWindow,
        fuzzy: bool,
    ) -> QueryResult<Vec<TopicSummary>> {
        let keywords = KeywordSet::parse(keywords)?;
        let Some((start, stop)) = window.bounds() else {
            debug!(?window, "empty topic window");
            return Ok(Vec::new());
        };

        let candidates: Vec<TopicId> = self
            .index
            .range_by_rank(IndexKey::TopicsRecent, start, stop, Order::Descending)?
            .into_iter()
            .map(TopicId)
            .collect();

        let readable =
            self.privileges
                .filter_topics(Capability::TopicsRead, &candidates, caller)?;
        if readable.is_empty() {
            debug!(candidates = candidates.len(), "no readable topics");
            return Ok(Vec::new());
        }

        let mut titles = self.titles.topic_titles(&readable)?;
        let pairs: Vec<(TopicId, String)> = readable
            .iter()
            .filter_map(|tid| titles.remove(tid).map(|title| (*tid, title)))
            .collect();

        let matched = match_titles(&pairs, &keywords, fuzzy);
        let ordered: Vec<TopicId> = readable
            .into_iter()
            .filter(|tid| matched.contains(tid))
            .collect();

        debug!(
            candidates = candidates.len(),
            titled = pairs.len(),
            matched = ordered.len(),
            fuzzy,
            "topic title search"
        );

        if ordered.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.summaries.topic_summaries(&ordered, caller)?)
    }
}
