// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Post title search.
//!
//! Posts have no title of their own; a post matches when its parent topic's
//! title does. Several candidates usually share a parent, so titles are
//! fetched and matched once per distinct topic.

use super::QueryEngine;
use crate::error::QueryResult;
use crate::keywords::{KeywordInput, KeywordSet};
use crate::matcher::match_titles;
use crate::types::{
    CallerId, Capability, IndexKey, Order, PostId, PostSummary, RankWindow, SummaryOptions,
    TopicId,
};
use std::collections::HashSet;
use tracing::{debug, warn};

impl QueryEngine<'_> {
    /// Posts in the global recency window whose parent topic title matches
    /// any keyword. Summaries come back tag-stripped, in window order.
    ///
    /// A post whose parent can't be resolved is dropped.
    pub fn search_posts(
        &self,
        caller: CallerId,
        keywords: impl Into<KeywordInput>,
        window: RankWindow,
        fuzzy: bool,
    ) -> QueryResult<Vec<PostSummary>> {
        let keywords = KeywordSet::parse(keywords)?;
        let Some((start, stop)) = window.bounds() else {
            debug!(?window, "empty post window");
            return Ok(Vec::new());
        };

        let candidates: Vec<PostId> = self
            .index
            .range_by_rank(IndexKey::PostsByTime, start, stop, Order::Descending)?
            .into_iter()
            .map(PostId)
            .collect();

        let readable = self
            .privileges
            .filter_posts(Capability::TopicsRead, &candidates, caller)?;
        if readable.is_empty() {
            debug!(candidates = candidates.len(), "no readable posts");
            return Ok(Vec::new());
        }

        let parents = self.titles.parent_topics(&readable)?;
        let orphans = parents.iter().filter(|(_, tid)| tid.is_none()).count();
        if orphans > 0 {
            warn!(orphans, "posts without a resolvable topic skipped");
        }

        let mut seen = HashSet::new();
        let tids: Vec<TopicId> = parents
            .iter()
            .filter_map(|(_, tid)| *tid)
            .filter(|tid| seen.insert(*tid))
            .collect();
        if tids.is_empty() {
            return Ok(Vec::new());
        }

        let pairs: Vec<(TopicId, String)> = self.titles.topic_titles(&tids)?.into_iter().collect();
        let matched = match_titles(&pairs, &keywords, fuzzy);

        let pids: Vec<PostId> = parents
            .into_iter()
            .filter_map(|(pid, tid)| tid.filter(|tid| matched.contains(tid)).map(|_| pid))
            .collect();

        debug!(
            candidates = candidates.len(),
            topics = tids.len(),
            matched = pids.len(),
            fuzzy,
            "post title search"
        );

        if pids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .summaries
            .post_summaries(&pids, caller, SummaryOptions { strip_tags: true })?)
    }
}
