// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posts by creation time.

use super::QueryEngine;
use crate::error::QueryResult;
use crate::time::{TimeInput, TimeRange};
use crate::types::{
    CallerId, Capability, CategoryScope, IndexKey, PostId, RankWindow, SummaryOptions,
    TimeRangePage,
};
use tracing::debug;

impl QueryEngine<'_> {
    /// Posts created within `[start_time, end_time]`, newest first.
    ///
    /// `start..=stop` pages through the matching posts; `next_start` on the
    /// result is `stop + 1`. `scope` picks a category's index or the global
    /// one.
    pub fn search_time_range(
        &self,
        caller: CallerId,
        start_time: impl Into<TimeInput>,
        end_time: impl Into<TimeInput>,
        start: usize,
        stop: usize,
        scope: CategoryScope,
    ) -> QueryResult<TimeRangePage> {
        let range = TimeRange::new(start_time, end_time)?;
        let next_start = stop.saturating_add(1);

        let count = RankWindow::new(start, stop).len();
        if count == 0 {
            return Ok(TimeRangePage {
                posts: Vec::new(),
                next_start,
            });
        }

        let key = IndexKey::posts_in(scope);
        let candidates: Vec<PostId> = self
            .index
            .range_by_score(key, start, count, range.end_ms, range.start_ms)?
            .into_iter()
            .map(PostId)
            .collect();

        let readable = self
            .privileges
            .filter_posts(Capability::TopicsRead, &candidates, caller)?;

        debug!(
            index = %key,
            start_ms = range.start_ms,
            end_ms = range.end_ms,
            candidates = candidates.len(),
            readable = readable.len(),
            "time range search"
        );

        let posts = if readable.is_empty() {
            Vec::new()
        } else {
            self.summaries
                .post_summaries(&readable, caller, SummaryOptions { strip_tags: true })?
        };
        Ok(TimeRangePage { posts, next_start })
    }
}
