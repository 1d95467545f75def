// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The collaborators the engine reads from.
//!
//! The engine owns no data. Ordered indices, privileges, topic titles, and
//! summary rendering all live elsewhere; these traits are the contract. Every
//! method returns `anyhow::Result` because the engine never looks inside a
//! collaborator failure, it only hands it up.
//!
//! All traits are `Send + Sync` so a search can fan per-identifier work out
//! to a thread pool.

use crate::types::{
    CallerId, Capability, IndexKey, Order, PostId, PostSummary, SummaryOptions, TopicId,
    TopicSummary,
};
use anyhow::Result;
use std::collections::HashMap;

/// Ordered `id -> score` structures.
pub trait OrderedIndex: Send + Sync {
    /// Members ranked `start..=stop` in the given order.
    fn range_by_rank(&self, key: IndexKey, start: usize, stop: usize, order: Order)
        -> Result<Vec<u64>>;

    /// Members scored within `[min_score, max_score]`, highest score first,
    /// skipping `offset` of them and returning at most `count`.
    fn range_by_score(
        &self,
        key: IndexKey,
        offset: usize,
        count: usize,
        max_score: i64,
        min_score: i64,
    ) -> Result<Vec<u64>>;
}

/// Narrows identifiers to those a caller may read. Results keep input order.
pub trait PrivilegeOracle: Send + Sync {
    fn filter_topics(&self, capability: Capability, tids: &[TopicId], caller: CallerId)
        -> Result<Vec<TopicId>>;

    fn filter_posts(&self, capability: Capability, pids: &[PostId], caller: CallerId)
        -> Result<Vec<PostId>>;
}

/// Topic titles and post parentage.
///
/// Title matching needs both, and neither is owned by the engine.
pub trait TitleLookup: Send + Sync {
    /// Titles for the given topics. Unknown topics are simply absent.
    fn topic_titles(&self, tids: &[TopicId]) -> Result<HashMap<TopicId, String>>;

    /// Parent topic of each post, `None` where it can't be resolved.
    /// One entry per input, same order.
    fn parent_topics(&self, pids: &[PostId]) -> Result<Vec<(PostId, Option<TopicId>)>>;
}

/// Turns identifiers into display records, preserving order.
pub trait SummaryProjector: Send + Sync {
    fn topic_summaries(&self, tids: &[TopicId], caller: CallerId) -> Result<Vec<TopicSummary>>;

    fn post_summaries(
        &self,
        pids: &[PostId],
        caller: CallerId,
        options: SummaryOptions,
    ) -> Result<Vec<PostSummary>>;
}
