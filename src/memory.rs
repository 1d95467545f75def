// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! An in-memory forum that plays every collaborator role.
//!
//! Sorted sets behave like Redis ones: members ordered by `(score, id)`,
//! rank ranges clamp at the end, missing keys read as empty. Privileges are
//! per-category read grants. Good enough to drive the CLI against a JSON
//! dump and to test the pipelines without a database.
//!
//! # Dataset format
//!
//! ```json
//! {
//!   "topics": [{"tid": 1, "cid": 1, "uid": 1, "title": "React Guide", "timestamp": 1000}],
//!   "posts":  [{"pid": 1, "tid": 1, "uid": 1, "content": "<p>hi</p>", "timestamp": 1000}],
//!   "grants": [{"cid": 1, "everyone": true}]
//! }
//! ```

use crate::store::{OrderedIndex, PrivilegeOracle, SummaryProjector, TitleLookup};
use crate::types::{
    CallerId, Capability, CategoryId, IndexKey, Order, PostId, PostSummary, SummaryOptions,
    TopicId, TopicSummary, UserId,
};
use crate::utils::strip_tags;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use tracing::debug;

// ============================================================================
// RECORDS
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecord {
    pub tid: TopicId,
    pub cid: CategoryId,
    pub uid: UserId,
    pub title: String,
    pub timestamp: i64,
    /// Recency score. Falls back to `timestamp`.
    #[serde(default)]
    pub last_post_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    pub pid: PostId,
    /// Parent topic. Posts without one are never matched by title.
    #[serde(default)]
    pub tid: Option<TopicId>,
    /// Category override. Defaults to the parent topic's category.
    #[serde(default)]
    pub cid: Option<CategoryId>,
    pub uid: UserId,
    pub content: String,
    pub timestamp: i64,
}

/// Read access to one category.
#[derive(Debug, Clone, Deserialize)]
pub struct Grant {
    pub cid: CategoryId,
    #[serde(default)]
    pub uids: Vec<UserId>,
    /// Readable by every caller, guests included.
    #[serde(default)]
    pub everyone: bool,
}

#[derive(Debug, Default, Deserialize)]
struct Dataset {
    #[serde(default)]
    topics: Vec<TopicRecord>,
    #[serde(default)]
    posts: Vec<PostRecord>,
    #[serde(default)]
    grants: Vec<Grant>,
}

// ============================================================================
// SORTED SET
// ============================================================================

#[derive(Debug, Default, Clone)]
struct SortedSet {
    /// `(score, member)`, ascending.
    entries: BTreeSet<(i64, u64)>,
    scores: HashMap<u64, i64>,
}

impl SortedSet {
    /// Insert or move `member` to `score`.
    fn add(&mut self, score: i64, member: u64) {
        if let Some(old) = self.scores.insert(member, score) {
            self.entries.remove(&(old, member));
        }
        self.entries.insert((score, member));
    }

    fn remove(&mut self, member: u64) {
        if let Some(old) = self.scores.remove(&member) {
            self.entries.remove(&(old, member));
        }
    }

    fn range_by_rank(&self, start: usize, stop: usize, order: Order) -> Vec<u64> {
        let len = self.entries.len();
        if start >= len || stop < start {
            return Vec::new();
        }
        let take = stop.min(len - 1) - start + 1;
        match order {
            Order::Ascending => self
                .entries
                .iter()
                .skip(start)
                .take(take)
                .map(|(_, m)| *m)
                .collect(),
            Order::Descending => self
                .entries
                .iter()
                .rev()
                .skip(start)
                .take(take)
                .map(|(_, m)| *m)
                .collect(),
        }
    }

    fn range_by_score(&self, offset: usize, count: usize, max: i64, min: i64) -> Vec<u64> {
        if min > max {
            return Vec::new();
        }
        self.entries
            .range((min, u64::MIN)..=(max, u64::MAX))
            .rev()
            .skip(offset)
            .take(count)
            .map(|(_, m)| *m)
            .collect()
    }
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    topics: HashMap<TopicId, TopicRecord>,
    posts: HashMap<PostId, PostRecord>,
    /// Effective category of each post.
    post_cids: HashMap<PostId, CategoryId>,
    /// Posts naming each topic as their parent.
    topic_posts: HashMap<TopicId, HashSet<PostId>>,
    sets: HashMap<IndexKey, SortedSet>,
    readers: HashMap<CategoryId, HashSet<UserId>>,
    public: HashSet<CategoryId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON dataset.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json).context("invalid dataset JSON")?;
        let mut store = MemoryStore::new();
        for topic in dataset.topics {
            store.add_topic(topic);
        }
        for post in dataset.posts {
            store.add_post(post);
        }
        for grant in dataset.grants {
            if grant.everyone {
                store.grant_everyone(grant.cid);
            }
            for uid in grant.uids {
                store.grant(grant.cid, uid);
            }
        }
        debug!(
            topics = store.topics.len(),
            posts = store.posts.len(),
            "loaded dataset"
        );
        Ok(store)
    }

    /// Read a JSON dataset from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to load dataset {}", path.display()))
    }

    /// Add or replace a topic. Posts inheriting its category follow it.
    pub fn add_topic(&mut self, topic: TopicRecord) {
        let (tid, cid) = (topic.tid, topic.cid);
        let score = topic.last_post_time.unwrap_or(topic.timestamp);
        self.sets
            .entry(IndexKey::TopicsRecent)
            .or_default()
            .add(score, tid.get());
        self.topics.insert(tid, topic);

        let stale: Vec<(PostId, i64)> = self
            .topic_posts
            .get(&tid)
            .into_iter()
            .flatten()
            .filter_map(|pid| self.posts.get(pid))
            .filter(|post| post.cid.is_none() && self.post_cids.get(&post.pid) != Some(&cid))
            .map(|post| (post.pid, post.timestamp))
            .collect();
        for (pid, timestamp) in stale {
            self.place_post(pid, timestamp, Some(cid));
        }
    }

    /// Add or replace a post. Without an explicit category it inherits its
    /// topic's, now or once the topic is added.
    pub fn add_post(&mut self, post: PostRecord) {
        let cid = post.cid.or_else(|| {
            post.tid
                .and_then(|tid| self.topics.get(&tid))
                .map(|topic| topic.cid)
        });

        let previous_tid = self.posts.get(&post.pid).and_then(|old| old.tid);
        if let Some(old) = previous_tid.filter(|old| Some(*old) != post.tid) {
            if let Some(pids) = self.topic_posts.get_mut(&old) {
                pids.remove(&post.pid);
            }
        }
        if let Some(tid) = post.tid {
            self.topic_posts.entry(tid).or_default().insert(post.pid);
        }

        self.sets
            .entry(IndexKey::PostsByTime)
            .or_default()
            .add(post.timestamp, post.pid.get());
        self.place_post(post.pid, post.timestamp, cid);
        self.posts.insert(post.pid, post);
    }

    /// Point a post at its category index, leaving any previous one.
    fn place_post(&mut self, pid: PostId, timestamp: i64, cid: Option<CategoryId>) {
        let previous = match cid {
            Some(cid) => self.post_cids.insert(pid, cid),
            None => self.post_cids.remove(&pid),
        };
        if let Some(old) = previous.filter(|old| Some(*old) != cid) {
            if let Some(set) = self.sets.get_mut(&IndexKey::CategoryPosts(old)) {
                set.remove(pid.get());
            }
        }
        if let Some(cid) = cid {
            self.sets
                .entry(IndexKey::CategoryPosts(cid))
                .or_default()
                .add(timestamp, pid.get());
        }
    }

    pub fn grant(&mut self, cid: CategoryId, uid: UserId) {
        self.readers.entry(cid).or_default().insert(uid);
    }

    pub fn grant_everyone(&mut self, cid: CategoryId) {
        self.public.insert(cid);
    }

    fn can_read(&self, cid: CategoryId, caller: CallerId) -> bool {
        self.public.contains(&cid)
            || self
                .readers
                .get(&cid)
                .is_some_and(|uids| uids.contains(&caller))
    }

    fn post_count(&self, tid: TopicId) -> u64 {
        self.topic_posts.get(&tid).map_or(0, HashSet::len) as u64
    }
}

impl OrderedIndex for MemoryStore {
    fn range_by_rank(
        &self,
        key: IndexKey,
        start: usize,
        stop: usize,
        order: Order,
    ) -> Result<Vec<u64>> {
        Ok(self
            .sets
            .get(&key)
            .map(|set| set.range_by_rank(start, stop, order))
            .unwrap_or_default())
    }

    fn range_by_score(
        &self,
        key: IndexKey,
        offset: usize,
        count: usize,
        max_score: i64,
        min_score: i64,
    ) -> Result<Vec<u64>> {
        Ok(self
            .sets
            .get(&key)
            .map(|set| set.range_by_score(offset, count, max_score, min_score))
            .unwrap_or_default())
    }
}

impl PrivilegeOracle for MemoryStore {
    fn filter_topics(
        &self,
        _capability: Capability,
        tids: &[TopicId],
        caller: CallerId,
    ) -> Result<Vec<TopicId>> {
        Ok(tids
            .iter()
            .copied()
            .filter(|tid| {
                self.topics
                    .get(tid)
                    .is_some_and(|topic| self.can_read(topic.cid, caller))
            })
            .collect())
    }

    fn filter_posts(
        &self,
        _capability: Capability,
        pids: &[PostId],
        caller: CallerId,
    ) -> Result<Vec<PostId>> {
        Ok(pids
            .iter()
            .copied()
            .filter(|pid| {
                self.post_cids
                    .get(pid)
                    .is_some_and(|cid| self.can_read(*cid, caller))
            })
            .collect())
    }
}

impl TitleLookup for MemoryStore {
    fn topic_titles(&self, tids: &[TopicId]) -> Result<HashMap<TopicId, String>> {
        Ok(tids
            .iter()
            .filter_map(|tid| self.topics.get(tid).map(|t| (*tid, t.title.clone())))
            .collect())
    }

    fn parent_topics(&self, pids: &[PostId]) -> Result<Vec<(PostId, Option<TopicId>)>> {
        Ok(pids
            .iter()
            .map(|pid| {
                let tid = self
                    .posts
                    .get(pid)
                    .and_then(|post| post.tid)
                    .filter(|tid| self.topics.contains_key(tid));
                (*pid, tid)
            })
            .collect())
    }
}

impl SummaryProjector for MemoryStore {
    fn topic_summaries(&self, tids: &[TopicId], _caller: CallerId) -> Result<Vec<TopicSummary>> {
        Ok(tids
            .iter()
            .filter_map(|tid| self.topics.get(tid))
            .map(|topic| TopicSummary {
                tid: topic.tid,
                cid: topic.cid,
                uid: topic.uid,
                title: topic.title.clone(),
                timestamp: topic.timestamp,
                post_count: self.post_count(topic.tid),
            })
            .collect())
    }

    fn post_summaries(
        &self,
        pids: &[PostId],
        _caller: CallerId,
        options: SummaryOptions,
    ) -> Result<Vec<PostSummary>> {
        Ok(pids
            .iter()
            .filter_map(|pid| self.posts.get(pid))
            .map(|post| PostSummary {
                pid: post.pid,
                tid: post.tid.unwrap_or(TopicId(0)),
                cid: self.post_cids.get(&post.pid).copied().unwrap_or(CategoryId(0)),
                uid: post.uid,
                content: if options.strip_tags {
                    strip_tags(&post.content)
                } else {
                    post.content.clone()
                },
                timestamp: post.timestamp,
            })
            .collect())
    }
}
