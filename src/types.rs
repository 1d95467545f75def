// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The vocabulary shared by the collaborators and the search pipelines.
//!
//! Identifiers are opaque positive integers owned by the forum store. They
//! get newtypes here so a post id can't be handed to something expecting a
//! topic id; the two namespaces overlap numerically and mixing them up gives
//! plausible-looking garbage rather than an error.
//!
//! # Invariants
//!
//! - **RankWindow**: `start <= stop` whenever bounds are present. A window
//!   built from reversed, negative, or non-numeric bounds has no bounds and
//!   yields no candidates.
//! - **CategoryScope**: `Category(cid)` always names a real category id;
//!   the "all categories" sentinel (`-1`, `0`, absent) is `All`.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NEWTYPES: identifiers
// =============================================================================

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Get the underlying value.
            #[inline]
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(
    /// Topic identifier (`tid`).
    TopicId
);
id_newtype!(
    /// Post identifier (`pid`).
    PostId
);
id_newtype!(
    /// User identifier (`uid`). `0` is a guest.
    UserId
);
id_newtype!(
    /// Category identifier (`cid`).
    CategoryId
);

/// The identity privileges are checked against.
pub type CallerId = UserId;

impl UserId {
    pub const GUEST: UserId = UserId(0);
}

/// Which category's post index a time-range query scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryScope {
    #[default]
    All,
    Category(CategoryId),
}

impl CategoryScope {
    /// Interpret a raw category argument. Absent, zero, and negative values
    /// (the `-1` sentinel included) all mean "every category".
    pub fn from_raw(cid: Option<i64>) -> Self {
        match cid {
            Some(cid) if cid > 0 => CategoryScope::Category(CategoryId(cid as u64)),
            _ => CategoryScope::All,
        }
    }
}

// =============================================================================
// ORDERED INDICES
// =============================================================================

/// Names of the ordered indices the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKey {
    /// Topics scored by last activity.
    TopicsRecent,
    /// Every post scored by creation time.
    PostsByTime,
    /// One category's posts scored by creation time.
    CategoryPosts(CategoryId),
}

impl IndexKey {
    /// Post-by-time index for a category scope.
    pub fn posts_in(scope: CategoryScope) -> Self {
        match scope {
            CategoryScope::All => IndexKey::PostsByTime,
            CategoryScope::Category(cid) => IndexKey::CategoryPosts(cid),
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::TopicsRecent => f.write_str("topics:recent"),
            IndexKey::PostsByTime => f.write_str("posts:pid"),
            IndexKey::CategoryPosts(cid) => write!(f, "cid:{}:pids", cid),
        }
    }
}

/// Direction of a rank range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Privileges the engine asks the oracle about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    TopicsRead,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::TopicsRead => f.write_str("topics:read"),
        }
    }
}

// =============================================================================
// CANDIDATE WINDOWS
// =============================================================================

/// Inclusive `[start, stop]` slice of an ordered index.
///
/// Pagination bounds the candidate pool, not the result pool: a window of
/// ten candidates can produce anywhere from zero to ten results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankWindow {
    bounds: Option<(usize, usize)>,
}

impl RankWindow {
    /// Window with no candidates.
    pub const EMPTY: RankWindow = RankWindow { bounds: None };

    /// `stop < start` gives an empty window rather than an error.
    pub fn new(start: usize, stop: usize) -> Self {
        RankWindow {
            bounds: (start <= stop).then_some((start, stop)),
        }
    }

    /// Lenient construction from raw request text. Anything that isn't a
    /// non-negative integer yields [`RankWindow::EMPTY`].
    pub fn parse(start: &str, stop: &str) -> Self {
        match (start.trim().parse::<usize>(), stop.trim().parse::<usize>()) {
            (Ok(start), Ok(stop)) => RankWindow::new(start, stop),
            _ => RankWindow::EMPTY,
        }
    }

    /// `(start, stop)` if the window can hold any candidates.
    #[inline]
    pub fn bounds(&self) -> Option<(usize, usize)> {
        self.bounds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Number of rank slots covered.
    pub fn len(&self) -> usize {
        self.bounds.map_or(0, |(start, stop)| (stop - start).saturating_add(1))
    }
}

// =============================================================================
// SUMMARIES
// =============================================================================

/// Projection options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryOptions {
    /// Remove `<...>` markup from post content.
    pub strip_tags: bool,
}

/// Display-ready topic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    pub tid: TopicId,
    pub cid: CategoryId,
    pub uid: UserId,
    pub title: String,
    pub timestamp: i64,
    #[serde(rename = "postcount")]
    pub post_count: u64,
}

/// Display-ready post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub pid: PostId,
    pub tid: TopicId,
    pub cid: CategoryId,
    pub uid: UserId,
    pub content: String,
    pub timestamp: i64,
}

/// Time-range results plus the rank the next page starts at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangePage {
    pub posts: Vec<PostSummary>,
    pub next_start: usize,
}
