//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures so every test agrees on what the forum
//! looks like.

#![doc(hidden)]

use crate::memory::{MemoryStore, PostRecord, TopicRecord};
use crate::types::{CategoryId, PostId, TopicId, UserId};

/// Caller granted read access to [`FIXTURE_CID`].
pub const READER: UserId = UserId(1);

/// Caller with no grants at all.
pub const OUTSIDER: UserId = UserId(99);

/// Category every fixture topic lives in.
pub const FIXTURE_CID: CategoryId = CategoryId(1);

/// Create a topic record. Recency falls back to `timestamp`.
pub fn make_topic(tid: u64, cid: CategoryId, title: &str, timestamp: i64) -> TopicRecord {
    TopicRecord {
        tid: TopicId(tid),
        cid,
        uid: READER,
        title: title.to_string(),
        timestamp,
        last_post_time: None,
    }
}

/// Create a post record inheriting its topic's category.
pub fn make_post(pid: u64, tid: u64, content: &str, timestamp: i64) -> PostRecord {
    PostRecord {
        pid: PostId(pid),
        tid: Some(TopicId(tid)),
        cid: None,
        uid: READER,
        content: content.to_string(),
        timestamp,
    }
}

/// A store with one topic per title, each with a single opening post.
///
/// Titles are listed newest first: the first title gets tid/pid 1 and the
/// highest timestamp, so window order equals slice order.
pub fn store_with_titles(titles: &[&str]) -> MemoryStore {
    let mut store = MemoryStore::new();
    let n = titles.len() as i64;
    for (i, title) in titles.iter().enumerate() {
        let id = i as u64 + 1;
        let timestamp = (n - i as i64) * 1_000;
        store.add_topic(make_topic(id, FIXTURE_CID, title, timestamp));
        store.add_post(make_post(
            id,
            id,
            &format!("<p>This is a test topic about {}</p>", title),
            timestamp,
        ));
    }
    store.grant(FIXTURE_CID, READER);
    store
}

/// The three-topic forum: JavaScript, Python, React, newest first.
pub fn small_forum() -> MemoryStore {
    store_with_titles(&["JavaScript Fundamentals", "Python Basics", "React Guide"])
}

/// Seven programming topics, newest first.
pub fn keyword_forum() -> MemoryStore {
    store_with_titles(&KEYWORD_TITLES)
}

pub const KEYWORD_TITLES: [&str; 7] = [
    "JavaScript Programming Tutorial",
    "NodeJS Backend Development",
    "React Frontend Framework",
    "Python Data Science",
    "Machine Learning with JavaScript",
    "Database Design Principles",
    "Web Development Best Practices",
];
