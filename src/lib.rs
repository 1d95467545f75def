// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Title keyword, fuzzy, and time-window queries over forum topics and posts.
//!
//! The engine owns no data. It pulls a bounded window of candidates from an
//! ordered index, asks a privilege oracle which ones the caller may read,
//! matches titles where the query calls for it, and has a projector render
//! the survivors.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  boundary   │────▶│   search     │────▶│  store (traits)  │
//! │ (params,    │     │ (topics,     │     │  OrderedIndex    │
//! │  envelope)  │     │  posts,      │     │  PrivilegeOracle │
//! └─────────────┘     │  time_range) │     │  TitleLookup     │
//!                     └──────────────┘     │  SummaryProjector│
//!                        │        │        └──────────────────┘
//!                        ▼        ▼
//!               ┌──────────┐  ┌──────────┐
//!               │ matcher  │  │  time    │
//!               │ keywords │  │          │
//!               │ fuzzy    │  │          │
//!               └──────────┘  └──────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use threadsift::{MemoryStore, QueryEngine, RankWindow, UserId};
//!
//! let store = MemoryStore::load("forum.json")?;
//! let engine = QueryEngine::over(&store);
//! let topics = engine.search_topics(UserId(1), "javascript", RankWindow::new(0, 19), true)?;
//! ```

pub mod boundary;
pub mod error;
pub mod fuzzy;
pub mod keywords;
pub mod matcher;
pub mod memory;
pub mod search;
pub mod store;
pub mod testing;
pub mod time;
mod types;
mod utils;

pub use boundary::{ApiResponse, BoundaryConfig, Params, QueryBoundary, Route};
pub use error::{QueryError, QueryResult};
pub use fuzzy::{edit_distance, fuzzy_accept, fuzzy_threshold, levenshtein_within};
pub use keywords::{KeywordInput, KeywordSet};
pub use matcher::{match_titles, title_matches};
pub use memory::{Grant, MemoryStore, PostRecord, TopicRecord};
pub use search::QueryEngine;
pub use store::{OrderedIndex, PrivilegeOracle, SummaryProjector, TitleLookup};
pub use time::{TimeInput, TimeRange};
pub use types::{
    CallerId, Capability, CategoryId, CategoryScope, IndexKey, Order, PostId, PostSummary,
    RankWindow, SummaryOptions, TimeRangePage, TopicId, TopicSummary, UserId,
};
pub use utils::strip_tags;
