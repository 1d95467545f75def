// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the threadsift command-line interface.
//!
//! Every subcommand loads a JSON forum dump into a [`MemoryStore`] and runs
//! one query against it: `topics` and `posts` search titles, `range` pages
//! through posts by creation time, and `serve-request` pushes a raw route and
//! query string through the request boundary exactly as an HTTP layer would.
//!
//! [`MemoryStore`]: threadsift::MemoryStore

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "threadsift",
    about = "Title and time-window queries over a forum dataset",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Rank window shared by every search.
#[derive(Args, Debug, Clone, Copy)]
pub struct WindowArgs {
    /// First rank of the candidate window (inclusive)
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Last rank of the candidate window (inclusive)
    #[arg(long, default_value_t = 19)]
    pub stop: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search topics by title keywords
    Topics {
        /// Path to the JSON dataset
        dataset: PathBuf,

        /// Keywords; any one matching is enough
        #[arg(required = true)]
        keywords: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,

        /// Tolerate typos in keywords
        #[arg(long)]
        fuzzy: bool,

        /// Caller user id (0 = guest)
        #[arg(long, default_value_t = 0)]
        uid: u64,
    },

    /// Search posts by their topic's title keywords
    Posts {
        /// Path to the JSON dataset
        dataset: PathBuf,

        /// Keywords; any one matching is enough
        #[arg(required = true)]
        keywords: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,

        /// Tolerate typos in keywords
        #[arg(long)]
        fuzzy: bool,

        /// Caller user id (0 = guest)
        #[arg(long, default_value_t = 0)]
        uid: u64,
    },

    /// List posts created inside a time range, newest first
    Range {
        /// Path to the JSON dataset
        dataset: PathBuf,

        /// Range start: epoch millis or ISO-8601
        #[arg(long)]
        from: String,

        /// Range end: epoch millis or ISO-8601
        #[arg(long)]
        to: String,

        #[command(flatten)]
        window: WindowArgs,

        /// Restrict to one category (-1 = all)
        #[arg(long, allow_hyphen_values = true)]
        cid: Option<i64>,

        /// Caller user id (0 = guest)
        #[arg(long, default_value_t = 0)]
        uid: u64,
    },

    /// Run one raw request through the API boundary and print the envelope
    ServeRequest {
        /// Path to the JSON dataset
        dataset: PathBuf,

        /// Route, e.g. `topics/search-by-title`
        route: String,

        /// Query string, e.g. `keywords=react&fuzzy=true`
        #[arg(default_value = "")]
        query: String,

        /// JSON file with boundary defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Caller user id (0 = guest)
        #[arg(long, default_value_t = 0)]
        uid: u64,
    },
}
