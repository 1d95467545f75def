// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the request boundary.
//!
//! Any query string on any route must come back as a 200 or a 400. A 500
//! here would mean the in-memory backend failed, which it never does.

#![no_main]

use libfuzzer_sys::fuzz_target;
use threadsift::testing::{small_forum, READER};
use threadsift::{BoundaryConfig, MemoryStore, QueryBoundary, QueryEngine, Route};

fuzz_target!(|data: &[u8]| {
    static STORE: std::sync::OnceLock<MemoryStore> = std::sync::OnceLock::new();
    let store = STORE.get_or_init(small_forum);
    let boundary = QueryBoundary::new(QueryEngine::over(store), BoundaryConfig::default());

    let query = String::from_utf8_lossy(data);
    for route in [Route::TopicsByTitle, Route::PostsByTitle, Route::PostsByTime] {
        let response = boundary.handle(route, &query, READER);
        assert!(
            response.status == 200 || response.status == 400,
            "{} on {} for {:?}",
            response.status,
            route,
            query
        );
    }
});
