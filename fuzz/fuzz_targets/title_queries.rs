// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for keyword parsing and title matching.
//!
//! Arbitrary keywords against arbitrary titles: nothing may panic, and a
//! fuzzy match must accept everything an exact match accepts.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use threadsift::{title_matches, KeywordInput, KeywordSet};

#[derive(Debug, Arbitrary)]
struct TitleInput {
    title: String,
    keywords: Vec<String>,
    as_list: bool,
}

fuzz_target!(|input: TitleInput| {
    let title: String = input.title.chars().take(200).collect();
    let raw = if input.as_list {
        KeywordInput::List(input.keywords.into_iter().take(8).collect())
    } else {
        KeywordInput::Text(input.keywords.join(" ").chars().take(200).collect())
    };

    let Ok(keywords) = KeywordSet::parse(raw) else {
        return;
    };
    for term in keywords.iter() {
        assert!(!term.is_empty());
        assert_eq!(term, term.trim());
    }

    if title_matches(&title, &keywords, false) {
        assert!(title_matches(&title, &keywords, true));
    }
});
