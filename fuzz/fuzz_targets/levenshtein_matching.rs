// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for bounded edit distance.
//!
//! The banded check must agree with the full distance table for every pair,
//! including multi-byte characters where byte and char lengths differ.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use threadsift::{edit_distance, fuzzy_accept, fuzzy_threshold, levenshtein_within};

#[derive(Debug, Arbitrary)]
struct MatchInput {
    keyword: String,
    token: String,
    max: u8,
}

fuzz_target!(|input: MatchInput| {
    // Cap lengths to avoid timeouts
    let keyword: String = input.keyword.chars().take(40).collect();
    let token: String = input.token.chars().take(80).collect();
    let max = usize::from(input.max % 8);

    let distance = edit_distance(&keyword, &token);
    assert_eq!(
        levenshtein_within(&keyword, &token, max),
        distance <= max,
        "banded check disagrees for {:?} / {:?} at {}",
        keyword,
        token,
        max
    );
    assert_eq!(distance, edit_distance(&token, &keyword));

    let threshold = fuzzy_threshold(keyword.chars().count());
    assert_eq!(fuzzy_accept(&keyword, &token), distance <= threshold);
});
