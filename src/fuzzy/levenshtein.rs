// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance with an early-exit optimization.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance, so if two strings
//! differ in length by more than the threshold there is nothing to compute.
//! Titles are short, but a page of candidates times a handful of keywords
//! adds up, and most tokens are nowhere near the keyword.
//!
//! Inputs are expected to be lowercased already. Nothing in here touches case.

/// Classic Levenshtein distance: insertion, deletion, and substitution each
/// cost one. Counts `char`s, not bytes.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
        }
    }

    dp[b_len]
}

/// Are these strings within `max` edits of each other?
///
/// Bounded Levenshtein with two early-exit paths:
/// 1. If length difference exceeds `max`, return false immediately
/// 2. If minimum row value exceeds `max`, abandon the DP early
///
/// Both are sound: the answer always agrees with `edit_distance(a, b) <= max`.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    // Use character counts, not byte lengths, for Unicode correctness
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    // Early-exit: length difference is a lower bound on edit distance
    if a_len.abs_diff(b_len) > max {
        return false;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            if dp[j + 1] < min_row {
                min_row = dp[j + 1];
            }
        }

        // Early-exit: if minimum in this row exceeds max, no point continuing
        if min_row > max {
            return false;
        }
    }

    dp[b_len] <= max
}

/// Maximum edit distance tolerated for a keyword of `len` characters.
///
/// Roughly 30% of the keyword, never below one. Always strictly below `len`
/// once `len >= 2`, so a keyword can't fuzzy-match a token it shares nothing
/// with.
///
/// | len   | threshold |
/// |-------|-----------|
/// | 0..=6 | 1         |
/// | 7..=9 | 2         |
/// | 10..  | len * 3 / 10 |
#[inline]
pub fn fuzzy_threshold(len: usize) -> usize {
    if len <= 2 {
        return 1;
    }
    (len * 3 / 10).max(1).min(len - 1)
}

/// Does `token` pass as a misspelling of `keyword`?
///
/// Both sides must already be lowercase.
#[inline]
pub fn fuzzy_accept(keyword: &str, token: &str) -> bool {
    let max = fuzzy_threshold(keyword.chars().count());
    levenshtein_within(keyword, token, max)
}
