// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Title matching: does any keyword appear in this title?
//!
//! Two tiers per keyword, cheapest first:
//!
//! 1. **Exact**: the lowercased title contains the keyword as a substring.
//! 2. **Fuzzy** (opt-in): some whitespace-delimited title token is within
//!    [`fuzzy_threshold`](crate::fuzzy::fuzzy_threshold) edits of the keyword.
//!
//! The exact tier always runs, so turning fuzzy on can only grow the result
//! set. Keywords are OR'd: the first one that hits decides, the rest are
//! skipped. There is no scoring; a title matches or it doesn't.

use crate::fuzzy::fuzzy_accept;
use crate::keywords::KeywordSet;
use std::collections::HashSet;
use std::hash::Hash;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Does `title` satisfy any keyword?
///
/// The title is lowercased here, once. An empty title never matches.
pub fn title_matches(title: &str, keywords: &KeywordSet, fuzzy: bool) -> bool {
    if title.is_empty() {
        return false;
    }
    let title = title.to_lowercase();

    keywords.iter().any(|keyword| {
        if title.contains(keyword) {
            return true;
        }
        fuzzy && title.split_whitespace().any(|token| fuzzy_accept(keyword, token))
    })
}

/// Identifiers whose title matches any keyword.
///
/// Order of `titles` is irrelevant; callers restore candidate order
/// themselves. With the `parallel` feature the titles are checked on the
/// rayon pool.
pub fn match_titles<Id>(titles: &[(Id, String)], keywords: &KeywordSet, fuzzy: bool) -> HashSet<Id>
where
    Id: Copy + Eq + Hash + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        titles
            .par_iter()
            .filter(|(_, title)| title_matches(title, keywords, fuzzy))
            .map(|(id, _)| *id)
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        titles
            .iter()
            .filter(|(_, title)| title_matches(title, keywords, fuzzy))
            .map(|(id, _)| *id)
            .collect()
    }
}
