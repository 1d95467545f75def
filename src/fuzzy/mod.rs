// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! A plain Levenshtein distance for callers that want the number, a bounded
//! variant that bails out early, and the length-scaled acceptance rule the
//! title matcher uses.

mod levenshtein;

pub use levenshtein::*;
