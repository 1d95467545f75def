// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search pipelines: where the collaborators meet.
//!
//! Every query has the same shape:
//!
//! ```text
//! validate ──▶ candidate window ──▶ privilege filter ──▶ [title match] ──▶ project
//! ```
//!
//! Validation happens before any collaborator is called. Candidates come
//! from a bounded window of an ordered index, so pagination limits how many
//! candidates are examined, not how many results come back. Collaborator
//! failures are passed up untouched; there are no retries and no partial
//! results.

mod posts;
mod time_range;
mod topics;

use crate::store::{OrderedIndex, PrivilegeOracle, SummaryProjector, TitleLookup};

/// Stateless query front-end over borrowed collaborators.
///
/// Cheap to build per request. Concurrent searches share nothing.
#[derive(Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a dyn OrderedIndex,
    privileges: &'a dyn PrivilegeOracle,
    titles: &'a dyn TitleLookup,
    summaries: &'a dyn SummaryProjector,
}

impl<'a> QueryEngine<'a> {
    pub fn new(
        index: &'a dyn OrderedIndex,
        privileges: &'a dyn PrivilegeOracle,
        titles: &'a dyn TitleLookup,
        summaries: &'a dyn SummaryProjector,
    ) -> Self {
        QueryEngine {
            index,
            privileges,
            titles,
            summaries,
        }
    }

    /// Engine over one backend that plays every collaborator role.
    pub fn over<B>(backend: &'a B) -> Self
    where
        B: OrderedIndex + PrivilegeOracle + TitleLookup + SummaryProjector,
    {
        QueryEngine::new(backend, backend, backend, backend)
    }
}
