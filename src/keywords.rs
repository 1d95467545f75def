// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keyword normalization.
//!
//! Requests arrive with keywords as a sentence, a list, or something else
//! entirely. This is the one place that cares: everything downstream sees a
//! [`KeywordSet`] of lowercase, non-empty tokens in the order given.
//!
//! A sentence is split on whitespace. List entries are trimmed but not split,
//! so `["node js"]` stays a single two-word keyword.

use crate::error::{QueryError, QueryResult};
use serde_json::Value;

/// Keywords exactly as the caller shaped them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordInput {
    /// Absent or null.
    Missing,
    Text(String),
    List(Vec<String>),
    /// Any other shape (number, boolean, object). Carries the shape name.
    Other(&'static str),
}

impl From<Option<&Value>> for KeywordInput {
    fn from(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => KeywordInput::Missing,
            Some(Value::String(s)) => KeywordInput::Text(s.clone()),
            Some(Value::Array(items)) => KeywordInput::List(items.iter().map(stringify).collect()),
            Some(Value::Number(_)) => KeywordInput::Other("number"),
            Some(Value::Bool(_)) => KeywordInput::Other("boolean"),
            Some(Value::Object(_)) => KeywordInput::Other("object"),
        }
    }
}

impl From<&str> for KeywordInput {
    fn from(text: &str) -> Self {
        KeywordInput::Text(text.to_string())
    }
}

impl From<String> for KeywordInput {
    fn from(text: String) -> Self {
        KeywordInput::Text(text)
    }
}

impl From<Vec<String>> for KeywordInput {
    fn from(list: Vec<String>) -> Self {
        KeywordInput::List(list)
    }
}

impl<S: AsRef<str>> From<&[S]> for KeywordInput {
    fn from(list: &[S]) -> Self {
        KeywordInput::List(list.iter().map(|s| s.as_ref().to_string()).collect())
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for KeywordInput {
    fn from(list: [S; N]) -> Self {
        KeywordInput::List(list.iter().map(|s| s.as_ref().to_string()).collect())
    }
}

/// List entries that aren't strings are taken by their text form.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Normalized keywords. Never empty; every term is lowercase and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    terms: Vec<String>,
}

impl KeywordSet {
    /// Validate and normalize raw keywords.
    ///
    /// Fails with [`QueryError::InvalidKeyword`] when nothing usable is left.
    pub fn parse(input: impl Into<KeywordInput>) -> QueryResult<Self> {
        let terms: Vec<String> = match input.into() {
            KeywordInput::Text(text) => text.split_whitespace().map(str::to_lowercase).collect(),
            KeywordInput::List(items) => items
                .iter()
                .map(|k| k.trim())
                .filter(|k| !k.is_empty())
                .map(str::to_lowercase)
                .collect(),
            KeywordInput::Missing | KeywordInput::Other(_) => Vec::new(),
        };

        if terms.is_empty() {
            return Err(QueryError::InvalidKeyword);
        }
        Ok(KeywordSet { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
