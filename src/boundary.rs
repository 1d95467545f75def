// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request glue: raw query parameters in, API envelope out.
//!
//! This layer owns parameter presence and shape (is `keywords` there, is
//! `fuzzy` a boolean, where does the window default to) and the mapping of
//! engine errors to status codes. It does not own any search semantics, and
//! it is not an HTTP server; whatever serves HTTP hands it a route and a
//! query string.
//!
//! # Envelope
//!
//! ```json
//! {"status": {"code": "ok", "message": "OK"}, "response": {"topics": []}}
//! {"status": {"code": "bad-request", "message": "..."}, "response": {}}
//! ```

use crate::error::QueryError;
use crate::keywords::KeywordInput;
use crate::search::QueryEngine;
use crate::time::TimeInput;
use crate::types::{CallerId, CategoryScope, RankWindow};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Defaults and limits applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoundaryConfig {
    pub default_start: usize,
    pub default_stop: usize,
    /// Largest candidate window a single request may ask for. Bigger
    /// windows are shortened, not rejected.
    pub max_window: usize,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        BoundaryConfig {
            default_start: 0,
            default_stop: 19,
            max_window: 200,
        }
    }
}

impl BoundaryConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        use anyhow::Context;
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("invalid config {}", path.display()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    TopicsByTitle,
    PostsByTitle,
    PostsByTime,
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim_start_matches('/');
        let path = path.strip_prefix("api/v3/").unwrap_or(path);
        match path {
            "topics/search-by-title" => Ok(Route::TopicsByTitle),
            "posts/search-by-title" => Ok(Route::PostsByTitle),
            "posts/by-time" => Ok(Route::PostsByTime),
            other => Err(format!("unknown route '{}'", other)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Route::TopicsByTitle => "topics/search-by-title",
            Route::PostsByTitle => "posts/search-by-title",
            Route::PostsByTime => "posts/by-time",
        })
    }
}

/// Status code plus JSON envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(response: Value) -> Self {
        ApiResponse {
            status: 200,
            body: json!({
                "status": {"code": "ok", "message": "OK"},
                "response": response,
            }),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        ApiResponse {
            status: 400,
            body: json!({
                "status": {"code": "bad-request", "message": message.into()},
                "response": {},
            }),
        }
    }

    fn server_error() -> Self {
        ApiResponse {
            status: 500,
            body: json!({
                "status": {"code": "internal-server-error", "message": "Internal Server Error"},
                "response": {},
            }),
        }
    }

    fn from_error(err: &QueryError) -> Self {
        if err.is_validation() {
            debug!(code = err.code(), "rejected request");
            ApiResponse::bad_request(err.to_string())
        } else {
            warn!(error = %err, "collaborator failure");
            ApiResponse::server_error()
        }
    }

    /// The `status.code` string of the envelope.
    pub fn code(&self) -> &str {
        self.body["status"]["code"].as_str().unwrap_or_default()
    }
}

/// Decoded query parameters. Repeated keys keep every value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, Vec<String>>,
    /// Keys sent at least once with the `[]` list suffix.
    lists: HashSet<String>,
}

impl Params {
    /// Parse an `application/x-www-form-urlencoded` query string.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Params::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let key = match key.strip_suffix("[]") {
                Some(name) => {
                    params.lists.insert(name.to_string());
                    name.to_string()
                }
                None => key.into_owned(),
            };
            params.values.entry(key).or_default().push(value.into_owned());
        }
        params
    }

    fn is_list(&self, key: &str) -> bool {
        self.lists.contains(key)
    }

    fn first(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    fn all(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }
}

pub struct QueryBoundary<'a> {
    engine: QueryEngine<'a>,
    config: BoundaryConfig,
}

impl<'a> QueryBoundary<'a> {
    pub fn new(engine: QueryEngine<'a>, config: BoundaryConfig) -> Self {
        QueryBoundary { engine, config }
    }

    /// Handle one request already split into route and query string.
    pub fn handle(&self, route: Route, query: &str, caller: CallerId) -> ApiResponse {
        let params = Params::parse(query);
        debug!(%route, %caller, "handling request");
        match route {
            Route::TopicsByTitle | Route::PostsByTitle => self.title_search(route, &params, caller),
            Route::PostsByTime => self.time_search(&params, caller),
        }
    }

    fn title_search(&self, route: Route, params: &Params, caller: CallerId) -> ApiResponse {
        let keywords = match params.all("keywords") {
            None => return ApiResponse::bad_request("Required parameter 'keywords' missing"),
            Some([single]) if !params.is_list("keywords") => KeywordInput::Text(single.clone()),
            Some(many) => KeywordInput::List(many.to_vec()),
        };
        let fuzzy = match parse_bool(params.first("fuzzy")) {
            Ok(fuzzy) => fuzzy,
            Err(raw) => return ApiResponse::bad_request(format!("Invalid 'fuzzy' value '{}'", raw)),
        };
        let window = self.window(params);

        let result = match route {
            Route::TopicsByTitle => self
                .engine
                .search_topics(caller, keywords, window, fuzzy)
                .map(|topics| json!({ "topics": topics })),
            _ => self
                .engine
                .search_posts(caller, keywords, window, fuzzy)
                .map(|posts| json!({ "posts": posts })),
        };
        match result {
            Ok(response) => ApiResponse::ok(response),
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    fn time_search(&self, params: &Params, caller: CallerId) -> ApiResponse {
        let time = |key: &str| match params.first(key) {
            Some(raw) => TimeInput::Text(raw.to_string()),
            None => TimeInput::Unsupported("missing"),
        };
        let scope = match params.first("cid").map(|raw| raw.trim().parse::<i64>()) {
            None => CategoryScope::All,
            Some(Ok(cid)) => CategoryScope::from_raw(Some(cid)),
            Some(Err(_)) => return ApiResponse::bad_request("Invalid 'cid' value"),
        };
        let Some((start, stop)) = self.window(params).bounds() else {
            return ApiResponse::bad_request("Invalid 'start'/'stop' values");
        };

        match self.engine.search_time_range(
            caller,
            time("startTime"),
            time("endTime"),
            start,
            stop,
            scope,
        ) {
            Ok(page) => ApiResponse::ok(json!(page)),
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    /// Window from `start`/`stop`, defaulted and clamped to `max_window`.
    fn window(&self, params: &Params) -> RankWindow {
        let start = params
            .first("start")
            .map_or_else(|| self.config.default_start.to_string(), str::to_string);
        let stop = params
            .first("stop")
            .map_or_else(|| self.config.default_stop.to_string(), str::to_string);

        let window = RankWindow::parse(&start, &stop);
        match window.bounds() {
            Some((start, _)) if window.len() > self.config.max_window => {
                RankWindow::new(start, start + self.config.max_window.saturating_sub(1))
            }
            _ => window,
        }
    }
}

fn parse_bool(raw: Option<&str>) -> Result<bool, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(other.to_string()),
    }
}
