//! Request boundary: parameters in, status and envelope out.

use crate::common::{keyword_forum, small_forum, FailAt, FlakyStore, READER};
use serde_json::Value;
use threadsift::{ApiResponse, BoundaryConfig, QueryBoundary, QueryEngine, Route};

fn ids(response: &ApiResponse, list: &str, id: &str) -> Vec<u64> {
    response.body["response"][list]
        .as_array()
        .map(|items| items.iter().filter_map(|item| item[id].as_u64()).collect())
        .unwrap_or_default()
}

fn message(response: &ApiResponse) -> &str {
    response.body["status"]["message"].as_str().unwrap_or_default()
}

#[test]
fn test_topic_route_ok_envelope() {
    let store = small_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    let response = boundary.handle(Route::TopicsByTitle, "keywords=react", READER);
    assert_eq!(response.status, 200);
    assert_eq!(response.code(), "ok");
    assert_eq!(
        response.body["response"]["topics"][0]["title"],
        Value::from("React Guide")
    );
    assert_eq!(response.body["response"]["topics"][0]["postcount"], 1);
}

#[test]
fn test_missing_keywords_is_bad_request() {
    let store = small_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    for route in [Route::TopicsByTitle, Route::PostsByTitle] {
        let response = boundary.handle(route, "fuzzy=true", READER);
        assert_eq!(response.status, 400);
        assert_eq!(response.code(), "bad-request");
        assert_eq!(message(&response), "Required parameter 'keywords' missing");
        assert_eq!(response.body["response"], serde_json::json!({}));
    }
}

#[test]
fn test_blank_keywords_is_invalid_keyword() {
    let store = small_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    let response = boundary.handle(Route::TopicsByTitle, "keywords=+++", READER);
    assert_eq!(response.status, 400);
    assert_eq!(message(&response), "[[error:invalid-keyword]]");
}

#[test]
fn test_bad_fuzzy_flag() {
    let store = small_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    let response = boundary.handle(Route::TopicsByTitle, "keywords=react&fuzzy=maybe", READER);
    assert_eq!(response.status, 400);
}

#[test]
fn test_post_route_fuzzy() {
    let store = keyword_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    let exact = boundary.handle(Route::PostsByTitle, "keywords=JavaScrit", READER);
    assert_eq!(exact.status, 200);
    assert!(ids(&exact, "posts", "pid").is_empty());

    let fuzzy = boundary.handle(Route::PostsByTitle, "keywords=JavaScrit&fuzzy=true", READER);
    assert_eq!(ids(&fuzzy, "posts", "pid"), vec![1, 5]);
}

#[test]
fn test_repeated_keywords_form_a_list() {
    let store = small_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    let response = boundary.handle(
        Route::TopicsByTitle,
        "keywords[]=python&keywords[]=react",
        READER,
    );
    assert_eq!(ids(&response, "topics", "tid"), vec![2, 3]);
}

#[test]
fn test_single_bracket_keyword_is_a_phrase() {
    let store = keyword_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    // Plain text splits into "node" OR "js"
    let text = boundary.handle(Route::TopicsByTitle, "keywords=node%20js", READER);
    assert_eq!(ids(&text, "topics", "tid"), vec![2]);

    // One list entry stays whole, and no title contains "node js"
    let list = boundary.handle(Route::TopicsByTitle, "keywords[]=node%20js", READER);
    assert_eq!(list.status, 200);
    assert!(ids(&list, "topics", "tid").is_empty());
}

#[test]
fn test_window_clamped_and_lenient() {
    let store = small_forum();
    let config = BoundaryConfig {
        max_window: 2,
        ..BoundaryConfig::default()
    };
    let boundary = QueryBoundary::new(QueryEngine::over(&store), config);

    // Clamped to ranks 0..=1, React Guide sits at rank 2
    let clamped = boundary.handle(Route::TopicsByTitle, "keywords=react&stop=100", READER);
    assert_eq!(clamped.status, 200);
    assert!(ids(&clamped, "topics", "tid").is_empty());

    let shifted = boundary.handle(
        Route::TopicsByTitle,
        "keywords=react&start=1&stop=100",
        READER,
    );
    assert_eq!(ids(&shifted, "topics", "tid"), vec![3]);

    let junk = boundary.handle(Route::TopicsByTitle, "keywords=react&start=abc", READER);
    assert_eq!(junk.status, 200);
    assert!(ids(&junk, "topics", "tid").is_empty());
}

#[test]
fn test_time_route_defaults() {
    let store = small_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    let response = boundary.handle(Route::PostsByTime, "startTime=0&endTime=10000", READER);
    assert_eq!(response.status, 200);
    assert_eq!(ids(&response, "posts", "pid"), vec![1, 2, 3]);
    assert_eq!(response.body["response"]["nextStart"], 20);
}

#[test]
fn test_time_route_iso_and_category() {
    let store = small_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    let response = boundary.handle(
        Route::PostsByTime,
        "startTime=1970-01-01T00:00:00Z&endTime=1970-01-01T00:00:02Z&cid=-1",
        READER,
    );
    assert_eq!(ids(&response, "posts", "pid"), vec![2, 3]);
}

#[test]
fn test_time_route_validation() {
    let store = small_forum();
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    let missing = boundary.handle(Route::PostsByTime, "endTime=10", READER);
    assert_eq!(missing.status, 400);
    assert!(message(&missing).starts_with("[[error:invalid-time-format]]"));

    let bad_date = boundary.handle(Route::PostsByTime, "startTime=someday&endTime=10", READER);
    assert!(message(&bad_date).starts_with("[[error:invalid-date-format]]"));

    let reversed = boundary.handle(Route::PostsByTime, "startTime=10&endTime=5", READER);
    assert!(message(&reversed).starts_with("[[error:invalid-time-range]]"));

    let bad_cid = boundary.handle(Route::PostsByTime, "startTime=0&endTime=5&cid=staff", READER);
    assert_eq!(bad_cid.status, 400);

    let bad_window = boundary.handle(
        Route::PostsByTime,
        "startTime=0&endTime=5&start=x&stop=3",
        READER,
    );
    assert_eq!(bad_window.status, 400);
}

#[test]
fn test_collaborator_failure_is_server_error() {
    let store = FlakyStore::new(small_forum(), FailAt::Privileges);
    let boundary = QueryBoundary::new(QueryEngine::over(&store), BoundaryConfig::default());

    let response = boundary.handle(Route::TopicsByTitle, "keywords=react", READER);
    assert_eq!(response.status, 500);
    assert_eq!(response.code(), "internal-server-error");
    // The collaborator's message stays server-side
    assert!(!message(&response).contains("unavailable"));
}
