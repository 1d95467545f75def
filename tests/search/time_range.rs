//! Posts by creation time: normalization, validation order, paging, scope.

use crate::common::{make_post, make_topic, post_ids, small_forum, OUTSIDER, READER};
use chrono::{TimeZone, Utc};
use serde_json::json;
use threadsift::{CategoryId, CategoryScope, MemoryStore, QueryEngine, QueryError, TimeInput};

/// small_forum plus a second category holding two posts at 2500 and 4000.
fn two_category_forum() -> MemoryStore {
    let mut store = small_forum();
    let staff = CategoryId(2);
    store.add_topic(make_topic(10, staff, "Staff Notes", 2_500));
    store.add_post(make_post(10, 10, "notes", 2_500));
    store.add_post(make_post(11, 10, "more notes", 4_000));
    store.grant(staff, READER);
    store
}

#[test]
fn test_range_returns_newest_first() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let page = engine
        .search_time_range(READER, 0_i64, 10_000_i64, 0, 10, CategoryScope::All)
        .unwrap();
    assert_eq!(post_ids(&page.posts), vec![1, 2, 3]);
    assert_eq!(page.next_start, 11);
    assert!(page.posts.iter().all(|p| !p.content.contains('<')));
}

#[test]
fn test_range_bounds_are_inclusive() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let page = engine
        .search_time_range(READER, 2_000_i64, 3_000_i64, 0, 10, CategoryScope::All)
        .unwrap();
    assert_eq!(post_ids(&page.posts), vec![1, 2]);
}

#[test]
fn test_text_and_instant_inputs() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let err = engine
        .search_time_range(
            READER,
            "1970-01-01T00:00:01.500Z",
            "1970-01-01",
            0,
            10,
            CategoryScope::All,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::InvalidTimeRange {
            start_time: 1_500,
            end_time: 0
        }
    ));

    let page = engine
        .search_time_range(
            READER,
            "1970-01-01",
            Utc.timestamp_millis_opt(2_500).unwrap(),
            0,
            10,
            CategoryScope::All,
        )
        .unwrap();
    assert_eq!(post_ids(&page.posts), vec![2, 3]);

    let page = engine
        .search_time_range(READER, "1500", "3000", 0, 10, CategoryScope::All)
        .unwrap();
    assert_eq!(post_ids(&page.posts), vec![1, 2]);
}

#[test]
fn test_paging_through_range() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let first = engine
        .search_time_range(READER, 0_i64, 10_000_i64, 0, 1, CategoryScope::All)
        .unwrap();
    assert_eq!(post_ids(&first.posts), vec![1, 2]);
    assert_eq!(first.next_start, 2);

    let second = engine
        .search_time_range(
            READER,
            0_i64,
            10_000_i64,
            first.next_start,
            first.next_start + 1,
            CategoryScope::All,
        )
        .unwrap();
    assert_eq!(post_ids(&second.posts), vec![3]);
    assert_eq!(second.next_start, 4);
}

#[test]
fn test_reversed_window_is_empty_page() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let page = engine
        .search_time_range(READER, 0_i64, 10_000_i64, 5, 2, CategoryScope::All)
        .unwrap();
    assert!(page.posts.is_empty());
    assert_eq!(page.next_start, 3);
}

#[test]
fn test_empty_time_range() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let page = engine
        .search_time_range(READER, 50_000_i64, 60_000_i64, 0, 10, CategoryScope::All)
        .unwrap();
    assert!(page.posts.is_empty());
    assert_eq!(page.next_start, 11);
}

// ============================================================================
// VALIDATION ORDER
// ============================================================================

#[test]
fn test_bad_start_text() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let err = engine
        .search_time_range(READER, "yesterday", 10_000_i64, 0, 10, CategoryScope::All)
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidDateFormat { ref input } if input == "yesterday"));
}

#[test]
fn test_start_checked_before_end() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let err = engine
        .search_time_range(READER, "first", "second", 0, 10, CategoryScope::All)
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidDateFormat { ref input } if input == "first"));

    let err = engine
        .search_time_range(
            READER,
            TimeInput::Unsupported("boolean"),
            "second",
            0,
            10,
            CategoryScope::All,
        )
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidTimeFormat { shape: "boolean" }));
}

#[test]
fn test_object_argument_is_bad_shape() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);
    let object = json!({"when": "now"});

    let err = engine
        .search_time_range(
            READER,
            TimeInput::from(&object),
            10_000_i64,
            0,
            10,
            CategoryScope::All,
        )
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidTimeFormat { shape: "object" }));
    assert_eq!(err.code(), "invalid-time-format");
}

#[test]
fn test_format_checked_before_order() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    // Reversed, but the end is malformed: the format error wins
    let err = engine
        .search_time_range(READER, 10_000_i64, "garbage", 0, 10, CategoryScope::All)
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidDateFormat { .. }));
}

#[test]
fn test_start_must_precede_end() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    for (start, end) in [(5_000_i64, 1_000_i64), (3_000, 3_000)] {
        let err = engine
            .search_time_range(READER, start, end, 0, 10, CategoryScope::All)
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidTimeRange { start_time, end_time }
                if start_time == start && end_time == end
        ));
        assert!(err.is_validation());
    }
}

// ============================================================================
// SCOPE AND PRIVILEGES
// ============================================================================

#[test]
fn test_category_scope_narrows_index() {
    let store = two_category_forum();
    let engine = QueryEngine::over(&store);

    let all = engine
        .search_time_range(READER, 0_i64, 10_000_i64, 0, 10, CategoryScope::All)
        .unwrap();
    assert_eq!(post_ids(&all.posts), vec![11, 1, 10, 2, 3]);

    let staff = engine
        .search_time_range(
            READER,
            0_i64,
            10_000_i64,
            0,
            10,
            CategoryScope::from_raw(Some(2)),
        )
        .unwrap();
    assert_eq!(post_ids(&staff.posts), vec![11, 10]);

    let sentinel = engine
        .search_time_range(
            READER,
            0_i64,
            10_000_i64,
            0,
            10,
            CategoryScope::from_raw(Some(-1)),
        )
        .unwrap();
    assert_eq!(sentinel.posts, all.posts);
}

#[test]
fn test_unknown_category_is_empty() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let page = engine
        .search_time_range(
            READER,
            0_i64,
            10_000_i64,
            0,
            10,
            CategoryScope::Category(CategoryId(42)),
        )
        .unwrap();
    assert!(page.posts.is_empty());
}

#[test]
fn test_range_filters_unreadable_posts() {
    let store = small_forum();
    let engine = QueryEngine::over(&store);

    let page = engine
        .search_time_range(OUTSIDER, 0_i64, 10_000_i64, 0, 10, CategoryScope::All)
        .unwrap();
    assert!(page.posts.is_empty());
    assert_eq!(page.next_start, 11);
}

#[test]
fn test_moved_post_leaves_old_category_scope() {
    let mut store = two_category_forum();
    // Post 1 starts in the fixture category, then moves under Staff Notes
    store.add_post(make_post(1, 10, "moved", 3_000));
    let engine = QueryEngine::over(&store);

    let fixture = engine
        .search_time_range(
            READER,
            0_i64,
            10_000_i64,
            0,
            10,
            CategoryScope::Category(CategoryId(1)),
        )
        .unwrap();
    assert_eq!(post_ids(&fixture.posts), vec![2, 3]);

    let staff = engine
        .search_time_range(
            READER,
            0_i64,
            10_000_i64,
            0,
            10,
            CategoryScope::Category(CategoryId(2)),
        )
        .unwrap();
    assert_eq!(post_ids(&staff.posts), vec![11, 1, 10]);
    assert!(staff.posts.iter().all(|p| p.cid == CategoryId(2)));
}
