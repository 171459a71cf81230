//! End-to-end request flow: register filters, ingest a request, resolve
//! values, retain into the session, and resolve again on a follow-up request.

use tamis::handler::{FilterHandler, FilterKind, SelectOption};
use tamis::model::{DateRange, FilterValue, ParamValue};
use tamis::registry::FilterRegistry;
use tamis::session::fs::FileSession;
use tamis::session::memory::MemorySession;
use tamis::store::FilterValueStore;

use chrono::NaiveDate;

struct Author;

impl FilterHandler for Author {
    fn kind(&self) -> FilterKind {
        FilterKind::Select { multiple: false }
    }

    fn label(&self) -> Option<String> {
        Some("Author".to_string())
    }

    fn values(&self) -> Vec<SelectOption> {
        vec![
            SelectOption::new(1, "Jane Doe"),
            SelectOption::new(2, "John Smith"),
        ]
    }
}

struct Tags;

impl FilterHandler for Tags {
    fn kind(&self) -> FilterKind {
        FilterKind::Select { multiple: true }
    }
}

struct Published;

impl FilterHandler for Published {
    fn kind(&self) -> FilterKind {
        FilterKind::DateRange
    }

    fn is_required(&self) -> bool {
        true
    }

    fn default_value(&self) -> Option<FilterValue> {
        Some(FilterValue::Range(DateRange::full_days(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )))
    }
}

struct Status;

impl FilterHandler for Status {
    fn kind(&self) -> FilterKind {
        FilterKind::Select { multiple: false }
    }

    fn retain_value_in_session(&self) -> bool {
        true
    }
}

fn post_list_registry() -> FilterRegistry {
    let mut registry = FilterRegistry::new();
    registry
        .register("author", Author)
        .register("tags", Tags)
        .register("published", Published)
        .register("status", Status);
    registry
}

fn param(key: &str, value: &str) -> (String, ParamValue) {
    (key.to_string(), ParamValue::Single(value.to_string()))
}

#[test]
fn full_request_flow_resolves_and_retains() {
    let registry = post_list_registry();

    // First request: explicit author, tags and status; published falls back
    // to its required default.
    let mut store = FilterValueStore::new(MemorySession::new());
    store.ingest(
        &registry,
        &[
            param("filter_author", "3"),
            param("filter_tags", "2,5,9"),
            param("filter_status", "active"),
            param("page", "2"),
        ],
    );
    store.fill_default_values(&registry).unwrap();

    assert_eq!(
        store.filter_for("author").unwrap(),
        Some(FilterValue::Single("3".to_string()))
    );
    assert_eq!(
        store.filter_for("tags").unwrap(),
        Some(FilterValue::Multiple(vec![
            "2".to_string(),
            "5".to_string(),
            "9".to_string()
        ]))
    );

    let Some(FilterValue::Range(range)) = store.filter_for("published").unwrap() else {
        panic!("expected the default range");
    };
    assert_eq!(range.start.to_string(), "2024-01-01 00:00:00");
    assert_eq!(range.end.to_string(), "2024-12-31 23:59:59.999");

    store.put_retained_values_in_session(&registry).unwrap();
    assert_eq!(
        store.session().get("_sharp_retained_filter_status"),
        Some("active".to_string())
    );
    // Non-retained filters leave no trace.
    assert_eq!(store.session().get("_sharp_retained_filter_author"), None);
}

#[test]
fn retained_value_carries_over_to_the_next_request() {
    let registry = post_list_registry();
    let session = MemorySession::new().with_entry("_sharp_retained_filter_status", "active");

    // Follow-up request with no status parameter: the session value wins.
    let mut store = FilterValueStore::new(session);
    store.ingest(&registry, &[param("filter_author", "1")]);
    store.fill_default_values(&registry).unwrap();

    assert_eq!(
        store.filter_for("status").unwrap(),
        Some(FilterValue::Single("active".to_string()))
    );
}

#[test]
fn clearing_a_retained_filter_forgets_the_session_value() {
    let registry = post_list_registry();
    let session = MemorySession::new().with_entry("_sharp_retained_filter_status", "active");

    // The user empties the status filter.
    let mut store = FilterValueStore::new(session);
    store.ingest(&registry, &[param("filter_status", "")]);
    store.put_retained_values_in_session(&registry).unwrap();
    assert_eq!(store.session().get("_sharp_retained_filter_status"), None);

    // Next request resolves to nothing, not the stale session value.
    let mut next = FilterValueStore::new(MemorySession::new());
    next.ingest(&registry, &[]);
    next.fill_default_values(&registry).unwrap();
    assert_eq!(next.filter_for("status").unwrap(), None);
}

#[test]
fn retention_survives_a_process_restart_with_file_sessions() {
    let registry = post_list_registry();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut store = FilterValueStore::new(FileSession::open(&path).unwrap());
    store.ingest(&registry, &[param("filter_status", "draft")]);
    store.put_retained_values_in_session(&registry).unwrap();
    drop(store);

    let mut next = FilterValueStore::new(FileSession::open(&path).unwrap());
    next.ingest(&registry, &[]);
    next.fill_default_values(&registry).unwrap();
    assert_eq!(
        next.filter_for("status").unwrap(),
        Some(FilterValue::Single("draft".to_string()))
    );
}

#[test]
fn describe_reflects_session_state() {
    let registry = post_list_registry();
    let session = MemorySession::new().with_entry("_sharp_retained_filter_status", "active");

    let configs = registry.describe(&session).unwrap();
    let keys: Vec<&str> = configs.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, ["author", "tags", "published", "status"]);

    let status = &configs[3];
    assert_eq!(status.default, serde_json::json!("active"));

    let published = &configs[2];
    assert!(published.required);
    assert_eq!(published.default["start"], "2024-01-01T00:00:00.000");
}
