use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::{DateTime, Local, TimeZone};
use foodwaste_api::app::{create_router, AppState};
use foodwaste_api::store::EventStore;
use tempfile::TempDir;
use tower::ServiceExt;

const VALID: &str = "guestno=300&serveno=400&price=2&prep=1&regular=1";

struct TestApp {
    router: Router,
    store: EventStore,
    _dir: TempDir,
}

async fn test_app(clock: Option<fn() -> DateTime<Local>>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("data.db").display());
    let store = EventStore::connect(&url).await.unwrap();
    store.ensure_schema().await.unwrap();

    let mut state = AppState::new(store.clone());
    if let Some(clock) = clock {
        state = state.with_clock(clock);
    }

    TestApp {
        router: create_router(state),
        store,
        _dir: dir,
    }
}

/// Router over a database whose `FoodWaste` table was never created.
async fn app_without_table() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("data.db").display());
    let store = EventStore::connect(&url).await.unwrap();

    TestApp {
        router: create_router(AppState::new(store.clone())),
        store,
        _dir: dir,
    }
}

fn fixed_clock() -> DateTime<Local> {
    Local.timestamp_opt(1_709_557_500, 0).unwrap()
}

impl TestApp {
    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut req = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(&self, body: &'static str) -> Response<Body> {
        let req = Request::builder()
            .method("POST")
            .uri("/add/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }
}

fn header_value(resp: &Response<Body>, name: header::HeaderName) -> String {
    resp.headers()
        .get(name)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

async fn body_text(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_rejected(resp: &Response<Body>, code: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_value(resp, header::LOCATION), "/add/");
    assert!(header_value(resp, header::SET_COOKIE).starts_with(&format!("flash={code};")));
}

#[tokio::test]
async fn index_and_form_render() {
    let app = test_app(None).await;

    let resp = app.get("/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("0 event(s) recorded"));

    let resp = app.get("/add/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<form method=\"post\" action=\"/add/\">"));
    assert!(body.contains("name=\"regular\""));
}

#[tokio::test]
async fn valid_submission_is_scored_and_stored() {
    let app = test_app(Some(fixed_clock)).await;

    let resp = app.post_form(VALID).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_value(&resp, header::LOCATION), "/view/");
    assert!(header_value(&resp, header::SET_COOKIE).starts_with("flash=added;"));

    let records = app.store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.epoch, 1_709_557_500);
    assert_eq!(record.guest_no, 300);
    assert_eq!(record.servings_no, 400);
    assert_eq!(record.pricing_rank, "Moderate");
    assert_eq!(record.prep_method_rank, "Finger Food");
    assert_eq!(record.customer_rank, "Occasional");
    assert_eq!(
        record.date_time,
        fixed_clock().format("%B %d, %Y %I:%M %p").to_string()
    );
    let wasted = record.servings_wasted.unwrap();
    assert!((wasted - 24.318806322).abs() < 1e-6, "got {wasted}");
}

#[tokio::test]
async fn view_shows_notice_once_and_lists_records() {
    let app = test_app(None).await;
    assert_eq!(app.post_form(VALID).await.status(), StatusCode::SEE_OTHER);

    let resp = app.get("/view/", Some("flash=added")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header_value(&resp, header::SET_COOKIE).contains("Max-Age=0"));
    let body = body_text(resp).await;
    assert!(body.contains("Data added successfully!"));
    assert!(body.contains("<td>Finger Food</td>"));
    assert!(body.contains("<td>24.32</td>"));

    let resp = app.get("/view", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    assert!(!body_text(resp).await.contains("Data added successfully!"));
}

#[tokio::test]
async fn small_events_store_zero_waste() {
    let app = test_app(None).await;
    app.post_form("guestno=1&serveno=1&price=1&prep=1&regular=1")
        .await;

    let records = app.store.list_all().await.unwrap();
    assert_eq!(records[0].servings_wasted, Some(0.0));
}

#[tokio::test]
async fn zero_guests_are_rejected() {
    let app = test_app(None).await;
    let resp = app
        .post_form("guestno=0&serveno=400&price=2&prep=1&regular=1")
        .await;

    assert_rejected(&resp, "not_positive");
    assert_eq!(app.store.count().await.unwrap(), 0);

    let resp = app.get("/add/", Some("flash=not_positive")).await;
    assert!(body_text(resp).await.contains("Values must be positive numbers."));
}

#[tokio::test]
async fn non_numeric_price_is_rejected() {
    let app = test_app(None).await;
    let resp = app
        .post_form("guestno=300&serveno=400&price=abc&prep=1&regular=1")
        .await;

    assert_rejected(&resp, "invalid_number");
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn rank_zero_is_rejected() {
    let app = test_app(None).await;
    let resp = app
        .post_form("guestno=300&serveno=400&price=2&prep=1&regular=0")
        .await;

    assert_rejected(&resp, "unknown_rank");
    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_and_unknown_fields_are_rejected() {
    let app = test_app(None).await;

    let resp = app.post_form("guestno=300&serveno=400&price=2&prep=1").await;
    assert_rejected(&resp, "malformed");

    let resp = app.post_form("guestno=300&serveno=400&price=2&prep=1&regular=1&vip=1").await;
    assert_rejected(&resp, "malformed");

    assert_eq!(app.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn same_second_submission_conflicts() {
    let app = test_app(Some(fixed_clock)).await;

    assert_eq!(app.post_form(VALID).await.status(), StatusCode::SEE_OTHER);
    let resp = app.post_form(VALID).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(body_text(resp).await.contains("already recorded"));
    assert_eq!(app.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn empty_view_renders_an_empty_table() {
    let app = test_app(None).await;

    let resp = app.get("/view/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<tbody>\n</tbody>"));
}

#[tokio::test]
async fn storage_failures_render_the_generic_error_page() {
    let app = app_without_table().await;

    let resp = app.post_form(VALID).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    assert!(resp.headers().get(header::LOCATION).is_none());
    assert!(body_text(resp).await.contains("Something went wrong"));

    let resp = app.get("/view/", None).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(resp).await.contains("Something went wrong"));

    assert!(!app.store.table_exists("FoodWaste").await.unwrap());
}
