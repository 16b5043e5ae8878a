//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use adboard_client::{
    ApiClient, ClientError, CredentialStore, EntityLevel, InsightPeriod, MemoryStore, Navigator,
    SessionExpiry, StoreError, ACCESS_TOKEN_KEY, EXPIRED_NOTICE, USER_ID_KEY,
};
use adboard_core::{DatePreset, DateWindow, Platform};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Store that counts credential removals.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    token_clears: AtomicUsize,
}

impl CredentialStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if key == ACCESS_TOKEN_KEY {
            self.token_clears.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.remove(key)
    }
}

#[derive(Default)]
struct RecordingNavigator {
    notices: Mutex<Vec<String>>,
    redirects: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn redirect(&self, location: &str) {
        self.redirects.lock().unwrap().push(location.to_string());
    }
}

struct Harness {
    client: ApiClient,
    store: Arc<CountingStore>,
    navigator: Arc<RecordingNavigator>,
}

fn harness(base_url: &str) -> Harness {
    let store = Arc::new(CountingStore::default());
    store.set(ACCESS_TOKEN_KEY, "tok-1").unwrap();
    store.set(USER_ID_KEY, "u1").unwrap();
    let navigator = Arc::new(RecordingNavigator::default());
    let expiry = Arc::new(SessionExpiry::new(
        navigator.clone(),
        "/login",
        Duration::ZERO,
    ));
    let client = ApiClient::new(base_url, 5, "adboard-test/0.1", store.clone(), expiry)
        .expect("client construction should not fail");
    Harness {
        client,
        store,
        navigator,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn bearer_token_is_read_fresh_for_every_request() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/user/u1/platforms"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/u1/platforms"))
        .and(header("authorization", "Bearer tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    h.client.platform_status("u1").await.expect("first call");
    h.store.set(ACCESS_TOKEN_KEY, "tok-2").unwrap();
    h.client.platform_status("u1").await.expect("second call");
}

#[tokio::test]
async fn concurrent_unauthorized_responses_expire_session_once() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(50)))
        .expect(2)
        .mount(&server)
        .await;

    let (a, b) = tokio::join!(
        h.client.meta_campaigns("u1", "act_1"),
        h.client.meta_adsets("u1", "act_1"),
    );
    assert!(matches!(a, Err(ClientError::Unauthorized)));
    assert!(matches!(b, Err(ClientError::Unauthorized)));

    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(h.store.token_clears.load(Ordering::SeqCst), 1);
    assert_eq!(h.store.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert_eq!(h.store.get(USER_ID_KEY).unwrap().as_deref(), Some("u1"));
    assert_eq!(
        h.navigator.notices.lock().unwrap().clone(),
        vec![EXPIRED_NOTICE.to_string()]
    );
    assert_eq!(
        h.navigator.redirects.lock().unwrap().clone(),
        vec!["/login".to_string()]
    );
    assert!(h.client.expiry().is_expired());
}

#[tokio::test]
async fn backend_error_message_is_surfaced() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/meta/campaigns/u1/act_1"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Ad account not linked" })),
        )
        .mount(&server)
        .await;

    let err = h.client.meta_campaigns("u1", "act_1").await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("Ad account not linked"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(!h.client.expiry().is_expired());
}

#[tokio::test]
async fn malformed_body_fails_with_decode_error() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/meta/campaigns/u1/act_1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "name": "missing id" }])),
        )
        .mount(&server)
        .await;

    let err = h.client.meta_campaigns("u1", "act_1").await.unwrap_err();
    assert!(
        matches!(err, ClientError::Decode { ref context, .. } if context == "/meta/campaigns/u1/act_1"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn platform_status_fills_in_missing_platforms() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/user/u1/platforms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "platforms": { "meta": { "connected": true, "ad_account_id": "act_1" } }
        })))
        .mount(&server)
        .await;

    let status = h.client.platform_status("u1").await.unwrap();
    assert_eq!(status.get(Platform::Meta).selected_account(), Some("act_1"));
    assert!(!status.get(Platform::Google).connected);
    assert!(!status.get(Platform::Shopify).connected);
}

#[tokio::test]
async fn meta_insights_send_preset_by_name() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/aggregate/meta/insights/campaign"))
        .and(query_param("ad_account_id", "act_1"))
        .and(query_param("date_preset", "last_7d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "c1": { "spend": "10.50", "impressions": "1200" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let map = h
        .client
        .meta_insights(
            EntityLevel::Campaign,
            "act_1",
            InsightPeriod::Preset(DatePreset::Last7Days),
        )
        .await
        .unwrap();
    assert!((map["c1"].spend - 10.5).abs() < f64::EPSILON);
    assert_eq!(map["c1"].impressions, 1200);
}

#[tokio::test]
async fn meta_insights_skip_entities_without_data() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/aggregate/meta/insights/campaign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "c1": { "spend": 4, "clicks": 2 },
            "c2": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let map = h
        .client
        .meta_insights(
            EntityLevel::Campaign,
            "act_1",
            InsightPeriod::Preset(DatePreset::Last7Days),
        )
        .await
        .unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["c1"].clicks, 2);
    assert!(!map.contains_key("c2"));
}

#[tokio::test]
async fn meta_insights_send_explicit_window() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/aggregate/meta/insights/adset"))
        .and(query_param("start_date", "2026-01-01"))
        .and(query_param("end_date", "2026-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let map = h
        .client
        .meta_insights(
            EntityLevel::AdSet,
            "act_1",
            InsightPeriod::Window(DateWindow {
                start: day(2026, 1, 1),
                end: day(2026, 1, 31),
            }),
        )
        .await
        .unwrap();
    assert!(map.is_empty());
}

#[tokio::test]
async fn aggregate_daily_posts_group_by_date_and_orders_points() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("POST"))
        .and(path("/aggregate/google"))
        .and(body_json(json!({
            "ad_account_id": "123",
            "start_date": "2026-03-01",
            "end_date": "2026-03-02",
            "group_by": "date"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "date": "2026-03-02", "spend": "4.5", "clicks": 3 },
            { "date": "2026-03-01", "spend": 2, "clicks": "x" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let points = h
        .client
        .aggregate_daily(
            Platform::Google,
            Some("123"),
            DateWindow {
                start: day(2026, 3, 1),
                end: day(2026, 3, 2),
            },
        )
        .await
        .unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].date, "2026-03-01");
    assert!(points[0].clicks.abs() < f64::EPSILON);
    assert!((points[1].spend - 4.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn shopify_aggregate_omits_account_id() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("POST"))
        .and(path("/aggregate/shopify"))
        .and(body_json(json!({
            "start_date": "2026-03-01",
            "end_date": "2026-03-01",
            "group_by": "date"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let points = h
        .client
        .aggregate_daily(
            Platform::Shopify,
            None,
            DateWindow {
                start: day(2026, 3, 1),
                end: day(2026, 3, 1),
            },
        )
        .await
        .unwrap();
    assert!(points.is_empty());
}

#[tokio::test]
async fn sync_accepts_empty_acknowledgement() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("POST"))
        .and(path("/meta/sync/recent/u1/act_1"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let ack = h.client.meta_sync_recent("u1", "act_1").await.unwrap();
    assert_eq!(ack, adboard_client::SyncAck::default());
}

#[tokio::test]
async fn google_backfill_hits_user_endpoint() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("POST"))
        .and(path("/google/daily-insights/backfill/u1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Backfill started" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ack = h.client.google_backfill("u1").await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Backfill started"));
}

#[tokio::test]
async fn account_discovery_and_selection() {
    let server = MockServer::start().await;
    let h = harness(&server.uri());

    Mock::given(method("GET"))
        .and(path("/google/ad-accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [
                { "customer_id": 1_112_223_333_u64, "descriptive_name": "Main", "currency_code": "USD" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/meta/select-account"))
        .and(body_json(json!({ "ad_account_id": "act_9" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = h.client.google_ad_accounts().await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, "1112223333");
    assert_eq!(accounts[0].name.as_deref(), Some("Main"));

    h.client.select_meta_account("act_9").await.unwrap();
}
