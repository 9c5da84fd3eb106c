use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use prodline_core::dashboard::DashboardSettings;
use prodline_server::http::{AppState, router};
use prodline_store::Store;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> (Router, Store) {
    let store = Store::open_in_memory().unwrap();
    let state = AppState {
        store: store.clone(),
        settings: DashboardSettings::default(),
        refresh_interval: Duration::from_secs(15),
    };
    (router(state), store)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn post_json(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/submitData")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn payload(time: &str) -> Value {
    json!({
        "orders": {"typeA": 5, "typeB": 3, "typeC": 2},
        "defects": {"typeA": 1, "typeB": 0, "typeC": 0},
        "time": time,
    })
}

#[tokio::test]
async fn submit_returns_created() -> anyhow::Result<()> {
    let (app, store) = app();
    let (status, body) = send(&app, post_json(&payload("T1"))).await;

    assert_eq!(status, StatusCode::CREATED);
    let ack: Value = serde_json::from_slice(&body)?;
    assert_eq!(ack, json!({"message": "Data received"}));
    assert_eq!(store.status()?.rows, 1);
    Ok(())
}

#[tokio::test]
async fn duplicate_time_is_conflict() -> anyhow::Result<()> {
    let (app, store) = app();
    let (first, _) = send(&app, post_json(&payload("T1"))).await;
    let (second, body) = send(&app, post_json(&payload("T1"))).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    let err: Value = serde_json::from_slice(&body)?;
    assert!(err["error"].as_str().unwrap().contains("T1"));
    assert_eq!(store.status()?.rows, 1);
    Ok(())
}

#[tokio::test]
async fn missing_defects_is_rejected() -> anyhow::Result<()> {
    let (app, store) = app();
    let body = json!({
        "orders": {"typeA": 5, "typeB": 3, "typeC": 2},
        "time": "T1",
    });
    let (status, resp) = send(&app, post_json(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: Value = serde_json::from_slice(&resp)?;
    assert!(err["error"].as_str().unwrap().contains("defects"));
    assert_eq!(store.status()?.rows, 0);
    Ok(())
}

#[tokio::test]
async fn count_beyond_integer_column_is_rejected() -> anyhow::Result<()> {
    let (app, store) = app();
    let body = json!({
        "orders": {"typeA": 3_000_000_000_i64, "typeB": 3, "typeC": 2},
        "defects": {"typeA": 1, "typeB": 0, "typeC": 0},
        "time": "T1",
    });
    let (status, _) = send(&app, post_json(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.status()?.rows, 0);
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (app, _) = app();
    let req = Request::builder()
        .method("POST")
        .uri("/submitData")
        .body(Body::from("not json"))
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_store_views() -> anyhow::Result<()> {
    let (app, _) = app();

    let (status, body) = send(&app, get("/api/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, Value::Null);

    let (_, body) = send(&app, get("/api/products")).await;
    assert_eq!(
        serde_json::from_slice::<Value>(&body)?,
        json!({"typeA": 0, "typeB": 0, "typeC": 0})
    );

    let (_, body) = send(&app, get("/api/summary")).await;
    let summary: Value = serde_json::from_slice(&body)?;
    assert_eq!(summary["defect_rate"], Value::Null);
    assert_eq!(summary["finished_orders"], Value::Null);
    assert_eq!(summary["alarm_count"], 1);
    Ok(())
}

#[tokio::test]
async fn summary_after_one_reading() -> anyhow::Result<()> {
    let (app, _) = app();
    send(&app, post_json(&payload("T1"))).await;

    let (_, body) = send(&app, get("/api/summary")).await;
    let summary: Value = serde_json::from_slice(&body)?;
    assert_eq!(summary["defect_rate"], 10.0);
    assert_eq!(summary["finished_orders"], 8);
    assert_eq!(summary["queue_orders"], 2);

    let (_, body) = send(&app, get("/api/orders")).await;
    assert_eq!(
        serde_json::from_slice::<Value>(&body)?,
        json!({"times": ["T1"], "totals": [10]})
    );

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body)?;
    assert!(html.contains("<dd>10.00%</dd>"));
    Ok(())
}

#[tokio::test]
async fn status_reports_rows() -> anyhow::Result<()> {
    let (app, store) = app();
    for row in testkit::sample_run(3) {
        store.insert_reading(&row)?;
    }

    let (_, body) = send(&app, get("/api/status")).await;
    let status: Value = serde_json::from_slice(&body)?;
    assert_eq!(status["rows"], 3);
    assert_eq!(status["db_path"], ":memory:");
    Ok(())
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(String::from_utf8(body).unwrap().contains("404"));
}
