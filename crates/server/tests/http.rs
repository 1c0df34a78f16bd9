use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use serde_json::Value;
use tower::ServiceExt;

use engine::{Engine, RefreshSettings};
use migration::MigratorTrait;

async fn test_app(page_size: u64) -> axum::Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    seed_bills(&db).await;
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::app(engine, page_size)
}

/// Five bills on consecutive July 2016 days, ids 1..=5 oldest-first, with
/// finance entries only on bills 1 and 2.
async fn seed_bills(db: &DatabaseConnection) {
    let backend = db.get_database_backend();

    let committees = [
        "Committee on Agriculture",
        "Committee on the Budget",
        "Committee on Agriculture",
        "Committee on the Budget",
        "Committee on Armed Services",
    ];

    for (index, committee) in committees.iter().enumerate() {
        let id = index as i32 + 1;
        let published = Utc
            .with_ymd_and_hms(2016, 7, index as u32 + 1, 0, 0, 0)
            .unwrap();
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO bills (id, title, summary, code, committee, published, cbo_url, pdf_url) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            [
                id.into(),
                format!("Bill {id}").into(),
                format!("Summary of bill {id}").into(),
                format!("H.R. {id}").into(),
                (*committee).into(),
                published.into(),
                format!("https://www.cbo.gov/publication/{id}").into(),
                format!("https://www.cbo.gov/sites/default/files/hr{id}.pdf").into(),
            ],
        ))
        .await
        .unwrap();
    }

    let entries: [(i32, i32, f64); 3] = [(1, 5, 100.0), (1, 10, 200.0), (2, 5, -150.0)];
    for (bill_id, timespan, amount) in entries {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO finances (bill_id, timespan, amount) VALUES (?, ?, ?)",
            [bill_id.into(), timespan.into(), amount.into()],
        ))
        .await
        .unwrap();
    }
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: &axum::Router, uri: &str) -> Value {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "unexpected status for {uri}");
    serde_json::from_slice(&body).unwrap()
}

fn codes(page: &Value) -> Vec<String> {
    page["bills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|bill| bill["code"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn page_walk_follows_next_urls_to_the_end() {
    let app = test_app(2).await;

    let page = get_json(&app, "/bills?order=date+desc").await;
    assert_eq!(codes(&page), ["H.R. 5", "H.R. 4"]);

    let next = page["next"].as_str().unwrap().to_string();
    let page = get_json(&app, &next).await;
    assert_eq!(codes(&page), ["H.R. 3", "H.R. 2"]);

    let next = page["next"].as_str().unwrap().to_string();
    let page = get_json(&app, &next).await;
    assert_eq!(codes(&page), ["H.R. 1"]);
    assert!(page["next"].is_null());
}

#[tokio::test]
async fn next_url_preserves_filters() {
    let app = test_app(1).await;

    let page = get_json(
        &app,
        "/bills?order=date+asc&committee=Committee%20on%20Agriculture",
    )
    .await;
    assert_eq!(codes(&page), ["H.R. 1"]);

    let next = page["next"].as_str().unwrap().to_string();
    assert!(next.contains("committee="));
    let page = get_json(&app, &next).await;
    assert_eq!(codes(&page), ["H.R. 3"]);
    assert!(page["next"].is_null());
}

#[tokio::test]
async fn bill_payload_carries_unix_timestamp_and_finances() {
    let app = test_app(10).await;

    let page = get_json(&app, "/bills?order=date+asc").await;
    let first = &page["bills"][0];

    assert_eq!(first["title"], "Bill 1");
    assert_eq!(first["code"], "H.R. 1");
    assert_eq!(first["committee"], "Committee on Agriculture");
    assert_eq!(
        first["published"].as_i64().unwrap(),
        Utc.with_ymd_and_hms(2016, 7, 1, 0, 0, 0).unwrap().timestamp()
    );
    assert_eq!(first["cbo_url"], "https://www.cbo.gov/publication/1");

    let financial = first["financial"].as_array().unwrap();
    assert_eq!(financial.len(), 2);
    assert_eq!(financial[0]["timespan"], 5);
    assert_eq!(financial[0]["amount"], 100.0);

    let third = &page["bills"][2];
    assert!(third["financial"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn before_and_after_bound_the_listing() {
    let app = test_app(10).await;

    let after = Utc.with_ymd_and_hms(2016, 7, 2, 0, 0, 0).unwrap().timestamp();
    let before = Utc.with_ymd_and_hms(2016, 7, 4, 0, 0, 0).unwrap().timestamp();
    let page = get_json(
        &app,
        &format!("/bills?order=date+asc&after={after}&before={before}"),
    )
    .await;
    assert_eq!(codes(&page), ["H.R. 2", "H.R. 3", "H.R. 4"]);
}

#[tokio::test]
async fn missing_order_is_a_404_with_reason() {
    let app = test_app(10).await;
    let (status, body) = get(&app, "/bills").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"order parameter is required");
}

#[tokio::test]
async fn malformed_order_is_a_404_with_reason() {
    let app = test_app(10).await;
    let (status, body) = get(&app, "/bills?order=date").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"order parameter is malformed");
}

#[tokio::test]
async fn unknown_order_field_is_a_404_with_reason() {
    let app = test_app(10).await;
    let (status, body) = get(&app, "/bills?order=net+desc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"order must order by date, committee or cost");
}

#[tokio::test]
async fn non_numeric_start_is_a_404_with_reason() {
    let app = test_app(10).await;
    let (status, body) = get(&app, "/bills?order=date+desc&start=abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Starting row must be an integer");
}

#[tokio::test]
async fn non_numeric_before_is_a_404_with_reason() {
    let app = test_app(10).await;
    let (status, body) = get(&app, "/bills?order=date+desc&before=july").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Before must be a Unix timestamp");
}

#[tokio::test]
async fn update_trigger_returns_200_whatever_the_outcome() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let lock_file = std::env::temp_dir().join(format!("http-update-{}.lock", std::process::id()));
    let _ = std::fs::remove_file(&lock_file);

    let engine = Engine::builder()
        .database(db)
        .refresh(RefreshSettings {
            interval: std::time::Duration::from_secs(3600),
            command: "true".to_string(),
            lock_file: lock_file.clone(),
        })
        .build()
        .await
        .unwrap();
    let app = server::app(engine, 10);

    // First trigger runs the job, second finds the timestamp fresh. Both 200.
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(Request::post("/update").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert!(!lock_file.exists());
}
