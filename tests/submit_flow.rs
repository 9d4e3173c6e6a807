use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use worldview_survey::db::{self, DbPool};
use worldview_survey::routes::{router, AppState};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Every `:memory:` connection is its own database, so the test pool holds
/// exactly one connection and migrations run on it before the router sees it.
fn test_pool() -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("failed to build test pool");

    {
        let mut conn = pool.get().expect("failed to get test connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");
    }

    pool
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not valid json")
}

#[tokio::test]
async fn submit_persists_one_row_with_derived_scores() {
    let pool = test_pool();
    let app = router(AppState { pool: pool.clone() });

    let payload = json!({
        "session_id": "sess-integration-1",
        "source": "integration",
        "browser": "test-agent",
        "answers": {
            "Q1": { "scores": [100, 0, 0], "responseId": "r-1", "timestamp": "2025-07-20T10:00:00Z" },
            "Q2": { "scores": [0, 50, 50] }
        }
    });

    let response = app
        .oneshot(json_request("POST", "/api/submit", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["session_id"], "sess-integration-1");
    let record_id = body["record_id"].as_i64().expect("record_id missing");

    let mut conn = pool.get().unwrap();
    let rows = db::recent_responses(&mut conn, 10).unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(i64::from(row.id), record_id);
    assert_eq!(row.session_id, "sess-integration-1");
    assert_eq!(row.source, "integration");
    assert_eq!(row.browser.as_deref(), Some("test-agent"));
    assert_eq!(row.q1_response, Some(1));
    assert_eq!(row.q2_response, Some(5));
    assert_eq!(row.q3_response, None);

    // totals (100, 50, 50) over 2 answers
    assert_eq!((row.n1, row.n2, row.n3), (Some(300), Some(150), Some(150)));
    assert_eq!(row.plot_x, Some(-25.0));
    assert_eq!(row.plot_y, Some(-12.5));
}

#[tokio::test]
async fn submit_with_no_answers_stores_all_null_row() {
    let pool = test_pool();
    let app = router(AppState { pool: pool.clone() });

    let payload = json!({ "session_id": "sess-empty", "answers": {} });
    let response = app
        .oneshot(json_request("POST", "/api/submit", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut conn = pool.get().unwrap();
    let rows = db::recent_responses(&mut conn, 10).unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert!(row.q1_response.is_none() && row.q6_response.is_none());
    assert!(row.n1.is_none() && row.n2.is_none() && row.n3.is_none());
    assert!(row.plot_x.is_none() && row.plot_y.is_none());
    // defaults applied when the submission carries no metadata
    assert_eq!(row.source, "web");
    assert_eq!(row.version.as_deref(), Some("2.0.0"));
}

#[tokio::test]
async fn malformed_vector_rejects_submission_atomically() {
    let pool = test_pool();
    let app = router(AppState { pool: pool.clone() });

    let payload = json!({
        "session_id": "sess-bad",
        "answers": {
            "Q1": { "scores": [100, 0, 0] },
            "Q2": { "scores": [50, 50] }
        }
    });

    let response = app
        .oneshot(json_request("POST", "/api/submit", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Q2"));

    let mut conn = pool.get().unwrap();
    assert_eq!(db::response_count(&mut conn).unwrap(), 0);
}

#[tokio::test]
async fn unknown_question_rejects_submission() {
    let pool = test_pool();
    let app = router(AppState { pool: pool.clone() });

    let payload = json!({
        "answers": { "Q9": { "scores": [100, 0, 0] } }
    });

    let response = app
        .oneshot(json_request("POST", "/api/submit", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut conn = pool.get().unwrap();
    assert_eq!(db::response_count(&mut conn).unwrap(), 0);
}

#[tokio::test]
async fn missing_session_id_is_fabricated_per_submission() {
    let pool = test_pool();
    let app = router(AppState { pool: pool.clone() });

    for _ in 0..2 {
        let payload = json!({ "answers": { "Q1": { "scores": [100, 0, 0] } } });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/submit", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let mut conn = pool.get().unwrap();
    let rows = db::recent_responses(&mut conn, 10).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(!rows[0].session_id.is_empty());
    assert_ne!(rows[0].session_id, rows[1].session_id);
}

#[tokio::test]
async fn health_reports_connected_database() {
    let app = router(AppState { pool: test_pool() });

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn questions_serves_the_full_catalog() {
    let app = router(AppState { pool: test_pool() });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/questions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let questions = body["questions"].as_object().unwrap();
    assert_eq!(questions.len(), 6);
    for (_, question) in questions {
        assert_eq!(question["responses"].as_array().unwrap().len(), 5);
    }
}

#[tokio::test]
async fn recent_responses_returns_newest_first() {
    let pool = test_pool();
    let app = router(AppState { pool: pool.clone() });

    for session in ["first", "second"] {
        let payload = json!({
            "session_id": session,
            "answers": { "Q1": { "scores": [100, 0, 0] } }
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/submit", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/responses?limit=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["session_id"], "second");
    assert_eq!(rows[1]["session_id"], "first");
}
