use crate::catalog::{catalog, Catalog};
use crate::db::{self, DbPool, NewSurveyResult, SurveyResult};
use crate::error::SubmitError;
use crate::settings::settings;
use crate::survey::{build_record, SurveySubmission};
use crate::utils::logs;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/questions", get(questions))
        .route("/api/submit", post(submit))
        .route("/api/responses", get(responses))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = state
        .pool
        .get()
        .map_err(|e| e.to_string())
        .and_then(|mut conn| db::health_check(&mut conn).map_err(|e| e.to_string()));

    match database {
        Ok(()) => Json(json!({ "status": "healthy", "database": "connected" })),
        Err(reason) => Json(json!({ "status": "unhealthy", "database": reason })),
    }
}

/// Serves the question catalog. Option order is shuffled per request so
/// respondents don't see the options in scoring order; ids stay stable.
async fn questions() -> Json<Catalog> {
    let mut view = catalog().clone();

    if settings().survey.shuffle_options {
        let mut rng = rand::rng();
        for question in view.questions.values_mut() {
            question.responses.shuffle(&mut rng);
        }
    }

    Json(view)
}

async fn submit(
    State(state): State<AppState>,
    Json(submission): Json<SurveySubmission>,
) -> Result<Json<Value>, SubmitError> {
    let record = build_record(catalog(), &submission)
        .inspect_err(|e| logs::log_submission_rejected(&e.to_string()))?;

    let mut conn = state
        .pool
        .get()
        .map_err(|_| SubmitError::Persistence("connection pool unavailable".to_string()))?;

    let record_id = db::insert_response(&mut conn, NewSurveyResult::new(&record))
        .map_err(|e| SubmitError::Persistence(e.to_string()))?;

    logs::log_submission_saved(&record.session_id, record_id, submission.answers.len());

    Ok(Json(json!({
        "status": "success",
        "message": "Survey response recorded",
        "session_id": record.session_id,
        "record_id": record_id,
    })))
}

#[derive(Debug, Deserialize)]
struct ResponsesQuery {
    limit: Option<i64>,
}

/// Most recent persisted rows, newest first. Review tooling only.
async fn responses(
    State(state): State<AppState>,
    Query(query): Query<ResponsesQuery>,
) -> Result<Json<Vec<SurveyResult>>, SubmitError> {
    let max = settings().survey.review_limit as i64;
    let limit = query.limit.unwrap_or(max).clamp(1, max);

    let mut conn = state
        .pool
        .get()
        .map_err(|_| SubmitError::Persistence("connection pool unavailable".to_string()))?;

    let rows = db::recent_responses(&mut conn, limit)
        .map_err(|e| SubmitError::Persistence(e.to_string()))?;

    Ok(Json(rows))
}
