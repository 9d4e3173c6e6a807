use crate::schema::survey_results;
use crate::settings::settings;
use crate::survey::SurveyRecord;
use chrono::Utc;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use serde::Serialize;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub fn establish_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(settings().database.max_connections)
        .build(manager)
        .expect("Failed to create pool")
}

pub fn configure_connection(conn: &mut SqliteConnection) -> QueryResult<()> {
    let timeout = settings().database.busy_timeout_ms;
    conn.batch_execute(&format!("PRAGMA busy_timeout = {timeout};"))?;
    conn.batch_execute("PRAGMA journal_mode = WAL;")?;
    conn.batch_execute("PRAGMA synchronous = NORMAL;")?;
    conn.batch_execute("PRAGMA foreign_keys = ON;")?;
    Ok(())
}

#[derive(Queryable, Selectable, Serialize, Debug)]
#[diesel(table_name = survey_results)]
pub struct SurveyResult {
    pub id: i32,
    pub created_at: i64,
    pub session_id: String,
    pub source: String,
    pub browser: Option<String>,
    pub version: Option<String>,
    pub q1_response: Option<i32>,
    pub q2_response: Option<i32>,
    pub q3_response: Option<i32>,
    pub q4_response: Option<i32>,
    pub q5_response: Option<i32>,
    pub q6_response: Option<i32>,
    pub n1: Option<i32>,
    pub n2: Option<i32>,
    pub n3: Option<i32>,
    pub plot_x: Option<f64>,
    pub plot_y: Option<f64>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = survey_results)]
pub struct NewSurveyResult {
    pub created_at: i64,
    pub session_id: String,
    pub source: String,
    pub browser: Option<String>,
    pub version: Option<String>,
    pub q1_response: Option<i32>,
    pub q2_response: Option<i32>,
    pub q3_response: Option<i32>,
    pub q4_response: Option<i32>,
    pub q5_response: Option<i32>,
    pub q6_response: Option<i32>,
    pub n1: Option<i32>,
    pub n2: Option<i32>,
    pub n3: Option<i32>,
    pub plot_x: Option<f64>,
    pub plot_y: Option<f64>,
}

impl NewSurveyResult {
    pub fn new(record: &SurveyRecord) -> Self {
        let aggregates = record.aggregates;
        Self {
            created_at: Utc::now().timestamp(),
            session_id: record.session_id.clone(),
            source: record.source.clone(),
            browser: record.browser.clone(),
            version: record.version.clone(),
            q1_response: record.responses[0],
            q2_response: record.responses[1],
            q3_response: record.responses[2],
            q4_response: record.responses[3],
            q5_response: record.responses[4],
            q6_response: record.responses[5],
            n1: aggregates.map(|a| a.n1),
            n2: aggregates.map(|a| a.n2),
            n3: aggregates.map(|a| a.n3),
            plot_x: aggregates.map(|a| a.plot_x),
            plot_y: aggregates.map(|a| a.plot_y),
        }
    }
}

/// Writes one row and returns its id.
pub fn insert_response(conn: &mut SqliteConnection, new_row: NewSurveyResult) -> QueryResult<i32> {
    use crate::schema::survey_results::dsl::*;

    diesel::insert_into(survey_results)
        .values(&new_row)
        .returning(id)
        .get_result(conn)
}

pub fn recent_responses(conn: &mut SqliteConnection, limit: i64) -> QueryResult<Vec<SurveyResult>> {
    use crate::schema::survey_results::dsl::*;

    survey_results
        .order(id.desc())
        .limit(limit)
        .select(SurveyResult::as_select())
        .load(conn)
}

pub fn response_count(conn: &mut SqliteConnection) -> QueryResult<i64> {
    use crate::schema::survey_results::dsl::*;

    survey_results.count().get_result(conn)
}

pub fn health_check(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute("SELECT 1;")
}
