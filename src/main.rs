use anyhow::Result;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use worldview_survey::catalog::catalog;
use worldview_survey::db::{configure_connection, establish_pool};
use worldview_survey::routes::{router, AppState};
use worldview_survey::settings::settings;
use worldview_survey::utils::logs::{
    log_catalog_ready, log_db_ready, log_db_status, log_server_listening, log_startup_config,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let s = settings();
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "survey.db".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| s.server.host.clone());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(s.server.port);

    log_startup_config(&host, port, &database_url);

    log_db_status("Initializing SQLite connection pool...");
    let pool = establish_pool(&database_url);

    {
        let mut conn = pool.get().expect("Failed to get initial connection");
        configure_connection(&mut conn).expect("Failed to configure SQLite connection");
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;
    }
    log_db_ready();

    let catalog = catalog();
    catalog.validate()?;
    log_catalog_ready(catalog.questions.len());

    let app = router(AppState { pool });

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log_server_listening(&addr);

    axum::serve(listener, app).await?;

    Ok(())
}
