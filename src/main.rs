use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use ordo_core::{CoreConfig, SqliteStore, config::database_path_from_env_value};

/// Main entry point for the Ordo application
///
/// Opens (and migrates) the configured SQLite database, then serves the REST API with its
/// OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `ORDO_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ORDO_DATABASE_PATH`: SQLite database file (default: "ordo.sqlite3"; ":memory:" for a
///   throwaway in-memory database)
///
/// A `.env` file in the working directory is loaded first if present.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the database cannot be opened or migrated,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ordo=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("ORDO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = CoreConfig::new(database_path_from_env_value(
        std::env::var("ORDO_DATABASE_PATH").ok(),
    ))?;

    let store = Arc::new(SqliteStore::from_config(&cfg)?);
    tracing::info!(
        "++ Database {} at schema version {}",
        cfg.database_path().display(),
        store.schema_version()?
    );

    let app = api_rest::router(AppState::new(store));

    tracing::info!("++ Starting Ordo REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
