//! Student registry server: loads config from env, prepares the database, serves the API.

use std::sync::Arc;
use student_registry::{
    app, connect_pool, ensure_database_exists, ensure_students_table, AppState, Config,
    OpenAiGenerator, PgStudentRepository,
};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("student_registry=info,tower_http=info")
            }),
        )
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded config");

    if config.database.create_database {
        ensure_database_exists(&config.database).await?;
    }
    let pool = connect_pool(&config.database).await?;
    ensure_students_table(&pool).await?;

    if config.generation.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; /api/chatgpt will fail");
    }
    let generator = OpenAiGenerator::new(reqwest::Client::new(), &config.generation)?;
    let state = AppState::new(
        Arc::new(PgStudentRepository::new(pool.clone())),
        Arc::new(generator),
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
