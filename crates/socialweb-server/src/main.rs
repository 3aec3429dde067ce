mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(socialweb_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = socialweb_db::PoolConfig::from_app_config(&config);
    let pool = socialweb_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = socialweb_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; website generation requests will be rejected upstream");
    }
    if config.instagram_app_id.is_none() || config.instagram_app_secret.is_none() {
        tracing::warn!("INSTAGRAM_APP_ID / INSTAGRAM_APP_SECRET not set; OAuth routes are disabled");
    }
    if config.linkedin_client_id.is_none() || config.linkedin_client_secret.is_none() {
        tracing::warn!("LINKEDIN_CLIENT_ID / LINKEDIN_CLIENT_SECRET not set; LinkedIn sign-in is disabled");
    }

    let state = AppState::from_config(pool, Arc::clone(&config))?;
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "socialweb server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
