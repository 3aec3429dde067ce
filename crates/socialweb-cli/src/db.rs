//! `db` subcommands.

use clap::Subcommand;
use socialweb_core::AppConfig;

#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Check that the database answers
    Ping,
    /// Apply pending migrations
    Migrate,
}

pub(crate) async fn run(config: &AppConfig, command: &DbCommands) -> anyhow::Result<()> {
    let pool = socialweb_db::connect_pool(
        &config.database_url,
        socialweb_db::PoolConfig::from_app_config(config),
    )
    .await?;

    match command {
        DbCommands::Ping => {
            socialweb_db::health_check(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = socialweb_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
    }

    pool.close().await;
    Ok(())
}
