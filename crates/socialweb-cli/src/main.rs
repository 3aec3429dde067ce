mod db;
mod fixture;
mod generate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;

#[derive(Debug, Parser)]
#[command(name = "socialweb-cli")]
#[command(about = "Classify profiles, compose prompts and generate sites from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify a profile fixture and print the per-category scores
    Classify {
        /// JSON file holding `{ "profile": ..., "media": [...] }`
        fixture: PathBuf,
    },
    /// Print the analysis prompt for a fixture, or the generation prompt
    /// when an analyzed profile is supplied
    Prompt {
        fixture: PathBuf,
        /// Analyzed profile JSON (as returned by the analysis step)
        #[arg(long)]
        analyzed: Option<PathBuf>,
    },
    /// Run the full generation pipeline for a fixture
    Generate {
        fixture: PathBuf,
        /// Write the generated HTML here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Also write the analyzed profile as JSON to this path
        #[arg(long)]
        analysis_out: Option<PathBuf>,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Classify { fixture: path }) => fixture::run_classify(&path)?,
        Some(Commands::Prompt {
            fixture: path,
            analyzed,
        }) => {
            fixture::run_prompt(&path, analyzed.as_deref())?;
        }
        Some(Commands::Generate {
            fixture: path,
            out,
            analysis_out,
        }) => {
            let config = socialweb_core::load_app_config()?;
            generate::run_generate(&config, &path, out.as_deref(), analysis_out.as_deref())
                .await?;
        }
        Some(Commands::Db { command }) => {
            let config = socialweb_core::load_app_config()?;
            db::run(&config, &command).await?;
        }
        None => println!("socialweb-cli: no command given; see --help"),
    }

    Ok(())
}
