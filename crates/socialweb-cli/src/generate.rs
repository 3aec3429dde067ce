//! `generate`: the full two-step pipeline run against a fixture.

use std::path::Path;

use anyhow::Context as _;
use socialweb_core::AppConfig;
use socialweb_generator::{ChatClient, GeneratedWebsite, Generator, GeneratorConfig, ImageResolver};

use crate::fixture::{load_fixture, Fixture};

pub(crate) fn generator_from_config(config: &AppConfig) -> anyhow::Result<Generator> {
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; the generation endpoint may reject requests");
    }
    let chat = ChatClient::new(
        &config.llm_base_url,
        config.openai_api_key.clone(),
        config.llm_timeout_secs,
    )?;
    Ok(Generator::new(
        chat,
        ImageResolver::new(config.image_proxy, &config.public_base_url),
        GeneratorConfig {
            analysis_model: config.analysis_model.clone(),
            html_model: config.html_model.clone(),
            html_max_tokens: config.html_max_tokens,
        },
    ))
}

pub(crate) async fn generate_from_fixture(
    generator: &Generator,
    fixture: &Fixture,
) -> anyhow::Result<GeneratedWebsite> {
    let website = generator
        .generate_website(&fixture.profile, &fixture.media)
        .await?;
    tracing::info!(
        category = %website.classification.category,
        business = website.analyzed_profile.business_name(),
        total_ms = website.timing.total_ms,
        "generation complete"
    );
    Ok(website)
}

pub(crate) async fn run_generate(
    config: &AppConfig,
    fixture_path: &Path,
    out: Option<&Path>,
    analysis_out: Option<&Path>,
) -> anyhow::Result<()> {
    let fixture = load_fixture(fixture_path)?;
    let generator = generator_from_config(config)?;
    let website = generate_from_fixture(&generator, &fixture).await?;

    if let Some(path) = analysis_out {
        let json = serde_json::to_string_pretty(&website.analyzed_profile)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    match out {
        Some(path) => {
            std::fs::write(path, &website.generated_html)
                .with_context(|| format!("writing {}", path.display()))?;
            println!(
                "wrote {} ({} bytes, {})",
                path.display(),
                website.generated_html.len(),
                website.classification.category
            );
        }
        None => println!("{}", website.generated_html),
    }
    Ok(())
}
