use std::sync::Arc;

use anyhow::Context;
use server::{AppState, router};
use services::services::{
    config::GeneratorConfig, llm_api::ChatCompletionClient, website_generator::WebsiteGenerator,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = GeneratorConfig::from_env().context("failed to load configuration")?;
    let endpoint = Arc::new(ChatCompletionClient::new(
        config.api_key.clone(),
        config.base_url.clone(),
    )?);
    let generator = WebsiteGenerator::from_config(&config, endpoint);

    info!(
        generation_model = %config.generation.model,
        judge_model = %config.judge.model,
        validator_mode = %config.validator_mode,
        "Website generator configured"
    );

    let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = match std::env::var("PORT") {
        Ok(port) => port
            .parse::<u16>()
            .with_context(|| format!("invalid PORT: {port}"))?,
        Err(_) => DEFAULT_PORT,
    };

    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(generator))).await?;
    Ok(())
}
