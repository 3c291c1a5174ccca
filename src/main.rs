//! Standsheet - Character creation session bootstrap
//!
//! Loads configuration, connects to the character backend and opens a
//! creation session over the backend's reference catalog.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use standsheet::application::services::{CharacterCreationService, ReferenceDataService};
use standsheet::infrastructure::api_client::ApiClient;
use standsheet::infrastructure::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "standsheet=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Standsheet");

    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Backend: {}", config.api_base_url);
    tracing::info!("  Credentials: {:?}", config.credentials());

    let client = Arc::new(ApiClient::from_config(&config).context("Failed to build HTTP client")?);

    let reference = ReferenceDataService::new(client.clone()).load().await;
    tracing::info!(
        heritages = reference.heritages.len(),
        vices = reference.vices.len(),
        abilities = reference.abilities.len(),
        fallback = reference.is_fallback,
        "Reference catalog ready"
    );

    let (session, _navigation) =
        CharacterCreationService::new(client, reference, config.creation_timings());
    let step = session.step().await;
    let derived = session.derived().await;
    tracing::info!(
        step = %step,
        stand_ability_slots = derived.total_stand_abilities,
        standard_ability_slots = derived.total_standard_abilities,
        "Creation session opened"
    );

    session.shutdown().await;
    Ok(())
}
