use door_quote::app::relay;
use door_quote::utils::{logger, validation::Validate};
use door_quote::RelayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_relay_logger();

    tracing::info!("Starting lead relay");

    let config = RelayConfig::from_env()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Relay configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        return Err(e.into());
    }
    tracing::debug!("Relay config: {:?}", config);

    relay::serve(config).await?;
    Ok(())
}
