use anyhow::Context;
use domainrobot_gateway::api::server;
use domainrobot_gateway::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be populated
    dotenv::dotenv().ok();

    server::init_tracing();

    let config = Config::from_env().context("Invalid configuration")?;
    tracing::info!(?config, "Configuration loaded");

    server::run_server(config)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
