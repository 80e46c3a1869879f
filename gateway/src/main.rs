//! gateway - single entry point for the restaurant services

#[tokio::main]
async fn main() -> Result<(), gateway::BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let _log_guard =
        shared::logging::init_logger(&shared::logging::LogConfig::from_env("gateway"));

    let config = gateway::Config::from_env();
    tracing::info!("Starting gateway (env: {})", config.environment);

    let gateway = gateway::Gateway::new(config)?;
    gateway.run(shared::shutdown_signal()).await
}
