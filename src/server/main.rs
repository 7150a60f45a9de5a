use duo_relay::config::Config;
use duo_relay::server::telemetry::{shutdown_telemetry, LogConfig};
use duo_relay::server::RelayServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_args();
    LogConfig::from_config(&config).init()?;

    let result = RelayServer::new(config).run().await;
    shutdown_telemetry();
    result?;
    Ok(())
}
