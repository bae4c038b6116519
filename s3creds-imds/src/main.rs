use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use s3creds_imds::config::ImdsConfig;

#[derive(Parser)]
#[command(name = "s3creds-imds")]
#[command(about = "Instance metadata service emulator serving one IAM role")]
struct Args {
    #[arg(long, default_value = "/etc/s3creds/imds.toml")]
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = ImdsConfig::load(&args.config_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load config file {:?}: {}", args.config_path, e))?;
    info!("Loaded IMDS config from {:?}", args.config_path);

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let app = s3creds_imds::router(config);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Metadata emulator listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
