mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use s3creds::{Resolver, ResolverConfig};
use std::path::PathBuf;

use output::Format;

#[derive(Parser)]
#[command(name = "s3creds")]
#[command(about = "Resolve object-storage access keys from the environment or instance metadata")]
struct Args {
    /// TOML file with resolver settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Metadata service address (overrides the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Deadline in seconds for each metadata request
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Log resolution steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Try the environment, then the instance metadata service
    Resolve {
        #[arg(long, value_enum, default_value = "export")]
        format: Format,
    },
    /// Read keys from AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY only
    Env {
        #[arg(long, value_enum, default_value = "export")]
        format: Format,
    },
    /// Query the instance metadata service only
    Instance {
        #[arg(long, value_enum, default_value = "export", conflicts_with = "document")]
        format: Format,
        /// Print the full role document as JSON
        #[arg(long)]
        document: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => ResolverConfig::load(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load config file {:?}: {}", path, e))?,
        None => ResolverConfig::default(),
    };
    if let Some(endpoint) = args.endpoint {
        config.metadata.endpoint = endpoint;
    }
    if args.timeout.is_some() {
        config.metadata.timeout_secs = args.timeout;
    }

    let resolver = Resolver::from_config(&config);

    let rendered = match args.command {
        Commands::Resolve { format } => format.render(&resolver.resolve().await?)?,
        Commands::Env { format } => format.render(&resolver.env_credentials()?)?,
        Commands::Instance { format, document } => {
            let client = resolver.metadata_client();
            if document {
                let role = client.role_name().await?;
                serde_json::to_string_pretty(&client.document(&role).await?)?
            } else {
                format.render(&client.credentials().await?)?
            }
        }
    };
    println!("{}", rendered);

    Ok(())
}
