use clap::Parser;
use srefi_server::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Overrides server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    srefi_server::init_logging(&config.logging);
    tracing::info!(config = %args.config, "Starting srefi server");

    srefi_server::start_server(config).await
}
