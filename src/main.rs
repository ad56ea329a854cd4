use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use mcp_router::config::RouterConfig;
use mcp_router::router_state::RouterState;
use mcp_router::server;

#[derive(Parser, Debug)]
#[command(name = "mcp-router")]
#[command(about = "MCP message router - validates, enriches and forwards inter-service messages")]
struct Cli {
    /// Path to the JSON configuration holding the service registry
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Override the bind host from the configuration
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port from the configuration
    #[arg(long)]
    port: Option<u16>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let mut config = RouterConfig::load(&cli.config)?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    let state = RouterState::new(&config)?;
    log::info!(
        "Loaded registry with {} services from {}",
        state.registry.len(),
        cli.config.display()
    );
    actix_web::rt::System::new().block_on(async move {
        if state.log_interval > 0 {
            tokio::spawn(server::periodic_logging(state.clone()));
        }
        server::startup(config, state).await
    })?;
    Ok(())
}
