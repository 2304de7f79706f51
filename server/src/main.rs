mod config;
mod http;
mod routes;

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::Directory;
use tracing::{info, warn};

use crate::{config::AppConfig, http::AppState};

#[derive(Parser, Debug)]
#[command(name = "directory-server", version, about = "Employee directory JSON API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Validate the employee seed file and report its size.
    #[command(name = "seed:check")]
    SeedCheck {
        #[arg(long, value_name = "FILE", help = "Seed file (overrides EMPLOYEES_PATH)")]
        data: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
    #[arg(long, value_name = "FILE", help = "Seed file (overrides EMPLOYEES_PATH)")]
    data: Option<PathBuf>,
}

impl ServeCommand {
    fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _obs = init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let app_config = AppConfig::load()?;
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::SeedCheck { data } => seed_check(app_config.with_seed_path(data)).await,
    }
}

async fn load_directory(config: &AppConfig) -> Result<Directory> {
    Directory::load(&config.seed_path)
        .await
        .with_context(|| format!("loading employees from {}", config.seed_path.display()))
}

async fn run_server(cmd: ServeCommand, config: AppConfig) -> Result<()> {
    let addr = cmd.addr();
    let config = config.with_seed_path(cmd.data);
    let directory = load_directory(&config).await?;
    info!(
        path = %config.seed_path.display(),
        employees = directory.len().await,
        "employee directory seeded"
    );
    let state = AppState::new(directory, Arc::new(config));
    http::serve(addr, state).await
}

async fn seed_check(config: AppConfig) -> Result<()> {
    let directory = load_directory(&config).await?;
    if directory.is_empty().await {
        warn!(path = %config.seed_path.display(), "seed file holds no employees");
    }
    println!(
        "{}: {} employees",
        config.seed_path.display(),
        directory.len().await
    );
    Ok(())
}
