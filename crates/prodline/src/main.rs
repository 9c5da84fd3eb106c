mod client;
mod output;
mod telemetry;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use prodline_core::config::Config;
use prodline_core::time::parse_wait_time;
use prodline_sensor::{SimulatorConfig, run_simulator};
use prodline_server::http::AppState;
use prodline_server::server::run_http_server;
use prodline_store::Store;

use crate::client::DashboardClient;
use crate::output::{print_status_human, print_summary_human};
use crate::telemetry::{LogFormat, init_cli_tracing, init_run_tracing};

#[derive(Parser, Debug)]
#[command(name = "prodline")]
#[command(about = "Production line monitoring demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Run the ingest endpoint and dashboard")]
    Serve {
        #[arg(long)]
        db_path: Option<PathBuf>,
        #[arg(long)]
        http_addr: Option<String>,
    },
    #[command(about = "Generate sensor readings and post them to the server")]
    Simulate {
        #[arg(long, help = "Server base URL, /submitData is appended")]
        endpoint: Option<String>,
        #[arg(long, help = "Seconds (e.g. 15) or duration (e.g. 500ms) between posts")]
        wait_time: Option<String>,
        #[arg(long, help = "Stop after this many readings")]
        iterations: Option<u64>,
        #[arg(long, help = "Seed for a reproducible reading stream")]
        seed: Option<u64>,
        #[arg(long)]
        defect_probability: Option<f64>,
        #[arg(long)]
        base_increment: Option<f64>,
    },
    #[command(about = "Show dashboard figures from a running server")]
    Summary {
        #[arg(long)]
        endpoint: Option<String>,
    },
    #[command(about = "Show store status from a running server")]
    Status {
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = Config::load().context("load config")?;

    match cli.command {
        Commands::Serve { db_path, http_addr } => {
            init_run_tracing(LogFormat::from_env());
            if let Some(v) = db_path {
                cfg.db_path = v;
            }
            if let Some(v) = http_addr {
                cfg.http_addr = v;
            }
            run_server(cfg).await
        }
        Commands::Simulate {
            endpoint,
            wait_time,
            iterations,
            seed,
            defect_probability,
            base_increment,
        } => {
            init_run_tracing(LogFormat::from_env());
            if let Some(v) = endpoint {
                cfg.api_endpoint = v;
            }
            if let Some(v) = wait_time {
                cfg.wait_time = parse_wait_time(&v)?;
            }
            let mut sim = SimulatorConfig::from_config(&cfg);
            sim.iterations = iterations;
            sim.seed = seed;
            if let Some(v) = defect_probability {
                sim.generator.defect_probability = v;
            }
            if let Some(v) = base_increment {
                sim.generator.base_increment = v;
            }

            let summary = run_simulator(sim, shutdown_signal()).await?;
            tracing::info!(
                iterations = summary.iterations,
                delivered = summary.delivered,
                failed = summary.failed,
                "sensor simulator finished"
            );
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "iterations": summary.iterations,
                        "delivered": summary.delivered,
                        "failed": summary.failed,
                        "orders": summary.state.orders,
                        "defects": summary.state.defects,
                    }))?
                );
            }
            Ok(())
        }
        Commands::Summary { endpoint } => {
            init_cli_tracing();
            let client = DashboardClient::new(endpoint.as_deref().unwrap_or(&cfg.api_endpoint));
            let summary = client.summary().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary_human(&summary);
            }
            Ok(())
        }
        Commands::Status { endpoint } => {
            init_cli_tracing();
            let client = DashboardClient::new(endpoint.as_deref().unwrap_or(&cfg.api_endpoint));
            let status = client.status().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status_human(&status);
            }
            Ok(())
        }
    }
}

async fn run_server(cfg: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg
        .http_addr
        .parse()
        .with_context(|| format!("invalid http addr {}", cfg.http_addr))?;
    let store = Store::open(&cfg.db_path)
        .with_context(|| format!("open store {}", cfg.db_path.display()))?;

    eprintln!("prodline serve");
    eprintln!("  db: {}", cfg.db_path.display());
    eprintln!("  dashboard: http://{addr}/");
    eprintln!("  ingest: http://{addr}/submitData");
    eprintln!("  tip: run `prodline simulate --endpoint http://{addr}` in another shell");

    let state = AppState::new(store, &cfg);
    run_http_server(state, addr, shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("ctrl-c handler unavailable, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("received ctrl-c, shutting down");
}
