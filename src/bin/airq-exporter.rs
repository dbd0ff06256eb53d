// src/bin/airq-exporter.rs

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use airq::common::timing;
use airq::exporter;
use airq::host::{self, Config, SerialSource};
use airq::{PollOutcome, SensorSession};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "airq-exporter")]
#[command(about = "Prometheus exporter for the GP2Y1051AU0F dust sensor")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "airq.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve /metrics over HTTP (default)
    Serve,
    /// Print readings to the console until Ctrl-C
    Watch {
        /// Delay between readings in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "airq=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(path = ?cli.config, "Loading configuration");
    let config = Config::load(&cli.config)?;
    let session = host::open_session(&config)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
            runtime.block_on(serve(config, session))
        }
        Command::Watch { interval_ms } => watch(session, Duration::from_millis(interval_ms)),
    }
}

async fn serve(config: Config, session: SensorSession<SerialSource>) -> color_eyre::Result<()> {
    let app = exporter::router(session);

    let listener = TcpListener::bind(config.server.addr).await?;
    info!(addr = %config.server.addr, "Serving metrics");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Router and its state are gone by now, so the port is closed
    info!("Exporter stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

fn watch(mut session: SensorSession<SerialSource>, interval: Duration) -> color_eyre::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))?;

    let mut stdout = std::io::stdout();
    while running.load(Ordering::SeqCst) {
        match session.poll()? {
            PollOutcome::Reading(reading) => {
                write!(
                    stdout,
                    "[  Vout: {} V     |    Dust density: {} ug/m3 ] \r",
                    reading.vout, reading.density
                )?;
                stdout.flush()?;
                std::thread::sleep(interval);
            }
            PollOutcome::Unavailable => std::thread::sleep(timing::RETRY_BACKOFF),
        }
    }

    writeln!(stdout, "\nQuit!")?;
    Ok(())
}
