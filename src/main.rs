//! EIP Keeper - Entry Point
//!
//! Loads configuration, resumes or starts a run, and loops until the target
//! number of validated addresses is kept.

use std::io;
use std::sync::Arc;

use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use eip_keeper::config::{Config, LogConfig};
use eip_keeper::error::{KeeperError, Result};
use eip_keeper::prompt::prompt_target_total;
use eip_keeper::provider::{Ec2Client, ResourceAllocator};
use eip_keeper::proxy::{HealthChecker, HealthCheckerConfig};
use eip_keeper::repository::{FileBlocklistStore, FileStateStore};
use eip_keeper::services::{create_publisher, Blocklist, Publisher, RoundController};

/// Exit status when the round cap stopped the run before the target was reached
const EXIT_NOT_CONVERGED: i32 = 2;
/// Exit status after an interrupt
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log);
    info!("Starting EIP Keeper");

    let code = tokio::select! {
        result = run(config) => match result {
            Ok(code) => code,
            Err(e) => {
                error!("{}", e);
                1
            }
        },
        _ = shutdown_signal() => {
            warn!("Interrupted; addresses allocated in the current round are left at the provider");
            EXIT_INTERRUPTED
        }
    };

    std::process::exit(code);
}

async fn run(config: Config) -> Result<i32> {
    let publisher: Arc<dyn Publisher> = Arc::from(create_publisher(&config.publish));
    let blocklist = Blocklist::load(
        Arc::new(FileBlocklistStore::new(&config.storage.blocklist_path)),
        publisher,
    )
    .await?;

    let provider = Arc::new(Ec2Client::new(&config.aws)?);
    let checker = Arc::new(HealthChecker::new(HealthCheckerConfig::from(&config.harvest)));

    let mut controller = RoundController::new(
        config.harvest.clone(),
        ResourceAllocator::new(provider),
        checker,
        blocklist,
        Arc::new(FileStateStore::new(&config.storage.state_path)),
    );

    let state = match controller
        .plan(|| prompt_target_total(&mut io::stdin().lock(), &mut io::stdout()))
        .await
    {
        Ok(state) => state,
        Err(KeeperError::InvalidInput(msg)) => {
            println!("Invalid input. {}", msg);
            return Ok(1);
        }
        Err(e) => return Err(e),
    };

    let summary = controller.run(state).await?;

    let kept: Vec<&str> = summary
        .state
        .kept
        .iter()
        .map(|k| k.address.as_str())
        .collect();
    println!("Final kept IPs: {:?}", kept);
    println!("Total kept IPs: {}", kept.len());

    if summary.converged {
        info!("Target reached after {} rounds", summary.rounds);
        Ok(0)
    } else {
        warn!(
            "Round limit reached; {} addresses still to allocate",
            summary.state.remaining_demand
        );
        Ok(EXIT_NOT_CONVERGED)
    }
}

/// Initialize tracing; `RUST_LOG` overrides `LOG_LEVEL`
fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("eip_keeper={}", log.level).into());

    let fmt_layer = if log.format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
