use std::time::Duration;
use anyhow::Result;
use tracing::{error, info};
use tokio::signal::ctrl_c;
use tokio::time::{interval, MissedTickBehavior};
use plc_shadow_bridge::api::spawn_api_server;
use plc_shadow_bridge::config::Settings;
use plc_shadow_bridge::init::initialize;
use plc_shadow_bridge::utils::logging;

/// The main entry point of the PLC shadow bridge
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

/// Loads settings, starts logging and the HTTP server, then waits for ctrl-c.
///
/// When `processor.poll_interval_secs` is configured, processing passes also run on that interval,
/// sharing the previous-value cache with passes triggered over HTTP.
async fn run() -> Result<()> {
    let settings = Settings::new()?;
    let _guard = logging::init_logger(&settings.logging.level, settings.logging.path.clone())?;

    let context = initialize(settings).await?;
    let server = spawn_api_server(context.gateway.clone(), context.settings.server.bind_address)?;
    info!("PLC shadow bridge listening on {}", server.addr());

    match context.settings.processor.poll_interval_secs.filter(|secs| *secs > 0) {
        Some(secs) => {
            let mut polling_interval = interval(Duration::from_secs(secs));
            polling_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = polling_interval.tick() => {
                        info!("Starting scheduled processing pass...");
                        if let Err(e) = context.gateway.run_processing_pass().await {
                            error!("Error during processing pass: {}", e);
                        }
                    }
                    _ = ctrl_c() => {
                        info!("Received shutdown signal. Shutting down gracefully...");
                        break;
                    }
                }
            }
        }
        None => {
            ctrl_c().await?;
            info!("Received shutdown signal. Shutting down gracefully...");
        }
    }

    server.shutdown().await
}
