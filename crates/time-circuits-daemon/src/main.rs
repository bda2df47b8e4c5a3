//! Time Circuits Daemon
//!
//! Drives the three clock rows and the sound cues of the time circuits prop.

mod config;
mod display;
mod hardware;
mod settings;
mod sound;
mod state;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use sound::cues;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());

    let config = Config::load(&config_path).context("Failed to load configuration")?;
    info!("Loaded configuration from: {}", config_path);

    // Initialize application state
    let state = Arc::new(AppState::new(config)?);

    state.init_sound().await;
    state.play(cues::CONFIRM_ON);

    // Start render loop
    let render_state = state.clone();
    tokio::spawn(async move {
        render_loop(render_state).await;
    });

    // Optionally start the time-travel loop
    if state.config().travel.enable {
        let travel_state = state.clone();
        tokio::spawn(async move {
            travel_loop(travel_state).await;
        });
    } else {
        info!("Automatic time travel disabled");
    }

    // Setup Unix signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sighup = signal(SignalKind::hangup())?;
    let mut sigusr1 = signal(SignalKind::user_defined1())?;
    let mut sigusr2 = signal(SignalKind::user_defined2())?;

    loop {
        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down");
                break;
            }
            _ = sighup.recv() => {
                info!("Received SIGHUP, rescanning sounds");
                state.rebuild_sounds();
            }
            _ = sigusr1.recv() => {
                let level = state.settings().brightness().saturating_add(1);
                info!("Brightness set to {}", state.set_brightness(level));
            }
            _ = sigusr2.recv() => {
                let level = state.settings().brightness().saturating_sub(1);
                info!("Brightness set to {}", state.set_brightness(level));
            }
        }
    }

    state.shutdown().await;
    Ok(())
}

async fn render_loop(state: Arc<AppState>) {
    let interval = state.refresh_interval();
    loop {
        state.render_frame();
        tokio::time::sleep(interval).await;
    }
}

async fn travel_loop(state: Arc<AppState>) {
    let interval = Duration::from_secs(state.config().travel.interval.max(1));
    info!("Time travel every {:?}", interval);
    loop {
        tokio::time::sleep(interval).await;
        state.time_travel().await;
    }
}
