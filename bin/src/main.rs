use std::path::PathBuf;
use std::process::ExitCode;

use backlight_notify::{
    BacklightNotifyError, ChangeWatcherBuilder, DbusNotificationServer, FileConfig, Overrides,
    Settings,
};

use clap::Parser;
use log::{error, info};
use tokio::signal::unix::{SignalKind, signal};

/// Show a desktop notification whenever the backlight brightness changes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug information
    #[arg(short, long)]
    debug: bool,

    /// Notification timeout in seconds (-1 - default notification timeout, 0 - notification never expires)
    #[arg(short, long, value_name = "seconds", allow_negative_numbers = true)]
    timeout: Option<i32>,

    /// Device below /sys/class/backlight/
    #[arg(short, long, value_name = "backlight")]
    backlight: Option<String>,

    /// Config file to use instead of $XDG_CONFIG_HOME/backlight-notify/config.toml
    #[arg(short, long, value_name = "path")]
    config: Option<PathBuf>,
}

impl Args {
    fn settings(self) -> Result<Settings, BacklightNotifyError> {
        let file = FileConfig::load(self.config.as_deref())?;
        Settings::resolve(
            file,
            Overrides {
                debug: self.debug,
                timeout: self.timeout,
                backlight: self.backlight,
            },
        )
    }
}

fn init_logger(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            error!("Cannot listen for SIGTERM: {e}");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Received SIGINT"),
        _ = sigterm.recv() => info!("Received SIGTERM"),
    }
}

async fn run(settings: Settings) -> Result<(), BacklightNotifyError> {
    let server = DbusNotificationServer::new().await?;
    info!("Notify has been initialized");

    let mut watcher = ChangeWatcherBuilder::from_settings(&settings).build(server)?;
    watcher.run_until(shutdown_signal()).await;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let settings = match Args::parse().settings() {
        Ok(settings) => settings,
        Err(e) => {
            init_logger(false);
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_logger(settings.debug);
    info!("Options have been initialized");

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
