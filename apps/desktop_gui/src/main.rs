mod config;
mod controller;
mod presenter;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::ui::{app::StartupSeed, ConverterApp};

type AppCreationError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "shortuuid-desktop", about = "Convert between UUIDs and ShortUUIDs")]
struct Args {
    /// Settings file; missing files fall back to defaults.
    #[arg(long, default_value = "shortuuid.toml")]
    config: PathBuf,
    /// ShortUUID to decode on startup.
    #[arg(long)]
    short: Option<String>,
    /// UUID to encode on startup; ignored when --short is given.
    #[arg(long)]
    long: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = config::load_settings(&args.config);

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(config = %args.config.display(), "starting desktop converter");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("shortuuid-timers")
        .enable_time()
        .build()
        .context("failed to build timer runtime")?;

    let seed = StartupSeed {
        short: args.short,
        long: args.long,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ShortUUID Converter")
            .with_inner_size([520.0, 340.0])
            .with_min_inner_size([420.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "ShortUUID Converter",
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, AppCreationError> {
            let app = ConverterApp::new(cc, &settings, seed, runtime)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow!("desktop ui failed: {err}"))
}
