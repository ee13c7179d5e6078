#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;
use eframe::NativeOptions;
use std::path::PathBuf;
use tokio::runtime::Runtime;

use ticker_scope::config::PERSISTENCE;
use ticker_scope::ui::UI_TEXT;
use ticker_scope::{AnalyticsSource, Cli, build_source, run_app};

fn main() -> eframe::Result {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Runtime for every fetch the UI starts
    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    // D. Analytics source (blocking, before the window opens)
    let source = match runtime.block_on(build_source(&args)) {
        Ok(source) => source,
        Err(e) => {
            log::error!("Failed to open analytics source: {:#}", e);
            std::process::exit(1);
        }
    };
    log::info!("Using analytics source: {}", source.signature());

    // E. Run Native App
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(PERSISTENCE.app_state_path)),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    let result = eframe::run_native(
        UI_TEXT.window_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, source, handle, &args))),
    );

    // Outstanding fetch threads must not keep the process alive
    runtime.shutdown_background();
    result
}
