#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod core;
mod utils;

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use app::{PreviewApp, PreviewHandle};
use config::ConfigManager;
use crate::core::history::ClipboardHistory;
use crate::core::hotkey::{Flow, HotkeyStateMachine};
use utils::clipboard::SystemClipboard;
use utils::hook;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("clipcycle=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    setup_logging();
    info!("starting clipcycle");

    let config_manager = ConfigManager::new();
    let config = config_manager.load();
    if !config_manager.exists() {
        // Drop a default config next to the exe so the settings are
        // discoverable.
        if let Err(err) = config_manager.save(&config) {
            warn!("could not write default config file: {err}");
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([700.0, 400.0])
            .with_min_inner_size([500.0, 300.0])
            .with_always_on_top()
            // Hidden until the user cycles through history with Win+Shift
            .with_visible(false),
        ..Default::default()
    };

    eframe::run_native(
        "Clipboard History",
        options,
        Box::new(move |cc| {
            let (display_tx, display_rx) = mpsc::channel();
            let (key_tx, key_rx) = mpsc::channel();

            // Global hook; registration failure exits the process from the
            // hook thread since the utility is useless without it.
            hook::spawn_listener(key_tx);

            let view = PreviewHandle::new(display_tx, cc.egui_ctx.clone());
            let mut history = ClipboardHistory::with_capacity(
                Box::new(SystemClipboard),
                config.history_capacity,
            );
            history.clear_system_clipboard();

            let mut machine = HotkeyStateMachine::new(
                history,
                Box::new(view),
                Duration::from_millis(config.capture_delay_ms()),
            );

            thread::spawn(move || {
                if machine.run(key_rx) == Flow::Exit {
                    info!("exit requested (Win+Shift+E)");
                    std::process::exit(0);
                }
            });

            info!("press Ctrl+C to capture clipboard, Win+Shift to cycle through history");
            info!("press Win+Shift+E to exit");

            Ok(Box::new(PreviewApp::new(display_rx)))
        }),
    )
}
