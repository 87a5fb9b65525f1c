mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{AdminGuiApp, PersistedConsoleSettings, StartupConfig, SETTINGS_STORAGE_KEY};

/// Desktop admin console for the auction platform.
#[derive(Debug, Parser)]
#[command(name = "admin_gui", version, about)]
struct Args {
    /// Platform API base URL.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,

    /// Prefill for the admin id field on the sign-in screen.
    #[arg(long, default_value = "")]
    admin_id: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let startup = StartupConfig {
        server_url: args.server_url,
        admin_id: args.admin_id,
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Auction Admin Console")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([980.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Auction Admin Console",
        options,
        Box::new(move |cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedConsoleSettings>(&text).ok())
            });
            Ok(Box::new(AdminGuiApp::bootstrap(
                cmd_tx,
                ui_rx,
                persisted_settings,
                startup,
            )))
        }),
    )
}
