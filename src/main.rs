mod common;
mod config;
mod console;
mod network;
mod session;
mod ui;

use std::error::Error;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use network::{EndpointWorker, HttpEndpoint};
use tokio::sync::mpsc;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "nexus_chat",
    version,
    about = "Chat client for the Nexus AI answering service"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Base address of the answering service (overrides CHAT_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Chat from the terminal instead of opening a window
    Console,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::resolve(&cli.config, cli.api_url.clone());
    let endpoint = HttpEndpoint::new(&app_config)?;

    if cli.mode == Some(Mode::Console) {
        return console::run(endpoint).await;
    }

    run_desktop(endpoint).await?;
    Ok(())
}

async fn run_desktop(endpoint: HttpEndpoint) -> Result<(), eframe::Error> {
    // UI -> worker
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    // worker -> UI
    let (event_tx, event_rx) = mpsc::channel(8);

    log::info!("Starting desktop client against {}", endpoint.url());
    tokio::spawn(EndpointWorker::new(endpoint, event_tx, cmd_rx).run());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([420.0, 640.0])
            .with_title(ui::components::header::TITLE),
        ..Default::default()
    };

    eframe::run_native(
        ui::components::header::TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(ChatApp::new(cc, cmd_tx, event_rx)))),
    )
}
