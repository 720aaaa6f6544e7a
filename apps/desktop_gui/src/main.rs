mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{config::normalize_base_url, load_settings, ClientSettings};
use crossbeam_channel::bounded;
use eframe::egui;
use tokio::sync::mpsc;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{app::WINDOW_TITLE, UserListApp};

/// Flags override `crud_client.toml` and `APP__*` environment variables.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    api_key: Option<String>,
}

fn resolve_settings(mut settings: ClientSettings, args: &Args) -> Result<ClientSettings> {
    if let Some(url) = &args.api_base_url {
        settings.api_base_url = url.clone();
    }
    if let Some(page) = args.page {
        settings.users_page = page;
    }
    if let Some(key) = &args.api_key {
        settings.api_key = Some(key.clone()).filter(|key| !key.trim().is_empty());
    }
    settings.api_base_url = normalize_base_url(&settings.api_base_url)
        .context("api base url from settings or --api-base-url")?;
    Ok(settings)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let settings = resolve_settings(load_settings(), &args)?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let (answer_tx, answer_rx) = mpsc::channel::<bool>(4);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx, answer_rx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(UserListApp::new(cmd_tx, ui_rx, answer_tx)))),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}
