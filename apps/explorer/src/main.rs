use std::{
    io::{self, BufRead},
    path::PathBuf,
    thread,
};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::SessionServices;
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use backend_bridge::{commands::BackendCommand, runtime::start_backend_bridge};
use config::{load_settings, load_settings_from, Settings};
use controller::{
    events::UiEvent,
    orchestration::{dispatch_backend_command, parse_input, ShellInput, COMMAND_QUEUE_CAPACITY},
};
use ui::terminal::{render_event, HELP};

#[derive(Parser, Debug)]
#[command(about = "Browse and upload files attached to a record")]
struct Args {
    /// Settings file; defaults to ./explorer.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    connection: Option<String>,
    #[arg(long)]
    identifier: Option<String>,
    #[arg(long)]
    object_type: Option<String>,
    #[arg(long)]
    record_id: Option<String>,
    #[arg(long)]
    page_origin: Option<String>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        let overrides = [
            (self.api_url, &mut settings.api_base_url),
            (self.connection, &mut settings.connection),
            (self.identifier, &mut settings.record_identifier),
            (self.object_type, &mut settings.object_type),
            (self.page_origin, &mut settings.page_origin),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if self.record_id.is_some() {
            settings.record_id = self.record_id;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let mut args = Args::parse();

    let mut settings = match args.config.take() {
        Some(path) => load_settings_from(&path, |key| std::env::var(key).ok())?,
        None => load_settings()?,
    };
    args.apply(&mut settings);

    let services = SessionServices::http(settings.api_base()?);
    let options = settings.session_options()?;
    tracing::info!(
        api = %settings.api_base_url,
        connection = %settings.connection,
        "explorer: starting"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(COMMAND_QUEUE_CAPACITY);
    let worker = start_backend_bridge(cmd_rx, ui_tx, services, options);
    let printer = thread::spawn(move || {
        for event in ui_rx.iter() {
            println!("{}", render_event(&event));
        }
    });

    let mut status = String::new();
    if let Some(context) = settings.record_context() {
        dispatch_backend_command(&cmd_tx, BackendCommand::Resolve { context }, &mut status);
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read shell input")?;
        match parse_input(&line, &settings) {
            Ok(Some(ShellInput::Command(cmd))) => {
                dispatch_backend_command(&cmd_tx, cmd, &mut status)
            }
            Ok(Some(ShellInput::Help)) => println!("{HELP}"),
            Ok(Some(ShellInput::Quit)) => break,
            Ok(None) => {}
            Err(message) => eprintln!("{message}"),
        }
        if !status.is_empty() {
            eprintln!("{status}");
            status.clear();
        }
    }

    drop(cmd_tx);
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    let _ = printer.join();
    Ok(())
}
