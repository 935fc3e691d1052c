use std::{io::Write, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{CommandBackend, Diagnostic, Dispatcher, RenderSurface};
use command_host::CommandHost;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::RecvError},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod shell;
mod surface;

use backend_bridge::HostBridge;
use config::load_settings;
use shell::{parse_line, ShellCommand, HELP};
use surface::TerminalSurface;

#[derive(Parser, Debug)]
#[command(name = "bookery", about = "Library manager shell: browse authors, books, customers and rentals")]
struct Args {
    /// Path to a TOML config file (defaults to ./bookery.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL of the library REST API.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        settings.api_base_url = url;
    }
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let host = CommandHost::new(&settings.api_base_url, settings.request_timeout())
        .context("failed to start command host")?;
    info!(api = %host.api().base_url(), "command host ready");

    let backend: Arc<dyn CommandBackend> = Arc::new(HostBridge::new(Arc::new(host)));
    let surface: Arc<dyn RenderSurface> = Arc::new(TerminalSurface::new(std::io::stdout()));
    let dispatcher = Dispatcher::new(backend, surface);

    let diagnostics = dispatcher.subscribe_diagnostics();
    tokio::spawn(async move {
        let mut stderr = std::io::stderr();
        report_diagnostics(diagnostics, &mut stderr).await;
    });

    println!("{HELP}");
    run_shell(&dispatcher, BufReader::new(tokio::io::stdin())).await
}

/// Prints backend failures as status lines until the dispatcher goes away.
/// A lagging receiver reports how many it skipped and keeps going.
async fn report_diagnostics<W: Write>(
    mut diagnostics: broadcast::Receiver<Diagnostic>,
    out: &mut W,
) {
    loop {
        match diagnostics.recv().await {
            Ok(diagnostic) => {
                let _ = writeln!(out, "! {}", diagnostic.summary());
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "diagnostics printer lagged");
                let _ = writeln!(out, "! {skipped} diagnostics dropped");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Feeds input lines to the dispatcher until EOF or `quit`.
async fn run_shell<R>(dispatcher: &Arc<Dispatcher>, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        let command = match parse_line(&line, dispatcher.active_module()) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("! {err}");
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Empty => {}
            ShellCommand::Event(event) => {
                // Search handles are dropped on purpose: loads finish in the background.
                if let Err(err) = dispatcher.handle_event(event).await {
                    warn!(error = %err, "ui event rejected");
                    eprintln!("! {err}");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
