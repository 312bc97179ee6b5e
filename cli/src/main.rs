//! Terminal host for the todo service.
//!
//! Reads commands from stdin, executes the core's requests with ureq and
//! prints the list after every action.

mod command;
mod render;
mod session;
mod transport;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use todo_core::ClientConfig;
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::session::{Flow, Session};
use crate::transport::UreqTransport;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Manage a remote todo list from the terminal", long_about = None)]
struct Cli {
    /// Base URL of the todo service
    #[arg(short, long, env = "TODO_BASE_URL")]
    base_url: Option<String>,

    /// Log requests and decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "todo_core=debug,todo=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if config.base_url.is_empty() {
        anyhow::bail!("no service URL: pass --base-url or set TODO_BASE_URL");
    }
    tracing::debug!(base_url = %config.base_url, "starting session");

    let mut session = Session::new(&config, UreqTransport::new());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.start(&mut out)?;

    let stdin = io::stdin();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(line) {
            Ok(command) => {
                if session.handle(command, &mut out)? == Flow::Exit {
                    break;
                }
            }
            Err(message) => writeln!(out, "{message}")?,
        }
    }
    Ok(())
}
