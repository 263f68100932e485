//! unimart — interactive marketplace shell.
//!
//! State loads wholesale from the snapshot file at startup and is written
//! back wholesale when the user quits.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use unimart_store::{JsonFileRepository, MarketState, Repository};

mod buyer;
mod console;
mod seller;
mod shell;

use shell::Shell;

#[derive(Parser)]
#[command(name = "unimart")]
#[command(about = "Campus marketplace: buyers, sellers, catalogs, carts")]
struct Cli {
    /// Snapshot file holding the whole marketplace state.
    #[arg(long, default_value = "unimart.json")]
    data: PathBuf,

    /// Log informational messages (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose && std::env::var_os("RUST_LOG").is_none() {
        // SAFETY: still single-threaded; nothing has read the environment yet.
        unsafe { std::env::set_var("RUST_LOG", "info") };
    }
    unimart_observability::init();

    let repository = JsonFileRepository::new(&cli.data);
    let snapshot = repository
        .load()
        .with_context(|| format!("loading snapshot from {}", cli.data.display()))?;
    let state = MarketState::from_snapshot(snapshot);
    tracing::info!(path = %cli.data.display(), "marketplace loaded");

    let stdin = io::stdin();
    let mut shell = Shell::new(state, stdin.lock(), io::stdout());
    shell.run().context("shell io failure")?;

    repository
        .save(&shell.state.to_snapshot())
        .with_context(|| format!("saving snapshot to {}", cli.data.display()))?;
    tracing::info!("marketplace saved");
    Ok(())
}
