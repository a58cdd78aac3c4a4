//! `splitbook` — hosts one in-memory ledger and drives it with a JSON-lines
//! command script read from a file argument or stdin.

mod commands;
mod config;
mod script;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::Context;
use splitbook_ledger::{Ledger, SystemClock};

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("invalid configuration")?;
    splitbook_observability::init_with(config.log_format);

    let mut ledger = Ledger::with_config(config.ledger.clone(), SystemClock)?;
    tracing::info!(app = %ledger.metadata().app_name, "ledger ready");

    let input: Box<dyn BufRead> = match &config.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open script {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let written = script::run(&mut ledger, input, io::stdout().lock(), &config.actor)?;
    tracing::info!(results = written, splits = ledger.splits().len(), "script finished");
    Ok(())
}
