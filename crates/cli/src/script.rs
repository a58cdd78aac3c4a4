//! Line-by-line script runner.

use std::io::{BufRead, Write};

use anyhow::Context;
use serde_json::json;
use splitbook_ledger::{Clock, Ledger};

use crate::commands::{Command, execute};

/// Run every command in `input`, writing one JSON result line per command.
///
/// Blank lines and `#` comments are skipped. A line that fails to parse yields
/// an `"ok": false` result and the run continues. Returns the number of
/// results written.
pub fn run<C: Clock>(
    ledger: &mut Ledger<C>,
    input: impl BufRead,
    mut out: impl Write,
    default_actor: &str,
) -> anyhow::Result<usize> {
    let mut written = 0;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let response = match Command::parse(trimmed) {
            Ok(command) => execute(ledger, command, default_actor)?,
            Err(err) => {
                tracing::warn!(line = line_no, error = %format!("{err:#}"), "skipping command");
                json!({ "ok": false, "error": format!("line {line_no}: {err:#}") })
            }
        };

        serde_json::to_writer(&mut out, &response)?;
        writeln!(out)?;
        written += 1;
    }

    out.flush()?;
    Ok(written)
}
