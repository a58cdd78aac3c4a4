//! Host configuration from command-line flags and `SPLITBOOK_*` environment
//! variables.

use std::path::PathBuf;

use clap::Parser;
use splitbook_core::DomainResult;
use splitbook_ledger::{DEFAULT_ACTOR, LedgerConfig};
use splitbook_observability::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "splitbook")]
#[command(about = "Drive an in-memory split ledger with a JSON-lines command script")]
pub struct Args {
    /// Command script to run (reads stdin when omitted).
    pub script: Option<PathBuf>,

    #[arg(long, env = "SPLITBOOK_APP_NAME", default_value = "Splitbook")]
    pub app_name: String,

    /// Offset used to render split dates/times, in minutes east of UTC.
    #[arg(
        long,
        env = "SPLITBOOK_UTC_OFFSET_MINUTES",
        default_value_t = 330,
        allow_hyphen_values = true
    )]
    pub utc_offset_minutes: i32,

    /// Recorded on completions that don't name an actor.
    #[arg(long, env = "SPLITBOOK_ACTOR", default_value = DEFAULT_ACTOR)]
    pub actor: String,

    /// `json` or `pretty`.
    #[arg(long, env = "SPLITBOOK_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub script: Option<PathBuf>,
    pub ledger: LedgerConfig,
    pub actor: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn load() -> DomainResult<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> DomainResult<Self> {
        let ledger = LedgerConfig {
            app_name: args.app_name,
            utc_offset_minutes: args.utc_offset_minutes,
            ..LedgerConfig::default()
        };
        ledger.validate()?;

        let actor = if args.actor.trim().is_empty() {
            DEFAULT_ACTOR.to_string()
        } else {
            args.actor
        };

        Ok(Self {
            script: args.script,
            ledger,
            actor,
            log_format: args.log_format,
        })
    }
}
