use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use linkboard_shared::{CategoryId, LinkId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "linkboard",
    version,
    about = "Terminal client for a categorized link board",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Config file; defaults to $LINKBOARD_CONFIG or the user config dir.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `api_base` from the config file.
    #[arg(long = "api-base", global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Default, PartialEq, Eq)]
pub enum Command {
    /// Print every category column with its links.
    #[default]
    Board,
    AddCategory {
        name: String,
    },
    DeleteCategory {
        id: CategoryId,
    },
    AddLink {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        /// Category id; the first category when omitted.
        #[arg(long)]
        category: Option<CategoryId>,
    },
    /// Change the given fields of a link, keeping the rest.
    EditLink {
        id: LinkId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        category: Option<CategoryId>,
    },
    DeleteLink {
        id: LinkId,
    },
}

/// `-v`/`-q` pick the level; otherwise `RUST_LOG`, then the config's
/// `log_filter`.
pub fn init_tracing(verbose: u8, quiet: u8, fallback: &str) -> anyhow::Result<()> {
    let explicit = if quiet >= 2 {
        Some("error")
    } else if quiet == 1 {
        Some("warn")
    } else if verbose >= 3 {
        Some("trace")
    } else if verbose == 2 {
        Some("debug")
    } else if verbose == 1 {
        Some("info")
    } else {
        None
    };

    let env_filter = match explicit {
        Some(level) => EnvFilter::try_new(level),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback)),
    }
    .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
