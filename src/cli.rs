//! CLI argument definitions.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Url;

use crate::load::{LineFormat, LoadPlan};
use crate::logging::{DEFAULT_FILTER, SERVE_FILTER};

/// Top-level CLI parser for `userload`.
#[derive(Debug, Parser)]
#[command(
    name = "userload",
    version,
    about = "Register random usernames against an HTTP endpoint, one request at a time"
)]
pub struct Cli {
    /// Tracing filter for diagnostics on stderr (falls back to `RUST_LOG`).
    #[arg(long, global = true, env = "USERLOAD_LOG")]
    pub log_level: Option<String>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Post random usernames to the endpoint and print each response.
    Run(RunArgs),
    /// Print generated usernames without sending anything.
    Names {
        /// How many names to print.
        #[arg(long, short = 'n', default_value_t = 10)]
        count: u64,
    },
    /// Serve an in-memory user registry to run the load against.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "USERLOAD_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
}

impl Command {
    /// Tracing filter used when neither `--log-level` nor `RUST_LOG` is set.
    ///
    /// The server logs every request by default; the client stays quiet.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Serve { .. } => SERVE_FILTER,
            Self::Run(_) | Self::Names { .. } => DEFAULT_FILTER,
        }
    }
}

/// Arguments of the `run` subcommand.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Base configuration; the flags below override its values.
    #[arg(long, value_enum, env = "USERLOAD_PRESET", default_value_t = Preset::Gateway)]
    pub preset: Preset,

    /// URL every username is posted to.
    #[arg(long, env = "USERLOAD_ENDPOINT")]
    pub endpoint: Option<Url>,

    /// Number of sequential requests to send.
    #[arg(long, short = 'n', env = "USERLOAD_ITERATIONS")]
    pub iterations: Option<u64>,

    /// Layout of each printed line.
    #[arg(long, value_enum, env = "USERLOAD_FORMAT")]
    pub format: Option<LineFormat>,

    /// Record generated names and responses to a cassette file.
    #[arg(long, value_name = "FILE", conflicts_with = "replay")]
    pub record: Option<PathBuf>,

    /// Resend the names recorded in a cassette file instead of random ones.
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,
}

/// The two known target configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// `http://localhost/user`, 100000 requests, `<body> - <name>` lines.
    Gateway,
    /// `http://localhost:3000/user`, 500000 requests, `<body>` lines.
    Direct,
}

impl Preset {
    /// Endpoint URL of this preset.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Gateway => "http://localhost/user",
            Self::Direct => "http://localhost:3000/user",
        }
    }

    /// Iteration count of this preset.
    #[must_use]
    pub fn iterations(self) -> u64 {
        match self {
            Self::Gateway => 100_000,
            Self::Direct => 500_000,
        }
    }

    /// Line format of this preset.
    #[must_use]
    pub fn format(self) -> LineFormat {
        match self {
            Self::Gateway => LineFormat::BodyAndName,
            Self::Direct => LineFormat::BodyOnly,
        }
    }
}

/// Fully resolved settings of a load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Target URL.
    pub endpoint: Url,
    /// Iteration count and output format.
    pub plan: LoadPlan,
}

impl RunArgs {
    /// Applies explicit flags on top of the selected preset.
    ///
    /// # Errors
    ///
    /// Returns an error string if the preset endpoint fails to parse.
    pub fn resolve(&self) -> Result<RunSettings, String> {
        let endpoint = match &self.endpoint {
            Some(url) => url.clone(),
            None => Url::parse(self.preset.endpoint())
                .map_err(|e| format!("invalid preset endpoint: {e}"))?,
        };

        Ok(RunSettings {
            endpoint,
            plan: LoadPlan {
                iterations: self.iterations.unwrap_or_else(|| self.preset.iterations()),
                format: self.format.unwrap_or_else(|| self.preset.format()),
            },
        })
    }
}
