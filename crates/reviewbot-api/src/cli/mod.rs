//! CLI definitions for the `reviewbot` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Live review chatbot for an electronics store.
#[derive(Parser)]
#[command(name = "reviewbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding config.toml and reviewbot.db [default: ~/.reviewbot]
    #[arg(long, global = true, env = "REVIEWBOT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP and WebSocket server.
    Serve {
        /// Port to listen on.
        #[arg(long, short, env = "REVIEWBOT_PORT", default_value_t = 3000)]
        port: u16,

        /// Host to bind to.
        #[arg(long, env = "REVIEWBOT_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Directory of static files served for unknown paths.
        #[arg(long, env = "REVIEWBOT_STATIC_DIR", default_value = "static")]
        static_dir: PathBuf,

        /// Gemini API key.
        #[arg(long, env = "REVIEWBOT_GEN_AI_API_KEY", hide_env_values = true)]
        api_key: String,
    },
}
