//! Command definitions.

use clap::{Parser, Subcommand};
use reelsmith_core::{LogFormat, Operation};
use std::path::PathBuf;

/// Reelsmith: LLM-backed Instagram content strategy API.
#[derive(Parser, Debug)]
#[command(name = "reelsmith")]
#[command(about = "Reelsmith - Instagram content strategy generation via a local LLM")]
#[command(version)]
pub struct Cli {
    /// Log output format (pretty, compact, json)
    #[arg(long, global = true, default_value = "compact", env = "REELSMITH_LOG_FORMAT")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API until Ctrl+C
    Serve {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Interface to bind (overrides config and REELSMITH_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config and REELSMITH_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the prompt an operation would send, without calling the model
    Prompt {
        /// Operation name (strategy, regenerate_strategy, content, trending_reels, optimize_idea)
        operation: Operation,

        /// Request body as a JSON object
        #[arg(short, long, default_value = "{}")]
        input: String,
    },

    /// Run one operation against the inference server and print the response envelope
    Generate {
        /// Operation name (strategy, regenerate_strategy, content, trending_reels, optimize_idea)
        operation: Operation,

        /// Request body as a JSON object
        #[arg(short, long, default_value = "{}")]
        input: String,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
