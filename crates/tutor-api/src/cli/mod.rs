//! CLI command definitions for the `tutor` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Programming tutor chat service with per-user conversation history.
#[derive(Parser)]
#[command(name = "tutor", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Address to bind (defaults to `server.host` from config.toml).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to `server.port` from config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep history in memory only; nothing is written to disk.
        #[arg(long)]
        ephemeral: bool,
    },

    /// Ask one question as a user and print the reply.
    Chat {
        /// User identifier whose history is used and extended.
        #[arg(short, long)]
        user: String,

        /// The question to ask.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Show a user's conversation history.
    History {
        /// User identifier.
        #[arg(short, long)]
        user: String,
    },

    /// Clear a user's conversation history.
    Clear {
        /// User identifier.
        #[arg(short, long)]
        user: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
