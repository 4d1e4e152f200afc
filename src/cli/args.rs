//! Command-line argument parsing for Mindbridge
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::bridge::DEFAULT_SERVICE_URL;
use crate::config::Config;

/// Mindbridge - knowledge-grounded mental health support service
#[derive(Parser, Debug)]
#[command(name = "mindbridge")]
#[command(version)]
#[command(about = "Knowledge-grounded mental health support with distress flagging", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Knowledge base JSON file (overrides config)
    #[arg(short, long, global = true)]
    pub knowledge: Option<PathBuf>,

    /// Use the built-in knowledge topics instead of a file
    #[arg(long, global = true, conflicts_with = "knowledge")]
    pub builtin_knowledge: bool,

    /// Generation model (overrides config)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve the HTTP query API
    Serve {
        /// Listen host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Answer one message in-process and print the JSON result
    Ask {
        /// Message to answer
        #[arg(value_name = "MESSAGE")]
        message: String,
    },

    /// Send one message to a running service, falling back locally
    Remote {
        /// Message to send
        #[arg(value_name = "MESSAGE")]
        message: String,

        /// Service base URL
        #[arg(long, default_value = DEFAULT_SERVICE_URL)]
        url: String,
    },

    /// Check knowledge base and generation backend
    Doctor,

    /// Display effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Fold command-line overrides into a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.knowledge {
            config.knowledge.path = path.to_string_lossy().to_string();
        }
        if let Some(model) = &self.model {
            config.generation.model = model.clone();
        }
        if let Commands::Serve { host, port } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}

impl Verbosity {
    /// Default log filter for this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::VeryVerbose => "trace",
        }
    }
}
