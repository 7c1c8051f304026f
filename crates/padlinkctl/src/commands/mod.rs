//! Command implementations for padlinkctl

pub mod codec;
pub mod config;
pub mod stream;
pub mod synth;

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use padlink_haptics::ButtonFeedback;
use padlink_protocol::UPDATE_INTERVAL_MS;

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Host address
    #[arg(long, env = "PADLINK_HOST")]
    pub host: Option<String>,
    /// Host TCP port
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Act as the left-hand controller
    #[arg(long)]
    pub left: bool,
    /// Telemetry period in milliseconds
    #[arg(long, default_value_t = UPDATE_INTERVAL_MS)]
    pub interval_ms: u64,
    /// Stop after this many seconds (default: until Ctrl+C)
    #[arg(short, long)]
    pub duration: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum EncodeCommands {
    /// Encode a telemetry frame given as JSON
    Telemetry {
        /// Frame JSON; unspecified fields take their defaults
        #[arg(long, conflicts_with = "file")]
        frame: Option<String>,
        /// Read the frame JSON from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Encode a haptic command
    Haptic {
        /// Address the left-hand controller
        #[arg(long)]
        left: bool,
        /// Strength, nominally 0..1
        #[arg(long)]
        amplitude: f32,
        /// Pulse rate in Hz (0 for a constant buzz)
        #[arg(long, default_value = "0")]
        frequency: f32,
        /// Duration in seconds
        #[arg(long)]
        duration: f32,
    },
}

#[derive(Subcommand, Debug)]
pub enum DecodeCommands {
    /// Decode a base64 telemetry frame
    Telemetry {
        /// Wire string
        frame: String,
    },

    /// Decode a base64 haptic command
    Haptic {
        /// Wire string
        frame: String,
    },
}

#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Strength, nominally 0..1
    #[arg(long)]
    pub amplitude: f32,
    /// Pulse rate in Hz (0 for a constant buzz)
    #[arg(long, default_value = "0")]
    pub frequency: f32,
    /// Duration in seconds
    #[arg(long)]
    pub duration: f32,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Single short click
    Tap,
    /// Two-stage click
    Double,
    /// Three quick ticks
    Triple,
}

impl From<FeedbackKind> for ButtonFeedback {
    fn from(kind: FeedbackKind) -> Self {
        match kind {
            FeedbackKind::Tap => ButtonFeedback::Tap,
            FeedbackKind::Double => ButtonFeedback::Double,
            FeedbackKind::Triple => ButtonFeedback::Triple,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to a file
    Write {
        /// Destination path
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
