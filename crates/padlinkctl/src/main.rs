//! padlinkctl - padlink controller link CLI
//!
//! Streams synthetic controller telemetry to a host, and encodes, decodes and
//! previews the frames that travel over the link.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::*;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "padlinkctl")]
#[command(about = "padlink controller link CLI - stream, encode and inspect controller traffic")]
#[command(version)]
#[command(long_about = "
padlinkctl talks the padlink controller protocol. It can act as a controller
streaming synthetic telemetry to a host, and it can encode, decode and preview
the telemetry and haptic frames exchanged on the link.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Client configuration file (JSON)
    #[arg(long, global = true, env = "PADLINK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to a host and stream synthetic telemetry
    Stream(StreamArgs),

    /// Encode a telemetry frame or haptic command to its wire form
    #[command(subcommand)]
    Encode(EncodeCommands),

    /// Decode a wire frame
    #[command(subcommand)]
    Decode(DecodeCommands),

    /// Preview the vibration waveform for a haptic command
    Synth(SynthArgs),

    /// Preview a local button feedback pattern
    Feedback {
        /// Pattern
        #[arg(value_enum)]
        kind: FeedbackKind,
    },

    /// Configuration file commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("padlinkctl={log_level},padlink_client={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let result = execute_command(&cli).await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = match e.downcast_ref::<CliError>() {
                Some(CliError::InvalidConfiguration(_)) => 3,
                Some(CliError::InvalidInput(_))
                | Some(CliError::Decode(_))
                | Some(CliError::JsonError(_)) => 4,
                Some(CliError::Connection(_)) => 5,
                _ => 1,
            };

            std::process::exit(exit_code);
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    let config = settings::load(cli.config.as_deref())?;
    match &cli.command {
        Commands::Stream(args) => commands::stream::execute(args, config, cli.json).await,
        Commands::Encode(cmd) => commands::codec::encode(cmd, cli.json),
        Commands::Decode(cmd) => commands::codec::decode(cmd, cli.json),
        Commands::Synth(args) => commands::synth::synth(args, &config, cli.json),
        Commands::Feedback { kind } => commands::synth::feedback(*kind, &config, cli.json),
        Commands::Config(cmd) => commands::config::execute(cmd, &config, cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_stream_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["padlinkctl", "stream", "--host", "10.0.0.5"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Stream(args) => {
                assert_eq!(args.host.as_deref(), Some("10.0.0.5"));
                assert!(args.port.is_none());
                assert!(args.duration.is_none());
                assert_eq!(args.interval_ms, padlink_protocol::UPDATE_INTERVAL_MS);
            }
            _ => return Err("expected stream".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["padlinkctl", "decode", "haptic", "AAAA", "--json", "-vv"])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Decode(DecodeCommands::Haptic { .. })
        ));
        Ok(())
    }

    #[test]
    fn parse_feedback_kind() -> TestResult {
        let cli = Cli::try_parse_from(["padlinkctl", "feedback", "triple"])?;
        assert!(matches!(
            cli.command,
            Commands::Feedback {
                kind: FeedbackKind::Triple
            }
        ));
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_subcommand() -> TestResult {
        let Err(err) = Cli::try_parse_from(["padlinkctl", "launch"]) else {
            return Err("unknown subcommand was accepted".into());
        };
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
        Ok(())
    }
}
