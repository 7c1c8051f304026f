//! Frame encode/decode commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use padlink_protocol::{HapticCommand, TelemetryFrame, decode_haptic, decode_telemetry, encode_haptic};
use tracing::debug;

use crate::commands::{DecodeCommands, EncodeCommands};
use crate::error::CliError;
use crate::output;

/// Execute an encode command
pub fn encode(cmd: &EncodeCommands, json: bool) -> Result<()> {
    match cmd {
        EncodeCommands::Telemetry { frame, file } => {
            let frame = read_frame(frame.as_deref(), file.as_deref())?;
            output::print_encoded("telemetry", &frame.encode(), json);
            Ok(())
        }
        EncodeCommands::Haptic {
            left,
            amplitude,
            frequency,
            duration,
        } => {
            let command = HapticCommand {
                left_controller: *left,
                amplitude: *amplitude,
                frequency: *frequency,
                duration_seconds: *duration,
            };
            output::print_encoded("haptic", &encode_haptic(&command), json);
            Ok(())
        }
    }
}

/// Execute a decode command
pub fn decode(cmd: &DecodeCommands, json: bool) -> Result<()> {
    match cmd {
        DecodeCommands::Telemetry { frame } => {
            let decoded = decode_telemetry(frame).map_err(CliError::from)?;
            output::print_telemetry(&decoded, json);
        }
        DecodeCommands::Haptic { frame } => {
            let decoded = decode_haptic(frame).map_err(CliError::from)?;
            output::print_haptic(&decoded, json);
        }
    }
    Ok(())
}

/// Parse a telemetry frame from inline JSON, a file, or fall back to an idle frame.
fn read_frame(inline: Option<&str>, file: Option<&Path>) -> Result<TelemetryFrame> {
    let text = match (inline, file) {
        (Some(text), _) => text.to_owned(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read frame file {}", path.display()))?,
        (None, None) => {
            debug!("No frame given, encoding an idle frame");
            return Ok(TelemetryFrame::default());
        }
    };

    let frame: TelemetryFrame = serde_json::from_str(&text)
        .map_err(|e| CliError::InvalidInput(format!("Invalid telemetry frame JSON: {e}")))?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use padlink_protocol::PressState;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_read_frame_defaults_to_idle() -> TestResult {
        let frame = read_frame(None, None)?;
        assert_eq!(frame, TelemetryFrame::default());
        assert_eq!(frame.encode(), "AAAAAAAAAAA=");
        Ok(())
    }

    #[test]
    fn test_read_frame_partial_json() -> TestResult {
        let frame = read_frame(Some(r#"{"trigger":"pressed","left_controller":true}"#), None)?;
        assert_eq!(frame.trigger, PressState::Pressed);
        assert!(frame.left_controller);
        assert_eq!(frame.grip, PressState::Released);
        Ok(())
    }

    #[test]
    fn test_read_frame_rejects_bad_json() {
        let err = read_frame(Some("{not json"), None);
        assert!(matches!(
            err.as_ref().map_err(|e| e.downcast_ref::<CliError>()),
            Err(Some(CliError::InvalidInput(_)))
        ));
    }
}
