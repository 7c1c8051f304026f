//! Haptic preview commands

use anyhow::Result;
use padlink_client::ClientConfig;
use padlink_haptics::{ButtonFeedback, Synthesizer};
use padlink_protocol::HapticCommand;

use crate::commands::{FeedbackKind, SynthArgs};
use crate::error::CliError;
use crate::output;

/// Render a haptic command into the waveform a device would play
pub fn synth(args: &SynthArgs, config: &ClientConfig, json: bool) -> Result<()> {
    let synth = Synthesizer::new(config.synth).map_err(CliError::from)?;
    let command = HapticCommand {
        left_controller: config.left_controller,
        amplitude: args.amplitude,
        frequency: args.frequency,
        duration_seconds: args.duration,
    };
    let label = format!(
        "{}@{}Hz/{}s",
        args.amplitude, args.frequency, args.duration
    );
    output::print_waveform(&label, &synth.synthesize(&command), json);
    Ok(())
}

/// Show one of the fixed button click patterns
pub fn feedback(kind: FeedbackKind, config: &ClientConfig, json: bool) -> Result<()> {
    let synth = Synthesizer::new(config.synth).map_err(CliError::from)?;
    let kind = ButtonFeedback::from(kind);
    let label = match kind {
        ButtonFeedback::Tap => "tap",
        ButtonFeedback::Double => "double",
        ButtonFeedback::Triple => "triple",
    };
    output::print_waveform(label, &synth.feedback(kind), json);
    Ok(())
}
