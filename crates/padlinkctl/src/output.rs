//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use padlink_client::ClientConfig;
use padlink_haptics::Waveform;
use padlink_protocol::{HapticCommand, PressState, TelemetryFrame};
use serde_json::{Value, json};

use crate::commands::stream::StreamSummary;
use crate::error::CliError;

fn print_json(value: &Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format {what} as JSON: {e}"),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print an encoded wire frame
pub fn print_encoded(kind: &str, wire: &str, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "kind": kind,
                "wire": wire
            }),
            "encoded frame",
        );
    } else {
        println!("{wire}");
    }
}

/// Print a decoded telemetry frame
pub fn print_telemetry(frame: &TelemetryFrame, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "telemetry": frame,
                "flags": frame.flags().bits(),
                "modes": frame.modes()
            }),
            "telemetry frame",
        );
        return;
    }

    let hand = if frame.left_controller { "left" } else { "right" };
    println!("{} ({} controller)", "Telemetry frame".bold(), hand.cyan());
    println!(
        "  Trigger: {}  Grip: {}  Stick click: {}",
        press(frame.trigger),
        press(frame.grip),
        press(frame.joystick_state)
    );
    println!(
        "  Buttons: system/menu={} a/x={} b/y={}",
        yes_no(frame.system_or_menu),
        yes_no(frame.button_a_or_x),
        yes_no(frame.button_b_or_y)
    );
    let plugged = if frame.battery_plugged {
        " (charging)"
    } else {
        ""
    };
    println!(
        "  Battery: {:.0}%{}",
        f64::from(frame.battery_percent) * 100.0,
        plugged
    );
    println!(
        "  Orientation: yaw={:.3} pitch={:.3} roll={:.3}",
        frame.orientation.yaw, frame.orientation.pitch, frame.orientation.roll
    );
    println!(
        "  Stick: x={:.5} y={:.5}{}",
        frame.joystick.x,
        frame.joystick.y,
        if frame.joystick_in_deadzone {
            " (deadzone)".dimmed().to_string()
        } else {
            String::new()
        }
    );
}

/// Print a decoded haptic command
pub fn print_haptic(command: &HapticCommand, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "haptic": command
            }),
            "haptic command",
        );
        return;
    }

    let hand = if command.left_controller {
        "left"
    } else {
        "right"
    };
    println!("{} ({} controller)", "Haptic command".bold(), hand.cyan());
    println!("  Amplitude: {:.3}", command.amplitude);
    println!("  Frequency: {:.2} Hz", command.frequency);
    println!("  Duration:  {:.3} s", command.duration_seconds);
}

/// Print a synthesized waveform
pub fn print_waveform(label: &str, waveform: &Waveform, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "source": label,
                "waveform": waveform,
                "timings": waveform.timings(),
                "amplitudes": waveform.amplitudes(),
                "total_duration_ms": waveform.total_duration_ms()
            }),
            "waveform",
        );
        return;
    }

    let kind = if waveform.is_one_shot() {
        "one-shot"
    } else {
        "pattern"
    };
    println!(
        "{} {} ({}, {} segments, {} ms, peak {})",
        "Waveform".bold(),
        label.cyan(),
        kind,
        waveform.segments().len(),
        waveform.total_duration_ms(),
        waveform.peak_amplitude()
    );
    for segment in waveform.segments() {
        let bar = if segment.amplitude == 0 {
            "off".dimmed().to_string()
        } else {
            "█".repeat(usize::from(segment.amplitude).div_ceil(10)).green().to_string()
        };
        println!(
            "  {:>6} ms  {:>3}  {}",
            segment.duration_ms, segment.amplitude, bar
        );
    }
}

/// Print the effective client configuration
pub fn print_config(config: &ClientConfig, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "config": config
            }),
            "configuration",
        );
        return;
    }

    println!("{}", "Client configuration:".bold());
    println!(
        "  Host: {}",
        config.host.as_deref().unwrap_or("(not set)")
    );
    println!("  Port: {}", config.port);
    println!(
        "  Hand: {}",
        if config.left_controller {
            "left"
        } else {
            "right"
        }
    );
    println!("  Connect timeout: {} ms", config.connect_timeout_ms);
    println!("  First packet delay: {} ms", config.first_packet_delay_ms);
    println!("  Queue capacity: {}", config.queue_capacity);
    println!("  TCP_NODELAY: {}", yes_no(config.tcp_nodelay));
    println!(
        "  Haptics: gain {} / max amplitude {} / duration scale {} ms",
        config.synth.amplitude_gain, config.synth.max_amplitude, config.synth.duration_scale_ms
    );
}

/// Print the end-of-session summary for `stream`
pub fn print_stream_summary(summary: &StreamSummary, json: bool) {
    if json {
        print_json(
            &json!({
                "success": summary.error.is_none(),
                "stream": summary
            }),
            "stream summary",
        );
        return;
    }

    let outcome = match &summary.error {
        None => summary.end.green(),
        Some(_) => summary.end.red(),
    };
    println!("{} {} ({})", "Session ended:".bold(), outcome, summary.address);
    println!("  Frames sent: {}", summary.frames_sent);
    println!("  Frames dropped: {}", summary.frames_dropped);
    println!("  Haptic commands played: {}", summary.haptics_played);
    println!("  Elapsed: {:.1} s", summary.elapsed_seconds);
    if !summary.statuses.is_empty() {
        println!("  Status trail: {}", summary.statuses.join(" → ").dimmed());
    }
    if let Some(error) = &summary.error {
        println!("  {} {}", "Error:".red(), error);
    }
}

/// Print success message
pub fn print_success(message: &str, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "message": message
            }),
            "success message",
        );
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

fn press(state: PressState) -> ColoredString {
    match state {
        PressState::Released => "released".dimmed(),
        PressState::Touched => "touched".yellow(),
        PressState::Pressed => "pressed".green(),
        PressState::Reserved => "reserved".red(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Get error type name for JSON output
fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::InvalidInput(_)) => "InvalidInput",
        Some(CliError::InvalidConfiguration(_)) => "InvalidConfiguration",
        Some(CliError::Connection(_)) => "Connection",
        Some(CliError::Decode(_)) => "Decode",
        Some(CliError::IoError(_)) => "Io",
        Some(CliError::JsonError(_)) => "Json",
        None => "Unknown",
    }
}
