//! Live streaming against a host
//!
//! Plays the controller side of a session: sends a synthetic telemetry frame
//! every tick and renders incoming haptic commands through a vibrator that
//! only logs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;
use padlink_client::{
    ChannelSink, ClientConfig, ClientError, ClientEvent, HapticDispatcher, SessionEnd, TcpClient,
};
use padlink_haptics::{Synthesizer, Vibrator, VibratorError, Waveform};
use padlink_protocol::{Orientation, PressState, Stick, TelemetryFrame};
use serde::Serialize;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::commands::StreamArgs;
use crate::error::CliError;
use crate::output;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// What happened during a `stream` session.
#[derive(Debug, Serialize)]
pub struct StreamSummary {
    pub address: String,
    pub end: String,
    pub frames_sent: u64,
    pub frames_dropped: u64,
    pub haptics_played: usize,
    pub elapsed_seconds: f64,
    pub statuses: Vec<String>,
    pub error: Option<String>,
}

/// Execute the stream command
pub async fn execute(args: &StreamArgs, config: ClientConfig, json: bool) -> Result<()> {
    let config = apply_overrides(config, args)?;
    if args.interval_ms == 0 {
        return Err(CliError::InvalidInput("--interval-ms must be greater than 0".to_string()).into());
    }

    let (sink, events) = ChannelSink::new(EVENT_CHANNEL_CAPACITY);
    let client =
        TcpClient::new(config.clone(), Arc::new(sink.status_only())).map_err(CliError::from)?;
    let synth = Synthesizer::new(config.synth).map_err(CliError::from)?;
    let mut dispatcher = HapticDispatcher::new(
        Arc::clone(client.mailbox()),
        synth,
        LoggingVibrator::default(),
        config.left_controller,
    );

    info!(
        "Streaming to {} every {} ms",
        config.address(),
        args.interval_ms
    );
    let session = tokio::task::spawn_blocking({
        let client = client.clone();
        move || client.run()
    });

    let started = Instant::now();
    let controller = SyntheticController::new(config.left_controller);
    let mut ticker = interval(Duration::from_millis(args.interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let deadline = args.duration.map(Duration::from_secs);
    let until_deadline = async move {
        match deadline {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(until_deadline);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut statuses = Vec::new();
    let mut frames_sent = 0u64;
    let mut frames_dropped = 0u64;
    let mut haptics_played = 0usize;

    loop {
        tokio::select! {
            () = &mut until_deadline => {
                info!("Stream duration elapsed");
                break;
            }
            signal = &mut ctrl_c => {
                if let Err(e) = signal {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                }
                info!("Interrupted, stopping");
                break;
            }
            _ = ticker.tick() => {
                collect_statuses(&events, &mut statuses);
                if session.is_finished() {
                    debug!("Session ended on its own");
                    break;
                }

                let frame = controller.frame_at(started.elapsed());
                match client.send_telemetry(&frame) {
                    Ok(true) => frames_sent = frames_sent.saturating_add(1),
                    Ok(false) => {}
                    Err(ClientError::QueueFull { .. }) => {
                        frames_dropped = frames_dropped.saturating_add(1);
                    }
                    Err(e) => debug!("Telemetry not sent: {}", e),
                }
                haptics_played = haptics_played.saturating_add(dispatcher.dispatch_pending());
            }
        }
    }

    let stopper = client.clone();
    tokio::task::spawn_blocking(move || stopper.stop())
        .await
        .context("stop task panicked")?;
    let end = session.await.context("session task panicked")?;
    collect_statuses(&events, &mut statuses);

    let error = end.error().map(ToString::to_string);
    let summary = StreamSummary {
        address: config.address(),
        end: end_name(&end).to_owned(),
        frames_sent,
        frames_dropped,
        haptics_played,
        elapsed_seconds: started.elapsed().as_secs_f64(),
        statuses,
        error: error.clone(),
    };

    match error {
        Some(reason) if json => Err(CliError::Connection(reason).into()),
        Some(reason) => {
            output::print_stream_summary(&summary, false);
            Err(CliError::Connection(reason).into())
        }
        None => {
            output::print_stream_summary(&summary, json);
            Ok(())
        }
    }
}

/// Layer command-line flags over the loaded configuration.
fn apply_overrides(mut config: ClientConfig, args: &StreamArgs) -> Result<ClientConfig, CliError> {
    if let Some(host) = &args.host {
        config.host = Some(host.clone());
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.left {
        config.left_controller = true;
    }
    if config.host.is_none() {
        return Err(CliError::InvalidInput(
            "No host given (use --host or PADLINK_HOST)".to_string(),
        ));
    }
    config.validate()?;
    Ok(config)
}

fn collect_statuses(events: &Receiver<ClientEvent>, statuses: &mut Vec<String>) {
    for event in events.try_iter() {
        if let ClientEvent::Status(status) = event {
            if status.is_failure() {
                warn!("Client reported {}", status);
            } else {
                info!("Client {}", status);
            }
            statuses.push(status.to_string());
        }
    }
}

fn end_name(end: &SessionEnd) -> &'static str {
    match end {
        SessionEnd::Stopped => "stopped",
        SessionEnd::PeerClosed => "peer_closed",
        SessionEnd::Failed(_) => "failed",
    }
}

/// Vibrator that writes every waveform to the log.
#[derive(Debug, Default)]
struct LoggingVibrator {
    played: usize,
}

impl Vibrator for LoggingVibrator {
    fn vibrate(&mut self, waveform: &Waveform) -> Result<(), VibratorError> {
        self.played = self.played.saturating_add(1);
        info!(
            segments = waveform.segments().len(),
            total_ms = waveform.total_duration_ms(),
            peak = waveform.peak_amplitude(),
            "vibrate #{}",
            self.played
        );
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), VibratorError> {
        debug!("vibration cancelled");
        Ok(())
    }
}

/// Deterministic controller motion driven by elapsed time.
///
/// The controller sweeps its heading, circles the stick and cycles the
/// trigger through released, touched and pressed once a second.
#[derive(Debug, Clone, Copy)]
struct SyntheticController {
    left_controller: bool,
}

impl SyntheticController {
    const YAW_DEG_PER_S: f32 = 30.0;
    const STICK_DEG_PER_S: f32 = 90.0;
    const STICK_STRENGTH_PCT: f32 = 60.0;
    const BATTERY: f32 = 0.8;

    fn new(left_controller: bool) -> Self {
        Self { left_controller }
    }

    fn frame_at(&self, elapsed: Duration) -> TelemetryFrame {
        let t = elapsed.as_secs_f32();
        let yaw = (t * Self::YAW_DEG_PER_S) % 360.0;
        let joystick = Stick::from_polar(
            (t * Self::STICK_DEG_PER_S) % 360.0,
            Self::STICK_STRENGTH_PCT,
        );
        let trigger = match elapsed.as_millis() % 3000 {
            0..1000 => PressState::Released,
            1000..2000 => PressState::Touched,
            _ => PressState::Pressed,
        };

        TelemetryFrame {
            left_controller: self.left_controller,
            trigger,
            battery_percent: Self::BATTERY,
            orientation: Orientation::new(yaw, 10.0 * (t * 0.5).sin(), 0.0),
            joystick_in_deadzone: joystick.in_default_deadzone(),
            joystick,
            ..TelemetryFrame::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn args(host: Option<&str>) -> StreamArgs {
        StreamArgs {
            host: host.map(str::to_owned),
            port: Some(9000),
            left: true,
            interval_ms: 11,
            duration: Some(1),
        }
    }

    #[test]
    fn test_overrides_take_precedence() -> TestResult {
        let base = ClientConfig::builder().host("10.0.0.1").build()?;
        let config = apply_overrides(base, &args(Some("10.0.0.2")))?;
        assert_eq!(config.address(), "10.0.0.2:9000");
        assert!(config.left_controller);
        Ok(())
    }

    #[test]
    fn test_missing_host_is_rejected() {
        let result = apply_overrides(ClientConfig::default(), &args(None));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_synthetic_frames_cycle_trigger() {
        let controller = SyntheticController::new(true);
        let released = controller.frame_at(Duration::from_millis(500));
        let touched = controller.frame_at(Duration::from_millis(1500));
        let pressed = controller.frame_at(Duration::from_millis(2500));
        assert_eq!(released.trigger, PressState::Released);
        assert_eq!(touched.trigger, PressState::Touched);
        assert_eq!(pressed.trigger, PressState::Pressed);
        assert!(released.left_controller);
        assert!(!released.joystick_in_deadzone);
    }

    #[test]
    fn test_logging_vibrator_counts() -> TestResult {
        let mut vibrator = LoggingVibrator::default();
        vibrator.vibrate(&Waveform::OneShot(padlink_haptics::Segment::new(10, 50)))?;
        vibrator.cancel()?;
        assert_eq!(vibrator.played, 1);
        Ok(())
    }
}
