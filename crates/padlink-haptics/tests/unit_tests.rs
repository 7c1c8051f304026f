//! Unit tests for haptic synthesis

use padlink_haptics::prelude::*;
use padlink_protocol::{HapticCommand, decode_haptic, encode_haptic};

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn command(amplitude: f32, frequency: f32, duration_seconds: f32) -> HapticCommand {
    HapticCommand {
        left_controller: true,
        amplitude,
        frequency,
        duration_seconds,
    }
}

#[test]
fn test_pulsed_command_from_wire() -> TestResult {
    let wire = encode_haptic(&command(1.0, 5.0, 1.0));
    let wave = Synthesizer::default().synthesize(&decode_haptic(&wire)?);

    let timings = wave.timings();
    let amplitudes = wave.amplitudes();
    assert_eq!(timings.len(), 20);
    assert!(timings.iter().all(|&t| t == 100));
    for (i, amp) in amplitudes.iter().enumerate() {
        let expected = if i % 2 == 0 { 100 } else { 0 };
        assert_eq!(*amp, expected, "segment {i}");
    }
    Ok(())
}

#[test]
fn test_constant_command_from_wire() -> TestResult {
    let wire = encode_haptic(&command(0.5, 0.0, 0.1));
    let wave = Synthesizer::default().synthesize(&decode_haptic(&wire)?);

    assert!(wave.is_one_shot());
    assert_eq!(wave.total_duration_ms(), 200);
    let peak = i32::from(wave.peak_amplitude());
    assert!((peak - 50).abs() <= 1, "peak {peak}");
    Ok(())
}

#[test]
fn test_min_duration_pulse_is_audible() -> TestResult {
    // host asked for nothing; decoder floors to 5 ms, synth doubles to 10 ms
    let wave = Synthesizer::default().synthesize(&decode_haptic(&encode_haptic(&command(
        0.3, 0.0, 0.0,
    )))?);
    assert_eq!(wave, Waveform::OneShot(Segment::new(10, 30)));
    Ok(())
}

#[test]
fn test_custom_gain_and_ceiling() -> TestResult {
    let config = SynthConfig::default()
        .with_amplitude_gain(500.0)
        .with_max_amplitude(100);
    let synth = Synthesizer::new(config)?;
    assert_eq!(synth.device_amplitude(0.5), 100);
    assert_eq!(synth.device_amplitude(0.1), 50);
    Ok(())
}

#[test]
fn test_custom_duration_scale() -> TestResult {
    let synth = Synthesizer::new(SynthConfig::default().with_duration_scale_ms(1000.0))?;
    let wave = synth.synthesize(&command(1.0, 0.0, 0.25));
    assert_eq!(wave.total_duration_ms(), 250);
    Ok(())
}

#[test]
fn test_new_rejects_invalid_config() {
    let result = Synthesizer::new(SynthConfig::default().with_amplitude_gain(0.0));
    assert!(matches!(result, Err(HapticsError::InvalidConfig(_))));
}

#[test]
fn test_feedback_uses_max_amplitude() -> TestResult {
    let synth = Synthesizer::new(SynthConfig::default().with_max_amplitude(255))?;
    let wave = synth.feedback(ButtonFeedback::Tap);
    assert_eq!(wave.amplitudes(), vec![0, 255]);
    Ok(())
}

#[test]
fn test_recording_vibrator_through_trait_object() -> TestResult {
    let mut boxed: Box<dyn Vibrator> = Box::new(RecordingVibrator::new());
    let wave = Synthesizer::default().synthesize(&command(1.0, 10.0, 0.5));
    boxed.vibrate(&wave)?;
    boxed.cancel()?;

    let mut recorder = RecordingVibrator::new();
    recorder.vibrate(&wave)?;
    recorder.cancel()?;
    assert_eq!(recorder.played().len(), 1);
    assert_eq!(recorder.last(), Some(&wave));
    assert_eq!(recorder.cancels(), 1);
    Ok(())
}
