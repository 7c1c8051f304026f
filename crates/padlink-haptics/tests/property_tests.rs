//! Property tests for haptic synthesis

use proptest::prelude::*;

use padlink_haptics::prelude::*;
use padlink_protocol::HapticCommand;

proptest! {
    #[test]
    fn prop_amplitude_bounded(amplitude in -10.0f32..10.0) {
        let amp = Synthesizer::default().device_amplitude(amplitude);
        prop_assert!((1..=100).contains(&amp));
    }

    #[test]
    fn prop_pattern_alternates_on_off(
        amplitude in 0.0f32..=1.0,
        frequency in 0.5f32..200.0,
        duration_seconds in 0.0f32..5.0,
    ) {
        let synth = Synthesizer::default();
        let cmd = HapticCommand { left_controller: false, amplitude, frequency, duration_seconds };
        let wave = synth.synthesize(&cmd);
        let total = synth.device_duration_ms(duration_seconds);

        match &wave {
            Waveform::Pattern(segments) => {
                prop_assert!(segments.len() % 2 == 0);
                for pair in segments.chunks(2) {
                    if let [on, off] = pair {
                        prop_assert!(on.amplitude >= 1);
                        prop_assert_eq!(off.amplitude, 0);
                        prop_assert_eq!(on.duration_ms, off.duration_ms);
                        prop_assert!(on.duration_ms > 0);
                    }
                }
                prop_assert!(wave.total_duration_ms() <= total);
            }
            Waveform::OneShot(segment) => {
                prop_assert_eq!(segment.duration_ms, total);
            }
        }
    }

    #[test]
    fn prop_zero_frequency_is_one_shot(
        amplitude in 0.0f32..=1.0,
        duration_seconds in 0.0f32..5.0,
    ) {
        let cmd = HapticCommand { left_controller: true, amplitude, frequency: 0.0, duration_seconds };
        prop_assert!(Synthesizer::default().synthesize(&cmd).is_one_shot());
    }

    #[test]
    fn prop_duration_capped(duration_seconds in 0.0f32..1.0e6) {
        let synth = Synthesizer::default();
        prop_assert!(synth.device_duration_ms(duration_seconds) <= synth.config().max_duration_ms);
    }
}
