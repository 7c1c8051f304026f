//! Fuzzes haptic decoding and waveform synthesis together.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_haptic_decode
#![no_main]
use libfuzzer_sys::fuzz_target;
use padlink_haptics::Synthesizer;
use padlink_protocol::decode_haptic_bytes;

fuzz_target!(|data: &[u8]| {
    // Hostile amplitude/frequency/duration values must still synthesize a bounded waveform.
    if let Ok(command) = decode_haptic_bytes(data) {
        let synth = Synthesizer::default();
        let waveform = synth.synthesize(&command);
        assert!(waveform.total_duration_ms() <= synth.config().max_duration_ms);
    }
});
