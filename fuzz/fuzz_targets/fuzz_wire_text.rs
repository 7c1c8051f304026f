//! Fuzzes the base64 line decoders with arbitrary text.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_wire_text
#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = padlink_protocol::decode_telemetry(text);
        let _ = padlink_protocol::decode_haptic(text);
    }
});
