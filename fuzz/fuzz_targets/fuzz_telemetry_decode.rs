//! Fuzzes the raw telemetry frame decoder.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_telemetry_decode
#![no_main]
use libfuzzer_sys::fuzz_target;
use padlink_protocol::{decode_telemetry_bytes, encode_telemetry_bytes};

fuzz_target!(|data: &[u8]| {
    // Any accepted frame must re-encode without panicking.
    if let Ok(frame) = decode_telemetry_bytes(data) {
        let mut out = Vec::new();
        encode_telemetry_bytes(&frame, &mut out);
    }
});
