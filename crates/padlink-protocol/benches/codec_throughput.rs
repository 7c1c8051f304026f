//! Codec throughput benchmarks
//!
//! The controller encodes one frame per ~11 ms tick; these keep an eye on the
//! per-frame cost of the full encode/decode path.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use padlink_protocol::prelude::*;
use padlink_protocol::{decode_telemetry_bytes, encode_telemetry_bytes};

fn sample_frame() -> TelemetryFrame {
    TelemetryFrame {
        left_controller: true,
        trigger: PressState::Pressed,
        battery_percent: 0.64,
        orientation: Orientation::new(173.204, -12.5, 45.125),
        joystick: Stick::new(0.70711, -0.70711),
        ..TelemetryFrame::default()
    }
}

fn bench_telemetry_encode(c: &mut Criterion) {
    let frame = sample_frame();

    c.bench_function("telemetry_encode", |b| {
        b.iter(|| {
            black_box(encode_telemetry(black_box(&frame)));
        })
    });
}

fn bench_telemetry_encode_bytes(c: &mut Criterion) {
    let frame = sample_frame();
    let mut buf = Vec::with_capacity(64);

    c.bench_function("telemetry_encode_bytes", |b| {
        b.iter(|| {
            buf.clear();
            encode_telemetry_bytes(black_box(&frame), &mut buf);
            black_box(buf.len());
        })
    });
}

fn bench_telemetry_decode(c: &mut Criterion) {
    let wire = encode_telemetry(&sample_frame());

    c.bench_function("telemetry_decode", |b| {
        b.iter(|| {
            let _decoded = black_box(decode_telemetry(black_box(&wire)));
        })
    });
}

fn bench_telemetry_decode_bytes(c: &mut Criterion) {
    let mut raw = Vec::new();
    encode_telemetry_bytes(&sample_frame(), &mut raw);

    c.bench_function("telemetry_decode_bytes", |b| {
        b.iter(|| {
            let _decoded = black_box(decode_telemetry_bytes(black_box(&raw)));
        })
    });
}

fn bench_haptic_decode(c: &mut Criterion) {
    let wire = encode_haptic(&HapticCommand {
        left_controller: true,
        amplitude: 0.8,
        frequency: 120.0,
        duration_seconds: 0.25,
    });

    c.bench_function("haptic_decode", |b| {
        b.iter(|| {
            let _decoded = black_box(decode_haptic(black_box(&wire)));
        })
    });
}

criterion_group!(
    benches,
    bench_telemetry_encode,
    bench_telemetry_encode_bytes,
    bench_telemetry_decode,
    bench_telemetry_decode_bytes,
    bench_haptic_decode
);
criterion_main!(benches);
