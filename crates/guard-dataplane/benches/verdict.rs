//! Verdict Engine Benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;

use guard_dataplane::{EgressMonitor, EventRing, FrameView};
use guard_policy::{PolicyTable, FLAG_BLOCK};

// Ethernet + IPv4 + UDP, 10.0.0.5:4444 -> 8.8.8.8:53
const UDP_FRAME: [u8; 54] = [
    // Ethernet (14 bytes)
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // dst mac
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // src mac
    0x08, 0x00, // IPv4
    // IPv4 (20 bytes)
    0x45, 0x00, 0x00, 0x28, // ver, ihl, tos, len
    0x00, 0x00, 0x40, 0x00, // id, flags, frag
    0x40, 0x11, 0x00, 0x00, // ttl, proto (UDP), checksum
    0x0A, 0x00, 0x00, 0x05, // src ip: 10.0.0.5
    0x08, 0x08, 0x08, 0x08, // dst ip: 8.8.8.8
    // UDP (8 bytes) + padding
    0x11, 0x5C, 0x00, 0x35, // src port: 4444, dst port: 53
    0x00, 0x10, 0x00, 0x00, // len, checksum
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_parse");
    group.throughput(Throughput::Elements(1));
    group.bench_function("udp_frame", |b| {
        b.iter(|| FrameView::new(black_box(&UDP_FRAME)).parse())
    });
    group.finish();
}

fn bench_verdict(c: &mut Criterion) {
    let table = Arc::new(PolicyTable::new());
    table.upsert(u32::from_be_bytes([10, 0, 0, 5]), FLAG_BLOCK).unwrap();
    let events = Arc::new(EventRing::new());
    let monitor = EgressMonitor::new(table, Arc::clone(&events));

    let mut group = c.benchmark_group("verdict");
    group.throughput(Throughput::Elements(1));
    group.bench_function("blocked_source", |b| {
        b.iter(|| {
            let verdict = monitor.process(black_box(&UDP_FRAME));
            // Keep the ring from saturating mid-benchmark
            events.try_recv();
            verdict
        })
    });

    let miss_table = Arc::new(PolicyTable::new());
    let miss_events = Arc::new(EventRing::new());
    let miss_monitor = EgressMonitor::new(miss_table, Arc::clone(&miss_events));
    group.bench_function("table_miss", |b| {
        b.iter(|| {
            let verdict = miss_monitor.process(black_box(&UDP_FRAME));
            miss_events.try_recv();
            verdict
        })
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_verdict);
criterion_main!(benches);
