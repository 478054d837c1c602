//! Integration benchmark for the scan pipeline.
//!
//! Benchmarks the full application loop using the same pattern as the
//! tests in app.rs - with a FakeScanner feeding advertisement events
//! through run_with_io - plus the registry upsert path on its own.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ble_scout::app::{Options, Scanner, run_with_io};
use ble_scout::{
    AdvertisementEvent, Backend, DeviceRegistry, MacAddress, ScanError, build_ad_buffer,
};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

const TEST_MAC: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

fn event(address: MacAddress, rssi: i16, data: Vec<u8>) -> AdvertisementEvent {
    AdvertisementEvent {
        address_type: 0,
        address,
        adv_type: 0,
        rssi,
        data,
    }
}

/// Events from `count` distinct devices, each carrying a name and
/// manufacturer data.
fn distinct_device_events(count: usize) -> Vec<AdvertisementEvent> {
    (0..count)
        .map(|i| {
            let address = MacAddress([0x02, 0x00, 0x00, 0x00, (i >> 8) as u8, i as u8]);
            let data = build_ad_buffer(Some("scout-bench"), Some((0x004C, &[0x02, 0x15])));
            event(address, -60, data)
        })
        .collect()
}

/// The same device over and over; everything after the first event is a
/// duplicate sighting the registry drops.
fn duplicate_device_events(count: usize) -> Vec<AdvertisementEvent> {
    let data = build_ad_buffer(Some("scout-bench"), None);
    (0..count)
        .map(|_| event(TEST_MAC, -60, data.clone()))
        .collect()
}

/// A fake scanner that yields pre-built events, like the one in app.rs tests.
struct FakeScanner {
    events: Vec<AdvertisementEvent>,
}

impl Scanner for FakeScanner {
    fn start_scan(
        &self,
        _backend: Backend,
    ) -> Pin<
        Box<dyn Future<Output = Result<mpsc::Receiver<AdvertisementEvent>, ScanError>> + Send + '_>,
    > {
        let events = self.events.clone();
        Box::pin(async move {
            let (tx, rx) = mpsc::channel::<AdvertisementEvent>(events.len().max(1));
            tokio::spawn(async move {
                for event in events {
                    let _ = tx.send(event).await;
                }
            });
            Ok(rx)
        })
    }
}

fn options() -> Options {
    Options {
        duration: Duration::from_secs(60),
        interval: Duration::from_secs(1),
        cycles: Some(1),
        retain: false,
        verbose: false,
        backend: Backend::default(),
    }
}

fn bench_registry_upsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_upsert");

    for count in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("distinct", count), &count, |b, &count| {
            let events = distinct_device_events(count);
            b.iter(|| {
                let mut registry = DeviceRegistry::new();
                for event in &events {
                    black_box(registry.upsert(event));
                }
                registry.len()
            });
        });

        group.bench_with_input(BenchmarkId::new("duplicates", count), &count, |b, &count| {
            let events = duplicate_device_events(count);
            b.iter(|| {
                let mut registry = DeviceRegistry::new();
                for event in &events {
                    black_box(registry.upsert(event));
                }
                registry.len()
            });
        });
    }

    group.finish();
}

fn bench_run_with_io(c: &mut Criterion) {
    let runtime = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("run_with_io");

    for count in [10usize, 100] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("distinct", count), &count, |b, &count| {
            let scanner = FakeScanner {
                events: distinct_device_events(count),
            };
            b.iter(|| {
                let mut out = Vec::<u8>::new();
                runtime
                    .block_on(run_with_io(options(), &scanner, &mut out))
                    .expect("run_with_io");
                out.len()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_registry_upsert, bench_run_with_io);
criterion_main!(benches);
