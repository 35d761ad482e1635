//! Benchmark suite for MakoCode encoding and decoding.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use makocode_benches::{random_payload, repetitive_payload, sizes, text_payload};
use makocode_types::page::{PageSet, Settings};
use makocode_types::palette::ColorChannels;
use std::hint::black_box;

const PALETTES: [(&str, ColorChannels); 3] = [
	("gray", ColorChannels::Gray),
	("cmyw", ColorChannels::Cmyw),
	("8color", ColorChannels::EightColor),
];

fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("encode");
	let payload = random_payload(sizes::MEDIUM, 0);
	group.throughput(Throughput::Bytes(payload.len() as u64));

	for (name, channels) in PALETTES {
		let settings = Settings::new(channels, 700, 700);
		group.bench_with_input(BenchmarkId::new("random", name), &payload, |b, payload| {
			b.iter(|| {
				let pages = PageSet::encode(black_box(payload), &settings);
				black_box(pages)
			});
		});
	}

	group.finish();
}

fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode");
	let payload = random_payload(sizes::MEDIUM, 0);
	group.throughput(Throughput::Bytes(payload.len() as u64));

	for (name, channels) in PALETTES {
		let settings = Settings::new(channels, 700, 700);
		let pages = PageSet::encode(&payload, &settings).expect("encode failed");
		group.bench_with_input(BenchmarkId::new("random", name), &pages, |b, pages| {
			b.iter(|| {
				let payload = black_box(pages).decode();
				black_box(payload)
			});
		});
	}

	group.finish();
}

fn bench_compression_regimes(c: &mut Criterion) {
	let mut group = c.benchmark_group("lzw_regimes");
	let settings = Settings::new(ColorChannels::Gray, 700, 700);

	let payloads = [
		("repetitive", repetitive_payload(sizes::MEDIUM)),
		("text", text_payload(sizes::MEDIUM, 0)),
		("random", random_payload(sizes::MEDIUM, 0)),
	];

	for (name, payload) in payloads {
		group.throughput(Throughput::Bytes(payload.len() as u64));
		group.bench_with_input(BenchmarkId::new("roundtrip", name), &payload, |b, payload| {
			b.iter(|| {
				let pages = PageSet::encode(black_box(payload), &settings).expect("encode failed");
				let decoded = pages.decode();
				black_box(decoded)
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_compression_regimes);
criterion_main!(benches);
