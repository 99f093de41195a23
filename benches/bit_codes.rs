//! Decoding throughput of the bitstream primitives.
//!
//! Each benchmark decodes a run of values written back to back at a
//! non-zero bit offset, so every multi-byte read takes the shifted path.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dwg_bitstream::{
    crc8, read_bit_double, read_bit_long, read_bit_short, read_handle, read_modular_char,
    DwgStreamWriterBase, IDwgStreamWriter,
};
use std::hint::black_box;

const VALUES: usize = 1024;
const OFFSET: usize = 3;

/// Write `VALUES` values after `OFFSET` zero bits.
fn encode<F>(mut write: F) -> Vec<u8>
where
    F: FnMut(&mut DwgStreamWriterBase, usize),
{
    let mut w = DwgStreamWriterBase::new();
    for _ in 0..OFFSET {
        w.write_bit(false).unwrap();
    }
    for i in 0..VALUES {
        write(&mut w, i);
    }
    w.into_data()
}

fn bench_prefix_codes(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_codes");
    group.throughput(Throughput::Elements(VALUES as u64));

    let shorts = encode(|w, i| w.write_bit_short((i as i16).wrapping_mul(97)).unwrap());
    group.bench_function("bit_short", |b| {
        b.iter(|| {
            let mut cursor = OFFSET;
            for _ in 0..VALUES {
                black_box(read_bit_short(black_box(&shorts), &mut cursor).unwrap());
            }
        })
    });

    let longs = encode(|w, i| w.write_bit_long((i as i32).wrapping_mul(40_503)).unwrap());
    group.bench_function("bit_long", |b| {
        b.iter(|| {
            let mut cursor = OFFSET;
            for _ in 0..VALUES {
                black_box(read_bit_long(black_box(&longs), &mut cursor).unwrap());
            }
        })
    });

    let doubles = encode(|w, i| w.write_bit_double(i as f64 * 0.25).unwrap());
    group.bench_function("bit_double", |b| {
        b.iter(|| {
            let mut cursor = OFFSET;
            for _ in 0..VALUES {
                black_box(read_bit_double(black_box(&doubles), &mut cursor).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_variable_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("variable_length");
    group.throughput(Throughput::Elements(VALUES as u64));

    let modular = encode(|w, i| w.write_modular_char((i as u64) << 10).unwrap());
    group.bench_function("modular_char", |b| {
        b.iter(|| {
            let mut cursor = OFFSET;
            for _ in 0..VALUES {
                black_box(read_modular_char(black_box(&modular), &mut cursor).unwrap());
            }
        })
    });

    let handles = encode(|w, i| w.handle_reference_value(5, (i as u64) * 0x1_0001).unwrap());
    group.bench_function("handle", |b| {
        b.iter(|| {
            let mut cursor = OFFSET;
            for _ in 0..VALUES {
                black_box(read_handle(black_box(&handles), &mut cursor).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_crc8(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc8");
    for size in [64usize, 4 * 1024, 64 * 1024] {
        let data: Vec<u8> = (0..size).map(|i| (i * 31) as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| crc8(black_box(0xC0C1), black_box(data)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_prefix_codes, bench_variable_length, bench_crc8);
criterion_main!(benches);
