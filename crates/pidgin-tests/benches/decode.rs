use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pidgin_decoder::PidginDecoder;
use pidgin_encoder::{MemoryContentStore, PidginEncoder};
use pidgin_tests::{bulk_prompt, full_prompt, text_of_len};
use pidgin_types::{ContentStore, Part};
use pidgin_wire::tokenize;

fn bench_decode_plain(c: &mut Criterion) {
    let store = MemoryContentStore::new();
    let text = text_of_len(10_000);

    c.bench_function("decode_plain", |b| {
        b.iter(|| PidginDecoder::decode(&text, &store).unwrap());
    });
}

fn bench_decode_full_prompt(c: &mut Criterion) {
    let store = MemoryContentStore::new();
    let encoded = PidginEncoder::new(&store).encode(&full_prompt()).unwrap();

    c.bench_function("decode_full_prompt", |b| {
        b.iter(|| PidginDecoder::decode(&encoded.text, &store).unwrap());
    });
}

fn bench_decode_file_tags(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_file_tags");

    for tags in [10, 100, 1_000] {
        let store = MemoryContentStore::new();
        let text: String = (0..tags)
            .map(|i| {
                let handle = store
                    .add_part(&Part::inline_data("image/png", format!("img{i}")))
                    .unwrap();
                format!("Figure {i}: <file src=\"{handle}\" />\n")
            })
            .collect();
        group.throughput(Throughput::Elements(tags as u64));

        group.bench_with_input(BenchmarkId::from_parameter(tags), &text, |b, text| {
            b.iter(|| PidginDecoder::decode(text, &store).unwrap());
        });
    }

    group.finish();
}

fn bench_decode_bulk(c: &mut Criterion) {
    let store = MemoryContentStore::new();
    let encoded = PidginEncoder::new(&store).encode(&bulk_prompt(100)).unwrap();

    c.bench_function("decode_bulk_100", |b| {
        b.iter(|| PidginDecoder::decode(&encoded.text, &store).unwrap());
    });
}

fn bench_scan_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_unterminated");

    for repeats in [1_000, 10_000] {
        let text = "<a href=\"x\">".repeat(repeats);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(repeats), &text, |b, text| {
            b.iter(|| tokenize(text).count());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_plain,
    bench_decode_full_prompt,
    bench_decode_file_tags,
    bench_decode_bulk,
    bench_scan_pathological,
);
criterion_main!(benches);
