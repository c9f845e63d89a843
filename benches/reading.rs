use adif_stream::{DedupReader, Reader, ReaderOptions, Record, RecordReader};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn contact(i: usize) -> Record {
    let mut record = Record::new();
    record.set("call", format!("K{}ABC", i % 10));
    record.set("station_callsign", "W1AW");
    record.set("band", if i % 2 == 0 { "20m" } else { "40m" });
    record.set("freq", format!("14.{:06}", 74000 + i % 1000));
    record.set("mode", "FT8");
    record.set("qso_date", "20240102");
    record.set("time_on", format!("{:06}", i % 240000));
    record.set("rst_sent", "-10");
    record.set("app_bench_seq", i.to_string());
    record
}

fn log_of(size: usize) -> Vec<u8> {
    let mut out = b"Benchmark log\n<eoh>\n".to_vec();
    for i in 0..size {
        out.extend_from_slice(&contact(i).to_bytes());
        out.extend_from_slice(b"<eor>\n");
    }
    out
}

fn count(mut reader: impl RecordReader) -> usize {
    while let Ok(Some(record)) = reader.read_record() {
        black_box(record);
    }
    reader.record_count()
}

fn benchmark_read_chunk_sizes(c: &mut Criterion) {
    let input = log_of(500);
    let mut group = c.benchmark_group("read_chunk_size");
    group.throughput(Throughput::Bytes(input.len() as u64));

    for chunk_size in [64, 1024, 16 * 1024].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let options = ReaderOptions::new().with_chunk_size(chunk_size);
                    count(Reader::with_options(black_box(&input[..]), options))
                })
            },
        );
    }
    group.finish();
}

fn benchmark_read_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_records");

    for size in [10, 100, 1000].iter() {
        let input = log_of(*size);
        group.bench_with_input(BenchmarkId::new("plain", size), &input, |b, input| {
            b.iter(|| count(Reader::new(black_box(&input[..]))))
        });
        group.bench_with_input(BenchmarkId::new("dedup", size), &input, |b, input| {
            b.iter(|| count(DedupReader::new(Reader::new(black_box(&input[..])))))
        });
    }
    group.finish();
}

fn benchmark_record_output(c: &mut Criterion) {
    let record = contact(42);

    c.bench_function("to_bytes", |b| b.iter(|| black_box(&record).to_bytes()));
    c.bench_function("fingerprint", |b| {
        b.iter(|| black_box(&record).fingerprint())
    });
}

criterion_group!(
    benches,
    benchmark_read_chunk_sizes,
    benchmark_read_records,
    benchmark_record_output
);
criterion_main!(benches);
