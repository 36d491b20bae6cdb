use criterion::{Criterion, criterion_group, criterion_main};
use linelog::fmt::ConsoleFormat;
use linelog::level::Level;
use linelog::output::{FileOutput, JsonOutput, LineSyncWriter, LogRecord, Output};
use linelog::RotatingFile;
use serde_json::json;
use std::hint::black_box;
use std::io;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn make_record() -> LogRecord {
    let mut record = LogRecord::new(Level::Info, "BENCH", "benchmark log message");
    record.fields = vec![
        ("worker".to_string(), json!(3)),
        ("path".to_string(), json!("/var/cache/pkg/archive.tar.zst")),
    ];
    record
}

fn bench_line_sync_write(c: &mut Criterion) {
    let writer = LineSyncWriter::new(io::sink());
    let line = b"07:08:09 INF BENCH benchmark log message worker=3\n";

    c.bench_function("LineSyncWriter::write full line", |b| {
        b.iter(|| writer.write(black_box(line)).expect("write failed"));
    });

    c.bench_function("LineSyncWriter::write partial", |b| {
        b.iter(|| writer.write(black_box(b"chunk")).expect("write failed"));
    });
}

fn bench_line_sync_contended(c: &mut Criterion) {
    let writer = Arc::new(LineSyncWriter::new(io::sink()));
    let line = b"07:08:09 INF BENCH contended line\n";

    c.bench_function("LineSyncWriter::write 4 threads x 100", |b| {
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..4 {
                    let writer = Arc::clone(&writer);
                    s.spawn(move || {
                        for _ in 0..100 {
                            writer.write(black_box(line)).expect("write failed");
                        }
                    });
                }
            });
        });
    });
}

fn bench_console_render(c: &mut Criterion) {
    let record = make_record();
    let colored = ConsoleFormat::new();
    let plain = ConsoleFormat::new().colors(false);

    c.bench_function("ConsoleFormat::render colored", |b| {
        b.iter(|| colored.render(black_box(&record)));
    });
    c.bench_function("ConsoleFormat::render plain", |b| {
        b.iter(|| plain.render(black_box(&record)));
    });
}

fn bench_json_output_write(c: &mut Criterion) {
    let output = JsonOutput::new(io::sink());
    let record = make_record();

    c.bench_function("JsonOutput::write", |b| {
        b.iter(|| output.write(black_box(&record)).expect("write failed"));
    });
}

fn bench_file_output_write(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let file = RotatingFile::new(tmp.path().join("bench.log"))
        .max_size(1024 * 1024)
        .max_backups(2)
        .compress(false);
    let output = FileOutput::from_file(file);
    let record = make_record();

    c.bench_function("FileOutput::write with rotation", |b| {
        b.iter(|| output.write(black_box(&record)).expect("write failed"));
    });

    output.flush().expect("flush failed");
}

criterion_group!(
    benches,
    bench_line_sync_write,
    bench_line_sync_contended,
    bench_console_render,
    bench_json_output_write,
    bench_file_output_write
);
criterion_main!(benches);
