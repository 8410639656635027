use std::path::Path;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use log2linear::frame_pipeline::{
    ColorMatrix, FrameEncoder, FrameProcessor, ImageWriter, OutputLayout, PixelBuffer, RawFrame,
    encode::{quantize_png8, quantize_png16},
    transfer,
};

/// Discards everything, so only the in-memory work is measured.
struct NullWriter;

impl ImageWriter for NullWriter {
    fn write_exr(&self, image: &PixelBuffer<f32>, _path: &Path) -> anyhow::Result<()> {
        black_box(image);
        Ok(())
    }

    fn write_png16(&self, image: PixelBuffer<u16>, _path: &Path) -> anyhow::Result<()> {
        black_box(image);
        Ok(())
    }

    fn write_png8(&self, image: PixelBuffer<u8>, _path: &Path) -> anyhow::Result<()> {
        black_box(image);
        Ok(())
    }
}

fn generate_log_frame(width: usize, height: usize) -> PixelBuffer<u16> {
    let mut frame = PixelBuffer::filled(width, height, 0u16);
    for (i, sample) in frame.data.iter_mut().enumerate() {
        *sample = ((i * 37) % 65536) as u16;
    }
    frame
}

fn benchmark_decode_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_size");

    let sizes = vec![
        (640, 360, "360p"),
        (1920, 1080, "1080p"),
        (3840, 2160, "2160p"),
    ];

    for (width, height, label) in sizes {
        let frame = generate_log_frame(width, height);
        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, frame| {
            b.iter(|| transfer::decode_frame(black_box(frame)));
        });
    }

    group.finish();
}

fn benchmark_quantization(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantization");
    let linear = transfer::decode_frame(&generate_log_frame(1920, 1080));

    group.bench_function("png16", |b| b.iter(|| quantize_png16(black_box(&linear))));
    group.bench_function("png8", |b| b.iter(|| quantize_png8(black_box(&linear))));
    group.bench_function("color_correction", |b| {
        b.iter(|| ColorMatrix::REC2020_TO_REC709.apply(black_box(&linear)))
    });

    group.finish();
}

fn benchmark_frame_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_processing");
    let frame = RawFrame {
        index: 0,
        source_position: 0,
        pixels: generate_log_frame(1920, 1080),
    };

    let corrections = [
        (None, "plain"),
        (Some(ColorMatrix::REC2020_TO_REC709), "corrected"),
    ];
    for (correction, label) in corrections {
        let processor = FrameProcessor::new(
            FrameEncoder::new(NullWriter, OutputLayout::under("/dev/null")),
            correction,
        );
        group.bench_function(label, |b| b.iter(|| processor.process(black_box(&frame))));
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decode_sizes,
    benchmark_quantization,
    benchmark_frame_processing
);
criterion_main!(benches);
