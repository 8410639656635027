use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, instrument, warn};

use crate::frame_pipeline::{
    color::ColorMatrix,
    common::{
        PersistenceError,
        error::{ExtractionError, Result},
    },
    encode::{FrameEncoder, ImageWriter, OutputFormat, OutputLayout, StandardImageWriter},
    scheduler::{
        timing::{PipelineTimings, Timer},
        types::{ExtractionConfig, Progress, RunSummary},
    },
    source::{FfmpegFrameSource, FrameSource, RawFrame},
    transfer,
};

/// Per-frame work: decode to linear, optionally correct, write the triple.
pub struct FrameProcessor<W: ImageWriter> {
    encoder: FrameEncoder<W>,
    correction: Option<ColorMatrix>,
}

impl<W: ImageWriter> FrameProcessor<W> {
    pub fn new(encoder: FrameEncoder<W>, correction: Option<ColorMatrix>) -> Self {
        Self { encoder, correction }
    }

    pub fn encoder(&self) -> &FrameEncoder<W> {
        &self.encoder
    }

    /// Returns the artifacts of this frame that failed to persist.
    pub fn process(&self, frame: &RawFrame) -> Vec<PersistenceError> {
        let mut linear = transfer::decode_frame(&frame.pixels);
        if let Some(matrix) = &self.correction {
            matrix.apply_in_place(&mut linear);
        }
        self.encoder.encode_and_persist(&linear, frame.index)
    }
}

/// Drives a [`FrameSource`] through stride filtering and batched parallel processing.
///
/// At most one batch of raw frames is resident at a time: a full batch is
/// handed to the worker pool and the scheduler waits for every unit before
/// reading further.
pub struct BatchScheduler<S: FrameSource, W: ImageWriter> {
    source: S,
    processor: FrameProcessor<W>,
    config: ExtractionConfig,
    pool: ThreadPool,
    progress: Option<Box<dyn FnMut(Progress)>>,
}

impl BatchScheduler<FfmpegFrameSource, StandardImageWriter> {
    /// Opens `video`, then recreates the output directories of `layout`.
    ///
    /// Nothing is touched on disk when the configuration is invalid or the
    /// video cannot be opened.
    pub fn open<P: AsRef<Path>>(
        video: P,
        layout: OutputLayout,
        config: ExtractionConfig,
    ) -> Result<Self> {
        config.validate()?;
        let source = FfmpegFrameSource::open(video)?;
        layout.prepare()?;
        let writer = StandardImageWriter::new(config.png_compression);
        Self::with_custom(source, writer, layout, config)
    }
}

impl<S: FrameSource, W: ImageWriter> BatchScheduler<S, W> {
    pub fn with_custom(
        source: S,
        writer: W,
        layout: OutputLayout,
        config: ExtractionConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("frame-worker-{i}"));
        if let Some(workers) = config.workers {
            builder = builder.num_threads(workers);
        }
        let pool = builder
            .build()
            .map_err(|e| ExtractionError::WorkerPoolError(e.to_string()))?;

        let correction = config.color_correction.then_some(ColorMatrix::REC2020_TO_REC709);
        let processor = FrameProcessor::new(FrameEncoder::new(writer, layout), correction);

        Ok(Self {
            source,
            processor,
            config,
            pool,
            progress: None,
        })
    }

    /// Registers a callback receiving every progress observation.
    pub fn on_progress(mut self, callback: impl FnMut(Progress) + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn layout(&self) -> &OutputLayout {
        self.processor.encoder().layout()
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Processes the whole source.
    ///
    /// Source and configuration errors abort the run. Failed writes do not:
    /// they are collected into [`RunSummary::failures`].
    #[instrument(skip(self), fields(step = self.config.step, batch_size = self.config.batch_size))]
    pub fn run(&mut self) -> Result<RunSummary> {
        let started = Instant::now();
        let mut timings = PipelineTimings::new();
        let step = self.config.step as u64;
        let batch_size = self.config.batch_size;

        let total = if self.config.precount {
            let timer = Timer::start("precount");
            let decoded = self.source.count_frames()?;
            timings.record(timer);
            let extractable = decoded.div_ceil(step);
            info!(decoded, extractable, "Pre-count complete");
            Some(extractable)
        } else {
            None
        };

        if total == Some(0) {
            warn!("Source holds no frames to extract");
        }

        // Smaller buffer when the whole video fits in less than one batch
        let capacity = total.map_or(batch_size, |t| (t as usize).clamp(1, batch_size));
        let mut buffer: Vec<RawFrame> = Vec::with_capacity(capacity);
        let mut summary = RunSummary::default();
        let mut position = 0u64;

        loop {
            if position % step == 0 {
                let Some(pixels) = self.source.read_frame()? else {
                    break;
                };
                buffer.push(RawFrame {
                    index: summary.accepted,
                    source_position: position,
                    pixels,
                });
                summary.accepted += 1;

                if summary.accepted % batch_size as u64 == 0 {
                    self.report_progress(Progress {
                        accepted: summary.accepted,
                        total,
                    });
                }
            } else if !self.source.skip_frame()? {
                break;
            }
            position += 1;

            if buffer.len() == batch_size {
                self.dispatch(&mut buffer, &mut summary, &mut timings);
            }
        }
        summary.decoded = position;

        if !buffer.is_empty() {
            debug!(frames = buffer.len(), "Draining partial batch");
            self.dispatch(&mut buffer, &mut summary, &mut timings);
        }

        summary.elapsed = started.elapsed();
        timings.log_summary();

        let layout = self.layout();
        info!(
            decoded = summary.decoded,
            batches = summary.batches,
            failures = summary.failures.len(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Finished processing {} frames",
            summary.accepted
        );
        for format in OutputFormat::ALL {
            info!("{} frames in: {}", format, layout.directory(format).display());
        }

        Ok(summary)
    }

    fn report_progress(&mut self, progress: Progress) {
        match progress.total {
            Some(total) if total > 0 => info!(
                "Accepted {}/{} frames ({:.1}%)",
                progress.accepted,
                total,
                progress.accepted as f64 / total as f64 * 100.0
            ),
            _ => info!("Accepted {} frames", progress.accepted),
        }
        if let Some(callback) = self.progress.as_mut() {
            callback(progress);
        }
    }

    /// Runs every buffered frame on the pool and waits for all of them.
    fn dispatch(
        &self,
        buffer: &mut Vec<RawFrame>,
        summary: &mut RunSummary,
        timings: &mut PipelineTimings,
    ) {
        let (first, first_position) = buffer
            .first()
            .map_or((0, 0), |f| (f.index, f.source_position));
        let frames = buffer.len();
        let _span = tracing::info_span!(
            "batch",
            number = summary.batches,
            first,
            first_position,
            frames
        )
        .entered();
        let timer = Timer::start("batch");

        let processor = &self.processor;
        let failures: Vec<PersistenceError> = self.pool.install(|| {
            buffer
                .par_drain(..)
                .flat_map_iter(|frame| processor.process(&frame))
                .collect()
        });

        timings.record(timer);
        summary.batches += 1;

        if failures.is_empty() {
            debug!("Batch complete");
        } else {
            warn!(failed = failures.len(), "Batch complete with write failures");
            summary.failures.extend(failures);
        }
    }
}
