use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log2linear::frame_pipeline::scheduler::{DEFAULT_BATCH_SIZE, DEFAULT_STEP};
use log2linear::frame_pipeline::{
    BatchScheduler, ExtractionConfig, OutputLayout, PngCompression, RunSummary,
};
use log2linear::logger;

use tracing::{error, info, warn};

/// Exit status of a run that finished but could not write every artifact.
const EXIT_PARTIAL: u8 = 2;

/// Decode an Apple Log video into linear EXR, 16-bit PNG and 8-bit PNG stills.
#[derive(Parser, Debug)]
#[command(name = "log2linear", version)]
struct Cli {
    /// Base directory; output folders are created under <BASE>/tmp/
    #[arg(long, alias = "base_directory")]
    base_directory: PathBuf,

    /// Video file, relative to the base directory
    #[arg(long, alias = "mov_file")]
    mov_file: PathBuf,

    /// Keep every Nth decoded frame
    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: usize,

    /// Frames processed in parallel between synchronization points
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Convert from Rec.2020 to Rec.709 primaries after decoding
    #[arg(long)]
    color_correct: bool,

    /// Worker threads (default: one per logical CPU)
    #[arg(long)]
    workers: Option<usize>,

    /// Skip counting frames before processing (no progress totals)
    #[arg(long)]
    skip_precount: bool,

    /// PNG compression effort
    #[arg(long, value_enum, default_value_t = PngCompression::Fast)]
    png_compression: PngCompression,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let config = ExtractionConfig::builder()
        .step(cli.step)
        .batch_size(cli.batch_size)
        .color_correction(cli.color_correct)
        .workers(cli.workers)
        .precount(!cli.skip_precount)
        .png_compression(cli.png_compression)
        .build();

    let video = cli.base_directory.join(&cli.mov_file);
    let layout = OutputLayout::under(&cli.base_directory);

    let mut scheduler = BatchScheduler::open(&video, layout, config)
        .with_context(|| format!("cannot process {}", video.display()))?;

    info!("Video: {}", video.display());
    info!("Step: {}, batch size: {}", scheduler.config().step, scheduler.config().batch_size);
    info!("Workers: {}", scheduler.workers());
    info!(
        "Color correction: {}",
        if scheduler.config().color_correction {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(scheduler.run()?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    info!("Starting log2linear...");

    match run(cli) {
        Ok(summary) if summary.is_complete() => ExitCode::SUCCESS,
        Ok(summary) => {
            for failure in &summary.failures {
                warn!("{}", failure);
            }
            error!(
                "{} of {} artifacts could not be written",
                summary.failures.len(),
                summary.accepted * 3
            );
            ExitCode::from(EXIT_PARTIAL)
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
