use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use tiltshift_core::effect::frame_effect::FrameEffect;
use tiltshift_core::effect::tilt_shift::TiltShift;
use tiltshift_core::io::domain::frame_reader::FrameReader;
use tiltshift_core::io::domain::frame_writer::FrameWriter;
use tiltshift_core::io::domain::image_writer::ImageWriter;
use tiltshift_core::io::infrastructure::image_file_reader::ImageFileReader;
use tiltshift_core::io::infrastructure::image_file_writer::ImageFileWriter;
use tiltshift_core::io::infrastructure::image_sequence_reader::ImageSequenceReader;
use tiltshift_core::io::infrastructure::image_sequence_writer::ImageSequenceWriter;
use tiltshift_core::io::infrastructure::resizing_reader::ResizingReader;
use tiltshift_core::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
use tiltshift_core::pipeline::tilt_shift_image_use_case::TiltShiftImageUseCase;
use tiltshift_core::pipeline::tilt_shift_sequence_use_case::TiltShiftSequenceUseCase;
use tiltshift_core::shared::constants::{DEFAULT_DOF, MIN_DOF};

/// Tilt-shift miniature effect for images and image sequences.
#[derive(Parser)]
#[command(name = "tiltshift")]
struct Cli {
    /// Input image file, or directory of frames.
    input: PathBuf,

    /// Output image file, or directory for processed frames.
    output: PathBuf,

    /// Row of sharpest focus, in pixels from the top.
    #[arg(long)]
    focus_row: usize,

    /// Depth of field: rows kept sharp on each side of the focus row.
    #[arg(long, default_value_t = DEFAULT_DOF)]
    dof: usize,

    /// Skip the saturation/brightness boost.
    #[arg(long)]
    no_enhance: bool,

    /// Resize input frames to this width before processing.
    #[arg(long)]
    resize_width: Option<u32>,

    /// Worker threads (0 = number of CPU cores).
    #[arg(long, default_value = "0")]
    jobs: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let effect = TiltShift::new(cli.dof, !cli.no_enhance).with_focus(cli.focus_row);

    if cli.input.is_dir() {
        run_sequence(&cli, effect)
    } else {
        run_image(&cli, effect)
    }
}

fn run_image(
    cli: &Cli,
    effect: impl FrameEffect + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = wrap_resizing(Box::new(ImageFileReader::new()), cli.resize_width)?;
    let image_writer: Box<dyn ImageWriter> = Box::new(ImageFileWriter::new());

    let mut use_case = TiltShiftImageUseCase::new(reader, image_writer, Box::new(effect));
    use_case.execute(&cli.input, &cli.output)?;
    log::info!("Output written to {}", cli.output.display());
    Ok(())
}

fn run_sequence(
    cli: &Cli,
    effect: impl FrameEffect + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = wrap_resizing(Box::new(ImageSequenceReader::new()), cli.resize_width)?;
    let metadata = reader.open(&cli.input)?;
    let writer: Box<dyn FrameWriter> = Box::new(ImageSequenceWriter::new());

    let total = metadata.total_frames;
    let progress: Box<dyn Fn(usize, usize) -> bool + Send> = Box::new(move |current, _| {
        eprint!("\rProcessing frame {current}/{total}");
        true
    });

    let mut use_case = TiltShiftSequenceUseCase::new(
        reader,
        writer,
        Arc::new(effect),
        Box::new(ThreadedPipelineExecutor::new()),
        worker_count(cli.jobs),
        Some(progress),
        None,
    );
    use_case.execute(&metadata, &cli.output)?;
    eprintln!();
    log::info!(
        "Processed {} frames into {}",
        total,
        cli.output.display()
    );
    Ok(())
}

fn wrap_resizing(
    inner: Box<dyn FrameReader>,
    resize_width: Option<u32>,
) -> Result<Box<dyn FrameReader>, Box<dyn std::error::Error>> {
    match resize_width {
        Some(width) => Ok(Box::new(ResizingReader::new(inner, width)?)),
        None => Ok(inner),
    }
}

fn worker_count(jobs: usize) -> usize {
    if jobs > 0 {
        return jobs;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input not found: {}", cli.input.display()).into());
    }
    if cli.dof < MIN_DOF {
        return Err(format!("Depth of field must be at least {MIN_DOF}, got {}", cli.dof).into());
    }
    if cli.resize_width == Some(0) {
        return Err("Resize width must be at least 1".into());
    }
    Ok(())
}
