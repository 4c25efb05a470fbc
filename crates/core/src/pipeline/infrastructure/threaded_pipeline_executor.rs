use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::effect::frame_effect::FrameEffect;
use crate::io::domain::frame_reader::FrameReader;
use crate::io::domain::frame_writer::FrameWriter;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor};
use crate::shared::frame::Frame;
use crate::shared::sequence_metadata::SequenceMetadata;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Executes the pipeline with a reader thread, a pool of effect workers,
/// and a writer thread.
///
/// Layout: `reader → workers[n] → main [reorder] → writer`
///
/// Workers finish frames in arbitrary order; the main loop buffers results
/// and releases them to the writer strictly by sequence index, so output
/// order always matches input order.
pub struct ThreadedPipelineExecutor {
    channel_capacity: usize,
}

impl ThreadedPipelineExecutor {
    pub fn new() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for ThreadedPipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineExecutor for ThreadedPipelineExecutor {
    fn execute(
        &self,
        reader: Box<dyn FrameReader>,
        mut writer: Box<dyn FrameWriter>,
        effect: Arc<dyn FrameEffect>,
        metadata: &SequenceMetadata,
        output_path: &Path,
        config: PipelineConfig,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let total_frames = metadata.total_frames;
        let cap = self.channel_capacity;
        let workers = config.workers.max(1);

        writer.open(output_path, metadata)?;
        log::debug!("Starting pipeline: {total_frames} frames, {workers} workers");

        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<Result<Frame, SendError>>(cap);
        let (processed_tx, processed_rx) =
            crossbeam_channel::bounded::<Result<Frame, SendError>>(cap);
        let (write_tx, write_rx) = crossbeam_channel::bounded::<Frame>(cap);

        let reader_handle = spawn_reader(reader, frame_tx, config.cancelled.clone());
        let worker_handles = spawn_workers(
            workers,
            effect,
            frame_rx,
            processed_tx,
            config.cancelled.clone(),
        );
        let writer_handle = spawn_writer(writer, write_rx);

        let main_error = run_reorder_loop(&processed_rx, &write_tx, total_frames, &config);

        // Closing the write channel lets the writer finish and flush.
        drop(write_tx);
        drop(processed_rx);

        let _ = reader_handle.join();
        for handle in worker_handles {
            let _ = handle.join();
        }
        let writer_result = writer_handle.join();

        if let Some(e) = main_error {
            return Err(e);
        }
        match writer_result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e),
            Err(_) => Err("writer thread panicked".into()),
        }
    }
}

fn spawn_reader(
    mut reader: Box<dyn FrameReader>,
    frame_tx: crossbeam_channel::Sender<Result<Frame, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for frame_result in reader.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let mapped = frame_result.map_err(|e| -> SendError { e.to_string().into() });
            if frame_tx.send(mapped).is_err() {
                break;
            }
        }
        reader.close();
    })
}

fn spawn_workers(
    count: usize,
    effect: Arc<dyn FrameEffect>,
    frame_rx: crossbeam_channel::Receiver<Result<Frame, SendError>>,
    processed_tx: crossbeam_channel::Sender<Result<Frame, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> Vec<std::thread::JoinHandle<()>> {
    (0..count)
        .map(|_| {
            let effect = effect.clone();
            let frame_rx = frame_rx.clone();
            let processed_tx = processed_tx.clone();
            let cancelled = cancelled.clone();
            std::thread::spawn(move || {
                for frame_result in frame_rx.iter() {
                    if cancelled.load(Ordering::Relaxed) {
                        break;
                    }
                    let processed = match frame_result {
                        Ok(frame) => effect
                            .apply(&frame)
                            .map_err(|e| -> SendError { e.to_string().into() }),
                        Err(e) => Err(e),
                    };
                    if processed_tx.send(processed).is_err() {
                        break;
                    }
                }
            })
        })
        .collect()
}

fn spawn_writer(
    mut writer: Box<dyn FrameWriter>,
    write_rx: crossbeam_channel::Receiver<Frame>,
) -> std::thread::JoinHandle<Result<(), SendError>> {
    std::thread::spawn(move || {
        for frame in write_rx.iter() {
            writer
                .write(&frame)
                .map_err(|e| -> SendError { e.to_string().into() })?;
        }
        writer
            .close()
            .map_err(|e| -> SendError { e.to_string().into() })
    })
}

fn run_reorder_loop(
    processed_rx: &crossbeam_channel::Receiver<Result<Frame, SendError>>,
    write_tx: &crossbeam_channel::Sender<Frame>,
    total_frames: usize,
    config: &PipelineConfig,
) -> Option<Box<dyn std::error::Error>> {
    let mut pending: HashMap<usize, Frame> = HashMap::new();
    let mut next_index = 0usize;

    for result in processed_rx.iter() {
        let frame = match result {
            Ok(f) => f,
            Err(e) => {
                config.cancelled.store(true, Ordering::Relaxed);
                return Some(e);
            }
        };
        pending.insert(frame.index(), frame);

        while let Some(frame) = pending.remove(&next_index) {
            if let Some(on_progress) = &config.on_progress {
                if !on_progress(next_index + 1, total_frames) {
                    config.cancelled.store(true, Ordering::Relaxed);
                    return None;
                }
            }
            if write_tx.send(frame).is_err() {
                return Some("writer stopped early".into());
            }
            next_index += 1;
        }
    }

    if !pending.is_empty() && !config.cancelled.load(Ordering::Relaxed) {
        return Some(format!("{} frames missing from output", pending.len()).into());
    }
    None
}
