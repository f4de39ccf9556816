//! Background worker for CPU-bound redaction passes

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, unbounded};
use image::RgbaImage;

use crate::domain::RedactRegion;
use crate::render::redact;

/// One redaction pass over an owned bitmap. `capture` tags the job with
/// the capture attempt it belongs to, so results for a replaced or
/// cancelled capture can be discarded.
pub struct RedactionJob {
    pub capture: u64,
    pub image: RgbaImage,
    pub regions: Vec<RedactRegion>,
    pub preview: (f32, f32),
    pub blocks: u32,
}

/// A finished pass, carrying the mutated bitmap back
pub struct RedactionDone {
    pub capture: u64,
    pub image: RgbaImage,
}

/// Single worker thread applying redaction passes in submission order.
///
/// The bitmap travels with the job, so exactly one mutator can touch it
/// while a pass is in flight.
pub struct RedactionWorker {
    jobs: Option<Sender<RedactionJob>>,
    done: Receiver<RedactionDone>,
    handle: Option<JoinHandle<()>>,
}

impl RedactionWorker {
    pub fn spawn() -> Self {
        let (job_tx, job_rx) = unbounded::<RedactionJob>();
        let (done_tx, done_rx) = unbounded();

        let handle = std::thread::spawn(move || {
            for mut job in job_rx {
                redact::redact(&mut job.image, &job.regions, job.preview, job.blocks);
                if done_tx
                    .send(RedactionDone {
                        capture: job.capture,
                        image: job.image,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });

        Self {
            jobs: Some(job_tx),
            done: done_rx,
            handle: Some(handle),
        }
    }

    pub fn submit(&self, job: RedactionJob) {
        if let Some(jobs) = &self.jobs
            && jobs.send(job).is_err()
        {
            log::error!("redaction worker is gone, dropping job");
        }
    }

    /// Non-blocking poll for a finished pass
    pub fn try_recv(&self) -> Option<RedactionDone> {
        self.done.try_recv().ok()
    }

    /// Block until the next finished pass, or `None` if the worker died
    pub fn recv(&self) -> Option<RedactionDone> {
        self.done.recv().ok()
    }
}

impl Drop for RedactionWorker {
    fn drop(&mut self) {
        // Closing the job channel lets the thread drain and exit.
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
