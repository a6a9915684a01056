use num_enum::{IntoPrimitive, TryFromPrimitive};
use pixel_effect::{Effect, Pixel, PixelBuffer, PixelEffect};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU8, Ordering},
    },
    time::{Duration, Instant},
};

/// Lifecycle of an effect job.
///
/// `Pending -> Running -> {Completed, Cancelled, Failed}`; exactly one
/// terminal state is ever reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum JobState {
    Pending = 0,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::Cancelled | JobState::Failed
        )
    }
}

/// The single terminal result a job delivers.
#[derive(Debug)]
pub enum JobOutcome {
    Completed(PixelBuffer),
    Cancelled,
    Failed(String),
}

/// A shared view onto a running job: cancellation, state and progress.
#[derive(Debug, Clone)]
pub struct JobHandle {
    state: Arc<AtomicU8>,
    cancel_sig: Arc<AtomicBool>,
    progress: Arc<AtomicU8>,
}

impl JobHandle {
    /// Request cooperative cancellation. Idempotent, callable from any
    /// thread at any time; takes effect at the job's next row boundary.
    pub fn request_cancel(&self) {
        self.cancel_sig.store(true, Ordering::Relaxed);
    }

    pub fn state(&self) -> JobState {
        JobState::try_from(self.state.load(Ordering::Relaxed)).unwrap_or(JobState::Failed)
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_terminal()
    }

    /// Completed fraction in [0.0, 1.0], at row granularity.
    pub fn progress(&self) -> f32 {
        self.progress.load(Ordering::Relaxed) as f32 / 100.0
    }
}

/// One in-flight application of an effect to an immutable snapshot of the
/// current image.
///
/// The job owns its input for its whole lifetime and produces a fresh
/// output buffer; it never writes into shared state itself. Committing the
/// result is the dispatcher's job, and only happens on `Completed`.
pub struct EffectJob {
    effect: PixelEffect,
    input: Arc<PixelBuffer>,
    state: Arc<AtomicU8>,
    cancel_sig: Arc<AtomicBool>,
    progress: Arc<AtomicU8>,
    soft_timeout: Option<Duration>,
}

impl EffectJob {
    pub fn new(effect: PixelEffect, input: Arc<PixelBuffer>) -> Self {
        Self {
            effect,
            input,
            state: Arc::new(AtomicU8::new(JobState::Pending.into())),
            cancel_sig: Arc::new(AtomicBool::new(false)),
            progress: Arc::new(AtomicU8::new(0)),
            soft_timeout: None,
        }
    }

    /// Abandon the job with a `Failed(Timeout)`-style outcome once it has
    /// run longer than `timeout`, checked at the same row granularity as
    /// cancellation.
    pub fn with_soft_timeout(mut self, timeout: Duration) -> Self {
        self.soft_timeout = Some(timeout);
        self
    }

    pub fn handle(&self) -> JobHandle {
        JobHandle {
            state: self.state.clone(),
            cancel_sig: self.cancel_sig.clone(),
            progress: self.progress.clone(),
        }
    }

    fn finish(&self, state: JobState) {
        self.state.store(state.into(), Ordering::Relaxed);
    }

    /// Run the effect to a terminal outcome.
    ///
    /// Rows are scanned top-to-bottom, columns left-to-right; the cancel
    /// signal and the soft deadline are checked before each row. On
    /// cancellation the partial output is discarded and no result is
    /// written anywhere.
    pub fn run(self) -> JobOutcome {
        self.state.store(JobState::Running.into(), Ordering::Relaxed);
        log::debug!("effect job running: {}", self.effect.name());

        let deadline = self.soft_timeout.map(|timeout| Instant::now() + timeout);
        let (width, height) = self.input.dimensions();
        let mut data: Vec<Pixel> = Vec::with_capacity((width as usize) * (height as usize));

        for y in 0..height {
            if self.cancel_sig.load(Ordering::Relaxed) {
                self.finish(JobState::Cancelled);
                log::debug!("effect job cancelled at row {y}/{height}");
                return JobOutcome::Cancelled;
            }

            if let Some(deadline) = deadline
                && Instant::now() >= deadline
            {
                self.finish(JobState::Failed);
                log::warn!("effect job timed out at row {y}/{height}");
                return JobOutcome::Failed(format!(
                    "soft timeout after {:.2?}",
                    self.soft_timeout.unwrap_or_default()
                ));
            }

            let Some(row) = self.input.row(y) else {
                self.finish(JobState::Failed);
                return JobOutcome::Failed(format!("input row {y} missing"));
            };

            data.extend(row.iter().map(|&pixel| self.effect.transform(pixel)));
            self.progress
                .store((((y + 1) * 100) / height) as u8, Ordering::Relaxed);
        }

        match PixelBuffer::from_pixels(width, height, data) {
            Ok(output) => {
                self.progress.store(100, Ordering::Relaxed);
                self.finish(JobState::Completed);
                JobOutcome::Completed(output)
            }
            Err(err) => {
                self.finish(JobState::Failed);
                JobOutcome::Failed(err.to_string())
            }
        }
    }
}
