use crate::{
    DispatcherConfig, EngineError,
    job::{EffectJob, JobHandle, JobOutcome},
    loader,
    store::ImageStore,
};
use crossbeam::channel::{Receiver, Sender, unbounded};
use pixel_effect::{PixelBuffer, PixelEffect};
use std::{
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

/// Terminal notifications delivered to the UI.
///
/// Workers never touch UI state; every outcome is queued here and the
/// single UI-owning thread drains the receiver. Draining from any other
/// thread breaks the delivery contract, not memory safety.
#[derive(Debug, Clone)]
pub enum UiEvent {
    ImageReady(Arc<PixelBuffer>),
    LoadFailed(String),
    EffectCompleted(Arc<PixelBuffer>),
    EffectCancelled,
    EffectRejectedBusy,
    EffectFailed(String),
}

/// Drives the lifecycle of load and effect requests against one
/// [`ImageStore`].
///
/// At most one effect job runs at a time: the run right is acquired when a
/// job goes Pending -> Running and released only after its terminal event
/// has been queued, so a caller that sees the terminal notification may
/// immediately start the next job. A second request in between is rejected
/// as busy rather than silently racing.
pub struct Dispatcher {
    store: Arc<ImageStore>,
    config: DispatcherConfig,
    event_sender: Sender<UiEvent>,
    busy: Arc<AtomicBool>,
    active: Mutex<Option<JobHandle>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Dispatcher {
    /// Create a dispatcher over a fresh store, returning the event receiver
    /// the UI thread owns.
    pub fn new(config: DispatcherConfig) -> (Self, Receiver<UiEvent>) {
        let (event_sender, event_receiver) = unbounded();

        let dispatcher = Self {
            store: Arc::new(ImageStore::new()),
            config,
            event_sender,
            busy: Arc::new(AtomicBool::new(false)),
            active: Mutex::new(None),
            workers: Mutex::new(Vec::new()),
        };

        (dispatcher, event_receiver)
    }

    pub fn store(&self) -> Arc<ImageStore> {
        self.store.clone()
    }

    fn send(sender: &Sender<UiEvent>, event: UiEvent) {
        if let Err(err) = sender.send(event) {
            log::warn!("ui event send failed: {err}");
        }
    }

    /// Decode `path` on a background thread and replace the current image
    /// on success.
    ///
    /// The UI stays responsive during the decode; failure leaves the store
    /// untouched and is reported as [`UiEvent::LoadFailed`].
    pub fn request_load(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let store = self.store.clone();
        let sender = self.event_sender.clone();

        let worker = thread::spawn(move || {
            match loader::decode(&path) {
                Ok(buffer) => {
                    let current = store.load(buffer);
                    log::debug!(
                        "loaded {} ({}x{})",
                        path.display(),
                        current.width(),
                        current.height()
                    );
                    Self::send(&sender, UiEvent::ImageReady(current));
                }
                Err(err) => {
                    log::warn!("load failed for {}: {err}", path.display());
                    Self::send(&sender, UiEvent::LoadFailed(err.to_string()));
                }
            }
            log::info!("load worker exit");
        });

        self.workers.lock().unwrap().push(worker);
    }

    /// Start `effect` against a snapshot of the current image.
    ///
    /// Returns the handle of the started job. Rejections are synchronous:
    /// `NoImage` when nothing is loaded, `Busy` when a job is already
    /// running (also queued as [`UiEvent::EffectRejectedBusy`], mirroring
    /// what the UI shows the user).
    pub fn request_effect(&self, effect: PixelEffect) -> Result<JobHandle, EngineError> {
        let Some(input) = self.store.snapshot() else {
            log::warn!("effect request rejected: no image loaded");
            return Err(EngineError::NoImage);
        };

        if !self.config.allow_concurrent_jobs
            && self
                .busy
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
        {
            log::warn!("effect request rejected: another job is in progress");
            Self::send(&self.event_sender, UiEvent::EffectRejectedBusy);
            return Err(EngineError::Busy);
        }

        let mut job = EffectJob::new(effect, input);
        if let Some(timeout) = self.config.soft_timeout {
            job = job.with_soft_timeout(timeout);
        }

        let handle = job.handle();
        *self.active.lock().unwrap() = Some(handle.clone());

        let store = self.store.clone();
        let sender = self.event_sender.clone();
        let busy = self.busy.clone();
        let release_busy = !self.config.allow_concurrent_jobs;

        let worker = thread::spawn(move || {
            match job.run() {
                JobOutcome::Completed(output) => {
                    let current = store.commit(output);
                    Self::send(&sender, UiEvent::EffectCompleted(current));
                }
                JobOutcome::Cancelled => Self::send(&sender, UiEvent::EffectCancelled),
                JobOutcome::Failed(reason) => Self::send(&sender, UiEvent::EffectFailed(reason)),
            }

            // The terminal event is queued; only now may the next job start.
            if release_busy {
                busy.store(false, Ordering::Release);
            }
            log::info!("effect worker exit");
        });

        self.workers.lock().unwrap().push(worker);
        Ok(handle)
    }

    /// Request cancellation of the most recently started job. Non-blocking
    /// and idempotent; a no-op once the job has reached a terminal state.
    pub fn request_cancel(&self) {
        if let Some(handle) = self.active.lock().unwrap().as_ref() {
            handle.request_cancel();
        }
    }

    /// Completed fraction of the most recently started job, in [0.0, 1.0].
    pub fn progress(&self) -> f32 {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .map(|handle| handle.progress())
            .unwrap_or(0.0)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Wait for every spawned worker to exit. Events already queued stay
    /// readable on the receiver.
    pub fn join(&self) {
        let workers = std::mem::take(&mut *self.workers.lock().unwrap());
        for worker in workers {
            if worker.join().is_err() {
                log::warn!("worker exited with a panic");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_effect::{
        Pixel, base_effect::GrayscaleConfig, channel_effect::ChannelIsolateConfig,
    };
    use std::time::Duration;

    const RECV_TIMEOUT: Duration = Duration::from_secs(10);

    fn grayscale() -> PixelEffect {
        PixelEffect::Grayscale(GrayscaleConfig::new())
    }

    fn scenario_buffer() -> PixelBuffer {
        PixelBuffer::from_pixels(
            2,
            2,
            vec![
                Pixel::opaque(255, 0, 0),
                Pixel::opaque(0, 255, 0),
                Pixel::opaque(0, 0, 255),
                Pixel::opaque(255, 255, 255),
            ],
        )
        .unwrap()
    }

    // Large enough that a job is still running by the time the test thread
    // issues the next request.
    fn big_buffer() -> PixelBuffer {
        PixelBuffer::from_pixels(2000, 2000, vec![Pixel::opaque(10, 20, 30); 4_000_000]).unwrap()
    }

    #[test]
    fn test_effect_without_image_is_rejected() {
        let (dispatcher, _events) = Dispatcher::new(DispatcherConfig::new());
        assert!(matches!(
            dispatcher.request_effect(grayscale()),
            Err(EngineError::NoImage)
        ));
    }

    #[test]
    fn test_effect_completes_and_commits() {
        let (dispatcher, events) = Dispatcher::new(DispatcherConfig::new());
        dispatcher.store().load(scenario_buffer());

        dispatcher.request_effect(grayscale()).unwrap();

        let UiEvent::EffectCompleted(output) = events.recv_timeout(RECV_TIMEOUT).unwrap() else {
            panic!("expected completion event");
        };
        assert_eq!(output.get(0, 0).unwrap(), Pixel::opaque(85, 85, 85));
        assert_eq!(output.get(1, 1).unwrap(), Pixel::opaque(255, 255, 255));

        // The committed result is what the store now holds.
        let current = dispatcher.store().snapshot().unwrap();
        assert!(Arc::ptr_eq(&current, &output));

        dispatcher.join();
    }

    #[test]
    fn test_second_request_is_busy() {
        let (dispatcher, events) = Dispatcher::new(DispatcherConfig::new());
        dispatcher.store().load(big_buffer());

        let first = dispatcher.request_effect(grayscale()).unwrap();
        assert!(matches!(
            dispatcher.request_effect(PixelEffect::Invert),
            Err(EngineError::Busy)
        ));

        // Rejection is queued before the first job's completion.
        assert!(matches!(
            events.recv_timeout(RECV_TIMEOUT).unwrap(),
            UiEvent::EffectRejectedBusy
        ));
        assert!(matches!(
            events.recv_timeout(RECV_TIMEOUT).unwrap(),
            UiEvent::EffectCompleted(_)
        ));
        assert!(first.is_finished());

        // After the terminal notification a new request is accepted.
        dispatcher.request_effect(PixelEffect::Invert).unwrap();
        assert!(matches!(
            events.recv_timeout(RECV_TIMEOUT).unwrap(),
            UiEvent::EffectCompleted(_)
        ));

        dispatcher.join();
    }

    #[test]
    fn test_concurrent_requests_have_single_winner() {
        let (dispatcher, events) = Dispatcher::new(DispatcherConfig::new());
        dispatcher.store().load(big_buffer());
        let dispatcher = Arc::new(dispatcher);

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let dispatcher = dispatcher.clone();
                thread::spawn(move || dispatcher.request_effect(grayscale()).is_ok())
            })
            .collect();

        let accepted = threads
            .into_iter()
            .map(|t| t.join().unwrap())
            .filter(|&accepted| accepted)
            .count();
        assert_eq!(accepted, 1);

        let mut busy_events = 0;
        let mut completed = 0;
        for _ in 0..8 {
            match events.recv_timeout(RECV_TIMEOUT).unwrap() {
                UiEvent::EffectRejectedBusy => busy_events += 1,
                UiEvent::EffectCompleted(_) => completed += 1,
                other => panic!("unexpected event: {other:?}"),
            }
        }
        assert_eq!((busy_events, completed), (7, 1));

        // The store holds exactly the single winner's result.
        let current = dispatcher.store().snapshot().unwrap();
        assert_eq!(current.get(0, 0).unwrap(), Pixel::opaque(20, 20, 20));

        dispatcher.join();
    }

    #[test]
    fn test_cancellation_leaves_store_untouched() {
        let (dispatcher, events) = Dispatcher::new(DispatcherConfig::new());
        dispatcher.store().load(big_buffer());
        let before = dispatcher.store().snapshot().unwrap();

        dispatcher.request_effect(PixelEffect::Invert).unwrap();
        dispatcher.request_cancel();
        dispatcher.request_cancel(); // idempotent

        assert!(matches!(
            events.recv_timeout(RECV_TIMEOUT).unwrap(),
            UiEvent::EffectCancelled
        ));

        let after = dispatcher.store().snapshot().unwrap();
        assert!(Arc::ptr_eq(&before, &after));

        dispatcher.join();
    }

    #[test]
    fn test_concurrent_mode_runs_all_jobs() {
        let config = DispatcherConfig::new().with_allow_concurrent_jobs(true);
        let (dispatcher, events) = Dispatcher::new(config);
        dispatcher.store().load(scenario_buffer());

        dispatcher.request_effect(grayscale()).unwrap();
        dispatcher
            .request_effect(PixelEffect::ChannelIsolate(ChannelIsolateConfig::new()))
            .unwrap();

        for _ in 0..2 {
            assert!(matches!(
                events.recv_timeout(RECV_TIMEOUT).unwrap(),
                UiEvent::EffectCompleted(_)
            ));
        }

        dispatcher.join();
    }

    #[test]
    fn test_soft_timeout_fails_without_commit() {
        let config = DispatcherConfig::new().with_soft_timeout(Duration::from_secs(0));
        let (dispatcher, events) = Dispatcher::new(config);
        dispatcher.store().load(scenario_buffer());
        let before = dispatcher.store().snapshot().unwrap();

        dispatcher.request_effect(grayscale()).unwrap();

        let UiEvent::EffectFailed(reason) = events.recv_timeout(RECV_TIMEOUT).unwrap() else {
            panic!("expected failure event");
        };
        assert!(reason.contains("timeout"));
        assert!(Arc::ptr_eq(
            &before,
            &dispatcher.store().snapshot().unwrap()
        ));

        dispatcher.join();
    }

    #[test]
    fn test_load_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.png");
        scenario_buffer().to_rgba8().save(&path).unwrap();

        let (dispatcher, events) = Dispatcher::new(DispatcherConfig::new());

        dispatcher.request_load(&path);
        let UiEvent::ImageReady(buffer) = events.recv_timeout(RECV_TIMEOUT).unwrap() else {
            panic!("expected image ready event");
        };
        assert_eq!(buffer.dimensions(), (2, 2));
        assert!(dispatcher.store().is_loaded());

        dispatcher.request_load(dir.path().join("missing.png"));
        assert!(matches!(
            events.recv_timeout(RECV_TIMEOUT).unwrap(),
            UiEvent::LoadFailed(_)
        ));

        // The failed load did not clobber the loaded image.
        assert_eq!(dispatcher.store().snapshot().unwrap().dimensions(), (2, 2));

        dispatcher.join();
    }

    #[test]
    fn test_load_replaces_running_jobs_base_without_affecting_it() {
        let (dispatcher, events) = Dispatcher::new(DispatcherConfig::new());
        dispatcher.store().load(big_buffer());

        dispatcher.request_effect(grayscale()).unwrap();

        // Replacing the image mid-run is legal; the job keeps its snapshot
        // and its commit wins last-committer-wins.
        dispatcher.store().load(scenario_buffer());

        let UiEvent::EffectCompleted(output) = events.recv_timeout(RECV_TIMEOUT).unwrap() else {
            panic!("expected completion event");
        };
        assert_eq!(output.dimensions(), (2000, 2000));
        assert_eq!(
            dispatcher.store().snapshot().unwrap().dimensions(),
            (2000, 2000)
        );

        dispatcher.join();
    }
}
