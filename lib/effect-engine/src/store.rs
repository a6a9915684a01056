use pixel_effect::PixelBuffer;
use std::sync::{Arc, Mutex};

/// The single shared slot holding the current image.
///
/// This is the only legal access path to the buffer. Readers take an
/// immutable snapshot, writers replace the slot wholesale, and both go
/// through one mutex, so an observer sees either the image as it was before
/// a commit or exactly the fully-committed result of one job. No partially
/// written buffer is ever visible.
#[derive(Debug, Default)]
pub struct ImageStore {
    current: Mutex<Option<Arc<PixelBuffer>>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current image unconditionally.
    ///
    /// Valid at any time, including while a job is running: the job keeps
    /// its own snapshot and is unaffected.
    pub fn load(&self, buffer: PixelBuffer) -> Arc<PixelBuffer> {
        let buffer = Arc::new(buffer);
        *self.current.lock().unwrap() = Some(buffer.clone());
        buffer
    }

    /// An immutable snapshot of the current image, if one is loaded.
    ///
    /// The returned buffer is shared read-only; it never aliases a mutable
    /// reference.
    pub fn snapshot(&self) -> Option<Arc<PixelBuffer>> {
        self.current.lock().unwrap().clone()
    }

    /// Atomically replace the current image with a job's result.
    ///
    /// Last-committer-wins: the commit succeeds even if the base the job
    /// started from has since been replaced.
    pub fn commit(&self, buffer: PixelBuffer) -> Arc<PixelBuffer> {
        self.load(buffer)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }
}
