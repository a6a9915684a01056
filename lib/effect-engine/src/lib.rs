//! # Effect Engine
//!
//! The concurrency core of the live image-effect viewer: a single shared
//! image slot, background effect jobs with cooperative cancellation, and a
//! dispatcher that marshals terminal results back to the UI thread.
//!
//! ## Architecture
//!
//! 1. **ImageStore**: the one shared mutable slot holding the current image.
//!    Jobs read through `snapshot()` and write through `commit()`; nothing
//!    else touches the buffer.
//! 2. **EffectJob**: one in-flight effect application over a snapshot,
//!    scanning rows top-to-bottom and checking a cancel signal before each
//!    row.
//! 3. **Dispatcher**: receives UI requests (load / apply effect / cancel),
//!    enforces at most one running job per store, and delivers every
//!    terminal outcome as a [`UiEvent`] on a channel drained by the UI
//!    thread. Workers never run UI code.
//!
//! ## Quick Start
//!
//! ```no_run
//! use effect_engine::{Dispatcher, DispatcherConfig, UiEvent};
//! use pixel_effect::{PixelEffect, base_effect::GrayscaleConfig};
//!
//! let (dispatcher, events) = Dispatcher::new(DispatcherConfig::new());
//!
//! dispatcher.request_load("photo.png");
//! while let Ok(event) = events.recv() {
//!     match event {
//!         UiEvent::ImageReady(_) => {
//!             dispatcher
//!                 .request_effect(PixelEffect::Grayscale(GrayscaleConfig::new()))
//!                 .unwrap();
//!         }
//!         UiEvent::EffectCompleted(buffer) => {
//!             println!("done: {}x{}", buffer.width(), buffer.height());
//!             break;
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`store`]: the shared image slot
//! - [`job`]: effect job state machine and cancellation
//! - [`dispatcher`]: request handling and UI event delivery
//! - [`dispatcher_config`]: dispatcher configuration builder
//! - [`loader`]: image decoding off the UI thread
//! - [`engine_error`]: error types for engine operations

pub mod dispatcher;
pub mod dispatcher_config;
pub mod engine_error;
pub mod job;
pub mod loader;
pub mod store;

pub use crossbeam::channel::{Receiver, Sender, unbounded};
pub use dispatcher::{Dispatcher, UiEvent};
pub use dispatcher_config::DispatcherConfig;
pub use engine_error::EngineError;
pub use job::{EffectJob, JobHandle, JobOutcome, JobState};
pub use loader::{DecodeError, decode};
pub use store::ImageStore;
