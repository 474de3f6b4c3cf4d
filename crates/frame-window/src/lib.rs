//! Frame Window
//!
//! Fixed-capacity circular storage for per-frame records. Every slot is
//! pre-allocated and a single cursor marks the slot written next, which is
//! always the oldest record once the window has wrapped.

mod window;

pub use window::{FrameWindow, DEFAULT_CAPACITY};

use thiserror::Error;

/// Frame window error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("Window capacity must be at least 1 frame")]
    ZeroCapacity,
}
