//! Public API surface of the runtime crate.
//!
//! Re-exports the error type and the per-frame report consumed by hosts and
//! the CLI.
mod errors;
mod report;

pub use errors::{Result, RuntimeError};
pub use report::{CommandOutcome, FrameReport};
