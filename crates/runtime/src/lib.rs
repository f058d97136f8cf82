//! Frame loop for maps driven by the layer resolver and the targeting engine.
//!
//! The runtime owns the characters of one map and advances them one frame at
//! a time: layer states first, then context timers, then every agent's
//! scripted commands. Results land in numbered switches and variables
//! ([`ResultSlots`]) the way event scripts expect them.
//!
//! Modules are organized by responsibility:
//! - [`world`] hosts the frame loop, movement, vehicles and the damage gate
//! - [`api`] exposes errors and per-frame reports
//! - [`scenario`] builds a world from a RON placement file
//! - [`slots`] stores command results
pub mod api;
pub mod scenario;
pub mod slots;
pub mod world;

pub use api::{CommandOutcome, FrameReport, Result, RuntimeError};
pub use scenario::{Placement, Scenario};
pub use slots::ResultSlots;
pub use world::{Actor, World};
