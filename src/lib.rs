//! Simulation core of a single-screen boss battle.
//!
//! The library owns the rules (entities, collisions, projectiles, behavior
//! machines, the per-frame battle loop and the scene switcher).  Input and
//! drawing are reached through the `InputSource` and `VisualSink` traits so
//! the binary can plug a terminal front-end in, and tests can plug in plain data.

pub mod behavior;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod pool;
pub mod render;
pub mod scene;
pub mod timer;
