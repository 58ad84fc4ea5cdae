//! Core evaluation logic for the sweepscope radar display.
//!
//! One frame per refresh cycle: the durable reading log supplies a bounded
//! window of recent samples, the bucket tracker confirms repeated echoes,
//! and the sweep machine steps the beam across the observed angles.

pub mod frame;
pub mod prelude;
pub mod readings;
pub mod store;
pub mod sweep;
pub mod telemetry;
pub mod tracking;

pub use prelude::{FrameError, FrameResult, PolarPoint};
