use crate::prelude::{FrameError, FrameResult};

/// How many previous beam angles stay visible as a fading trail.
pub const BEAM_TRAIL_LENGTH: usize = 5;

/// Simulated rotating beam stepping through the distinct angles observed in
/// the current window, one step per refresh cycle. Lives for the duration
/// of a display session; initialized to index 0 with an empty trail.
#[derive(Debug, Clone, Default)]
pub struct SweepState {
    index: usize,
    trail: Vec<f32>,
}

impl SweepState {
    pub fn new() -> Self {
        Self::default()
    }

    /// One cycle: pick the current beam angle, record it in the trail, and
    /// step the index. The distinct-angle set is recomputed by the caller
    /// every cycle and may have shrunk since the last one, so the index is
    /// reduced modulo the current length before it is used.
    pub fn advance(&mut self, distinct_angles: &[f32]) -> FrameResult<f32> {
        if distinct_angles.is_empty() {
            return Err(FrameError::NoAngles);
        }

        self.index %= distinct_angles.len();
        let current = distinct_angles[self.index];

        self.trail.push(current);
        if self.trail.len() > BEAM_TRAIL_LENGTH {
            self.trail.remove(0);
        }

        self.index = (self.index + 1) % distinct_angles.len();
        Ok(current)
    }

    /// Recently swept angles, oldest first.
    pub fn trail(&self) -> &[f32] {
        &self.trail
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Opacity of a trail entry at reverse position `i` (0 = newest beam). The
/// trail cap keeps the result positive: the oldest visible entry lands at
/// 0.2, never at or below zero.
pub fn trail_opacity(reverse_position: usize) -> f32 {
    1.0 - reverse_position as f32 / BEAM_TRAIL_LENGTH as f32
}
