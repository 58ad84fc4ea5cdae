/// A plotted sample: servo bearing in degrees, echo distance in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    pub angle: f32,
    pub distance: f32,
}

impl PolarPoint {
    pub fn new(angle: f32, distance: f32) -> Self {
        Self { angle, distance }
    }
}

/// Per-frame evaluation error. Terminal for the current frame only; the
/// caller retries on its next refresh cycle.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FrameError {
    #[error("no angle data yet")]
    NoAngles,
}

pub type FrameResult<T> = Result<T, FrameError>;
