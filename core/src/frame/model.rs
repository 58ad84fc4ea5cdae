use crate::prelude::PolarPoint;

/// Radial axis limit of the scope, in centimetres.
pub const MAX_RANGE_CM: f32 = 100.0;

/// One beam line of the sweep trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepBeam {
    pub angle: f32,
    pub opacity: f32,
}

/// Everything the display surface needs for one frame. Stateless: a pure
/// combination of tracker output and sweep trail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarFrame {
    /// Trail beams, newest first; `beams[0]` is the live beam.
    pub beams: Vec<SweepBeam>,
    /// Unconfirmed detections: every reading in the window.
    pub raw: Vec<PolarPoint>,
    /// Repetition-confirmed objects, in window order.
    pub tracked: Vec<PolarPoint>,
    pub max_range: f32,
}

/// Projects a polar sample onto the unit disc under the scope convention:
/// 0 degrees points up, angles grow clockwise, +y is up. Distances clamp to
/// `[0, MAX_RANGE_CM]`.
pub fn polar_to_unit(angle_deg: f32, distance: f32) -> (f32, f32) {
    let radius = (distance / MAX_RANGE_CM).clamp(0.0, 1.0);
    let theta = angle_deg.to_radians();
    (radius * theta.sin(), radius * theta.cos())
}
