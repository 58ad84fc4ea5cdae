use crate::frame::model::{RadarFrame, SweepBeam, MAX_RANGE_CM};
use crate::prelude::FrameResult;
use crate::readings::Window;
use crate::sweep::{trail_opacity, SweepState};
use crate::tracking::BucketTracker;

/// Mutable per-session context threaded through every frame evaluation.
/// Owned by the display loop; nothing here is global or ambient.
#[derive(Debug, Default)]
pub struct SessionState {
    pub tracker: BucketTracker,
    pub sweep: SweepState,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Evaluates one frame over the current window: advances the sweep across
/// the window's distinct angles, re-tallies the tracker, and assembles the
/// render model. Fails only when the window holds no angles, which the
/// caller reports and retries next cycle.
pub fn build_frame(window: &Window, session: &mut SessionState) -> FrameResult<RadarFrame> {
    let distinct = window.distinct_angles();
    session.sweep.advance(&distinct)?;

    let output = session.tracker.evaluate(window);

    let beams = session
        .sweep
        .trail()
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &angle)| SweepBeam {
            angle,
            opacity: trail_opacity(position),
        })
        .collect();

    Ok(RadarFrame {
        beams,
        raw: output.raw,
        tracked: output.tracked,
        max_range: MAX_RANGE_CM,
    })
}
