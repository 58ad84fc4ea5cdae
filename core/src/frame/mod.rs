pub mod builder;
pub mod model;

pub use builder::{build_frame, SessionState};
pub use model::{polar_to_unit, RadarFrame, SweepBeam, MAX_RANGE_CM};
