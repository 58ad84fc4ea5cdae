use crate::readings::Reading;

/// Coarse tolerance grouping: 10-degree sectors crossed with 5 cm rings.
/// Two echoes landing in the same key are treated as the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub angle: i32,
    pub distance: i32,
}

impl BucketKey {
    /// Angle buckets floor toward negative infinity; distance buckets round
    /// half-to-even.
    pub fn of(angle: f32, distance: f32) -> Self {
        Self {
            angle: ((angle / 10.0).floor() * 10.0) as i32,
            distance: ((distance / 5.0).round_ties_even() * 5.0) as i32,
        }
    }

    pub fn for_reading(reading: &Reading) -> Self {
        Self::of(reading.angle, reading.distance)
    }
}
