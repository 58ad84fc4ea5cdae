use std::collections::HashMap;

use crate::prelude::PolarPoint;
use crate::readings::Window;
use crate::telemetry::LogManager;
use crate::tracking::BucketKey;

/// One frame's worth of plottable points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerOutput {
    /// Every reading in the window, unchanged.
    pub raw: Vec<PolarPoint>,
    /// Readings confirmed by repetition within the window, in window order.
    pub tracked: Vec<PolarPoint>,
}

/// Classifies the window's readings into bucket tallies and re-emits the
/// ones whose bucket has been hit at least twice. The tally map is rebuilt
/// from scratch on every evaluation; a bucket that qualified last frame must
/// re-qualify this frame. The map itself is retained only to reuse its
/// allocation across frames.
#[derive(Debug)]
pub struct BucketTracker {
    tally: HashMap<BucketKey, u32>,
    logger: LogManager,
}

impl BucketTracker {
    pub fn new() -> Self {
        Self {
            tally: HashMap::new(),
            logger: LogManager::new(),
        }
    }

    /// Emission is incremental: the reading that brings its bucket's tally
    /// to 2 is emitted, as is every later reading in that bucket, but a
    /// bucket's first reading is never emitted on its own. Output depends
    /// only on window content and arrival order.
    pub fn evaluate(&mut self, window: &Window) -> TrackerOutput {
        self.tally.clear();

        let mut output = TrackerOutput {
            raw: Vec::with_capacity(window.len()),
            tracked: Vec::new(),
        };

        for reading in window.readings() {
            output.raw.push(PolarPoint::from(reading));

            let key = BucketKey::for_reading(reading);
            let hits = self.tally.entry(key).or_insert(0);
            *hits += 1;
            if *hits >= 2 {
                output.tracked.push(PolarPoint::from(reading));
            }
        }

        self.logger.record(&format!(
            "tracker evaluated {} readings, {} tracked",
            output.raw.len(),
            output.tracked.len()
        ));

        output
    }
}

impl Default for BucketTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readings::Reading;
    use chrono::NaiveDate;

    fn window_of(samples: &[(f32, f32)]) -> Window {
        let stamp = NaiveDate::from_ymd_opt(2026, 8, 22)
            .unwrap()
            .and_hms_opt(11, 15, 0)
            .unwrap();
        let mut window = Window::new(50);
        for &(angle, distance) in samples {
            window.push(Reading::new(stamp, angle, distance));
        }
        window
    }

    #[test]
    fn lone_reading_is_never_tracked() {
        let mut tracker = BucketTracker::new();
        let output = tracker.evaluate(&window_of(&[(88.0, 10.0)]));
        assert_eq!(output.raw.len(), 1);
        assert!(output.tracked.is_empty());
    }

    #[test]
    fn second_co_bucketed_reading_is_emitted_first_is_not() {
        let mut tracker = BucketTracker::new();
        let output = tracker.evaluate(&window_of(&[(12.0, 50.0), (15.0, 48.0)]));
        assert_eq!(output.tracked, vec![PolarPoint::new(15.0, 48.0)]);
    }

    #[test]
    fn every_reading_past_the_threshold_is_emitted() {
        let mut tracker = BucketTracker::new();
        let output = tracker.evaluate(&window_of(&[
            (12.0, 50.0),
            (15.0, 48.0),
            (11.0, 51.0),
        ]));
        assert_eq!(
            output.tracked,
            vec![PolarPoint::new(15.0, 48.0), PolarPoint::new(11.0, 51.0)]
        );
    }

    #[test]
    fn distinct_buckets_do_not_confirm_each_other() {
        let mut tracker = BucketTracker::new();
        let output = tracker.evaluate(&window_of(&[(0.0, 20.0), (10.0, 20.0), (20.0, 80.0)]));
        assert_eq!(output.raw.len(), 3);
        assert!(output.tracked.is_empty());
    }

    #[test]
    fn raw_points_mirror_the_window() {
        let samples = [(5.0, 30.0), (170.0, 95.0)];
        let mut tracker = BucketTracker::new();
        let output = tracker.evaluate(&window_of(&samples));
        assert_eq!(
            output.raw,
            vec![PolarPoint::new(5.0, 30.0), PolarPoint::new(170.0, 95.0)]
        );
    }

    #[test]
    fn evaluation_is_deterministic_and_stateless_across_frames() {
        let window = window_of(&[(12.0, 50.0), (15.0, 48.0), (88.0, 10.0)]);
        let mut tracker = BucketTracker::new();
        let first = tracker.evaluate(&window);
        let second = tracker.evaluate(&window);
        assert_eq!(first, second);

        // A frame over a window that lost the confirming reading must not
        // remember last frame's tally.
        let shrunk = window_of(&[(12.0, 50.0)]);
        assert!(tracker.evaluate(&shrunk).tracked.is_empty());
    }

    #[test]
    fn negative_coordinates_bucket_and_confirm_normally() {
        let mut tracker = BucketTracker::new();
        let output = tracker.evaluate(&window_of(&[(-7.0, 0.0), (-2.0, -1.0)]));
        assert_eq!(output.tracked, vec![PolarPoint::new(-2.0, -1.0)]);
    }
}
