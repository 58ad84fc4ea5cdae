use crate::readings::Reading;

/// How many recent readings one frame evaluation sees.
pub const WINDOW_CAP: usize = 50;

/// The most recent readings in arrival order. Arrival order is
/// authoritative: readings are never reordered by timestamp.
#[derive(Debug, Clone, Default)]
pub struct Window {
    cap: usize,
    readings: Vec<Reading>,
}

impl Window {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            readings: Vec::new(),
        }
    }

    /// Keeps the newest `cap` entries of an already-ordered sequence.
    pub fn latest(mut readings: Vec<Reading>, cap: usize) -> Self {
        if readings.len() > cap {
            let excess = readings.len() - cap;
            readings.drain(..excess);
        }
        Self { cap, readings }
    }

    /// Appends a reading, evicting the oldest when the window is full.
    pub fn push(&mut self, reading: Reading) {
        self.readings.push(reading);
        if self.readings.len() > self.cap {
            self.readings.remove(0);
        }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Ascending, deduplicated set of angles present in the window. No
    /// validation: degenerate values sort by total order and pass through.
    pub fn distinct_angles(&self) -> Vec<f32> {
        let mut angles: Vec<f32> = self.readings.iter().map(|r| r.angle).collect();
        angles.sort_by(f32::total_cmp);
        angles.dedup();
        angles
    }
}
