use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::readings::{Reading, Window};

/// Reading-store failure. Callers collapse every variant into a single
/// "waiting for sensor data" outcome; the message keeps the distinguishing
/// cause for internal logs.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("reading log unavailable: {0}")]
    Unavailable(String),
    #[error("reading log malformed: {0}")]
    Malformed(String),
    #[error("reading log write failed: {0}")]
    WriteFailed(String),
}

/// Append-only CSV log with columns `timestamp,angle,distance`. The header
/// is written once, when the file is created or still empty; every later
/// write appends a single data row. The collector writes it, the display
/// reads a snapshot of it at the start of every frame.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    path: PathBuf,
}

impl ReadingStore {
    /// Does not touch the filesystem; the file appears on first append.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamps the sample with the current wall-clock time and appends one
    /// row. Nothing is written when the row cannot be serialized whole.
    pub fn append(&self, angle: f32, distance: f32) -> Result<Reading, StoreError> {
        let needs_header = self
            .path
            .metadata()
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        let reading = Reading::observed(angle, distance);
        writer
            .serialize(&reading)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(reading)
    }

    /// Loads the newest `cap` rows in file (arrival) order. A missing file
    /// and a row that fails to parse (a torn, partially written tail row
    /// counts) are both reported as errors rather than partial data.
    pub fn load_window(&self, cap: usize) -> Result<Window, StoreError> {
        let file = File::open(&self.path).map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let mut readings = Vec::new();
        for row in reader.deserialize() {
            let reading: Reading = row.map_err(|e| StoreError::Malformed(e.to_string()))?;
            readings.push(reading);
        }

        Ok(Window::latest(readings, cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readings::WINDOW_CAP;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn append_writes_the_header_exactly_once() {
        let dir = tempdir().unwrap();
        let store = ReadingStore::open(dir.path().join("radar_data.csv"));

        store.append(10.0, 40.0).unwrap();
        store.append(20.0, 60.0).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("timestamp,angle,distance"));
        assert_eq!(contents.lines().count(), 3);
        assert_eq!(
            contents.matches("timestamp,angle,distance").count(),
            1
        );
    }

    #[test]
    fn load_round_trips_coordinates_in_arrival_order() {
        let dir = tempdir().unwrap();
        let store = ReadingStore::open(dir.path().join("radar_data.csv"));

        store.append(12.0, 50.0).unwrap();
        store.append(15.0, 48.0).unwrap();

        let window = store.load_window(WINDOW_CAP).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window.readings()[0].angle, 12.0);
        assert_eq!(window.readings()[1].distance, 48.0);
    }

    #[test]
    fn load_window_trims_to_the_newest_rows() {
        let dir = tempdir().unwrap();
        let store = ReadingStore::open(dir.path().join("radar_data.csv"));

        for i in 0..60 {
            store.append(i as f32, 30.0).unwrap();
        }

        let window = store.load_window(WINDOW_CAP).unwrap();
        assert_eq!(window.len(), WINDOW_CAP);
        assert_eq!(window.readings()[0].angle, 10.0);
        assert_eq!(window.readings()[WINDOW_CAP - 1].angle, 59.0);
    }

    #[test]
    fn missing_file_reports_unavailable() {
        let dir = tempdir().unwrap();
        let store = ReadingStore::open(dir.path().join("absent.csv"));
        let err = store.load_window(WINDOW_CAP).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn torn_tail_row_reports_malformed() {
        let dir = tempdir().unwrap();
        let store = ReadingStore::open(dir.path().join("radar_data.csv"));
        store.append(45.0, 80.0).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(store.path())
            .unwrap();
        write!(file, "2026-08-22 10:00:00,45").unwrap();

        let err = store.load_window(WINDOW_CAP).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn header_only_file_loads_an_empty_window() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("radar_data.csv");
        std::fs::write(&path, "timestamp,angle,distance\n").unwrap();

        let window = ReadingStore::open(&path).load_window(WINDOW_CAP).unwrap();
        assert!(window.is_empty());
    }
}
