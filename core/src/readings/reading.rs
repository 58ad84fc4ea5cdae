use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::prelude::PolarPoint;

/// One sample reported by the rotating sensor. Immutable once recorded;
/// the ingestion side stamps the timestamp on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(with = "log_timestamp")]
    pub timestamp: NaiveDateTime,
    pub angle: f32,
    pub distance: f32,
}

impl Reading {
    pub fn new(timestamp: NaiveDateTime, angle: f32, distance: f32) -> Self {
        Self {
            timestamp,
            angle,
            distance,
        }
    }

    /// Stamps the sample with the current local wall-clock time.
    pub fn observed(angle: f32, distance: f32) -> Self {
        Self::new(Local::now().naive_local(), angle, distance)
    }
}

impl From<&Reading> for PolarPoint {
    fn from(reading: &Reading) -> Self {
        PolarPoint::new(reading.angle, reading.distance)
    }
}

/// Serde adapter for the durable log's timestamp column.
pub mod log_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(secs: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 22)
            .unwrap()
            .and_hms_opt(10, 0, secs)
            .unwrap()
    }

    #[test]
    fn timestamp_column_uses_log_format() {
        let reading = Reading::new(at(7), 45.0, 32.0);
        let rendered = reading.timestamp.format(log_timestamp::FORMAT).to_string();
        assert_eq!(rendered, "2026-08-22 10:00:07");
    }

    #[test]
    fn polar_point_carries_raw_coordinates() {
        let reading = Reading::new(at(0), 13.0, 48.5);
        let point = PolarPoint::from(&reading);
        assert_eq!(point, PolarPoint::new(13.0, 48.5));
    }
}
