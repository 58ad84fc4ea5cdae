pub mod bucket;
pub mod tracker;

pub use bucket::BucketKey;
pub use tracker::{BucketTracker, TrackerOutput};
