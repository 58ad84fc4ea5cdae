pub mod reading;
pub mod window;

pub use reading::Reading;
pub use window::{Window, WINDOW_CAP};
