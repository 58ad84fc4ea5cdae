pub mod bridge;
pub mod config;
