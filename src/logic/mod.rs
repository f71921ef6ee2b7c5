pub mod config;
pub mod error;
pub mod threat;
pub mod rl;
pub mod metrics;
pub mod storage;
pub mod service;
