pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod log;
pub mod payload;
pub mod strategy;

pub use engine::{Analysis, PriorityEngine};
pub use error::{Error, Result};
pub use strategy::Strategy;
