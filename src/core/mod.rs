//! Core ranking model and algorithms.
//!
//! Tasks and their scores, the dependency graph of a batch with cycle
//! detection, and the dependency-respecting orderer the strategies share.

pub mod dag;
pub mod order;
pub mod score;
pub mod task;

pub use dag::{CyclePath, DanglingDependency, DependencyGraph};
pub use order::Direction;
pub use task::{Task, TaskId};
