//! Integration tests for taskrank.
//!
//! These drive the public engine API end to end: scoring, cycle
//! detection, ordering under every strategy and the JSON wire shapes.
//!
//! # Test Categories
//!
//! - `scenarios`: hand-built batches with exact expected orderings
//! - `properties`: invariants checked over generated acyclic batches
//! - `wire`: request parsing through to the response JSON

mod fixtures;

mod scenarios;
mod wire;
