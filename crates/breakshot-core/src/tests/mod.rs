//! Crate-level test suite.
//!
//! Unit tests live next to their modules; this directory holds the tests
//! that cross module boundaries:
//!
//! - `integration.rs`: full stroke-to-resolution runs through a [`crate::session::Session`]
//!   and through a hand-assembled pipeline
//! - `determinism.rs`: same seed, same game
//! - `properties.rs`: property tests over the rule engine and accumulator
//! - `helpers.rs`: session factories and notice filters

mod helpers;
mod integration;

pub use helpers::*;
