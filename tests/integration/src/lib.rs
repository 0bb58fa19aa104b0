//! Integration test support
//!
//! Spins up a `wiremock` stand-in for the Crew backend and provides fixture
//! builders matching its wire format.

pub mod fixtures;
pub mod helpers;
