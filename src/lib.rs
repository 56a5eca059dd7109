//! FAIRWAY: Side-wager settlement engine for a round of golf
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod formats;
pub mod engine;
pub mod course;
pub mod round;
pub mod storage;
