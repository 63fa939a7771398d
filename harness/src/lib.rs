//! treesearch harness: named worlds, a runner that packages search
//! outcomes as digest-bound reports, and report directory persistence.
//!
//! The harness does NOT implement search logic; it delegates to the engine.
//! Worlds provide problem data only; the runner owns rendering and hashing.

#![forbid(unsafe_code)]

pub mod cancel;
pub mod contract;
pub mod report_dir;
pub mod runner;
pub mod worlds;
