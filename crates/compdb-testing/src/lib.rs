//! Testing infrastructure for compdb integration tests.
//!
//! - `TestWorld`: isolated temp directory, event log builder, CLI runner
//! - `fixtures`: realistic compiler command lines
//! - `assertions`: checks over a written compilation database

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
