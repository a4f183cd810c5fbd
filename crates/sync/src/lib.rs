//! `reelbase-sync` library crate.
//!
//! Re-exports the import pipeline for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod import;

pub use import::{ImportError, ImportSource, ImportStats};
