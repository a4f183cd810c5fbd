//! Pure domain logic for the Reelbase catalogue and recommendation engine.
//!
//! Everything in this crate is synchronous and free of I/O so it can be
//! exercised in plain unit tests and reused by the storage layer, the
//! engine, and any CLI tooling alike. The scoring and preference
//! derivation rules here are the contract: the async layers only move
//! data in and out of these functions.

pub mod affinity;
pub mod error;
pub mod preferences;
pub mod rating;
pub mod scoring;
pub mod trending;
pub mod types;
pub mod watchlist;
