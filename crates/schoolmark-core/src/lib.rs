//! schoolmark-core — Record stores, aggregation engine, and snapshots.
//!
//! This crate defines the data model, the in-memory repository, the
//! derived ranking/trending computations, and the durable JSON snapshot
//! layer that the rest of schoolmark builds on.

pub mod aggregate;
pub mod error;
pub mod model;
pub mod repository;
pub mod snapshot;
