//! Artifact inventory normalization and build advisory engine.
//!
//! Raw showcase or portable-export payloads are normalized by [`inventory`]
//! into canonical items and holders, which [`advisor`] scores against the
//! static build profile database.

pub mod advisor;
pub mod config;
pub mod error;
pub mod inventory;
pub mod telemetry;
