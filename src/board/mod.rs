//! Board move coordination.
//!
//! This module owns the only subsystem of the surrounding application with
//! real invariants to protect: moving a task between pipeline steps while
//! keeping the locally cached snapshot optimistically consistent with the
//! authoritative store, under latency, concurrent gestures, and stage-entry
//! automation. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
