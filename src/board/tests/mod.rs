//! Unit tests for the board module.
//!
//! Tests are organised by component: domain types, the snapshot aggregate,
//! placement and adjacency validation, the optimistic move service, the
//! automation trigger, and the drag coordinator.

mod support;
