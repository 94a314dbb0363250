//! Gantry: optimistic move coordination for pipeline boards.
//!
//! This crate is the core that moves a work item between pipeline steps on
//! an interactive board while keeping the locally cached, per-pipeline
//! snapshot optimistically consistent with a remote authoritative store.
//! It protects three invariants: dense ordering of tasks within a step,
//! at most one in-flight move per task, and exact rollback on failure.
//!
//! # Architecture
//!
//! Gantry follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (cache, test doubles)
//!
//! Rendering, gesture recognition, and CRUD hydration of pipelines are
//! external collaborators; gantry is a pure in-memory coordination layer
//! between a UI gesture and a remote RPC boundary.
//!
//! # Modules
//!
//! - [`board`]: snapshot cache, drag sessions, optimistic moves, automation
//! - [`cancel`]: cooperative cancellation for in-flight remote calls

pub mod board;
pub mod cancel;
