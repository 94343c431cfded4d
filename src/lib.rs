//! Sightline: accessibility check task management.
//!
//! This crate holds the core of an accessibility-testing service: the rules
//! that decide whether a submitted task (a page URL plus scan options) is
//! accepted, how loosely typed client input is canonicalized, and how edits
//! are merged into stored tasks with an audit trail.
//!
//! # Architecture
//!
//! Sightline follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and validation
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task creation, editing, and annotation history

pub mod task;
