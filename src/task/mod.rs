//! Accessibility check task submission.
//!
//! This module accepts task create and edit requests from an outer API
//! layer, canonicalizes and validates their fields, and records every
//! accepted edit in an append-only annotation log. The module follows
//! hexagonal architecture:
//!
//! - Domain types and the edit applier in [`domain`]
//! - Input canonicalization in [`normalize`]
//! - Field rules and the default validator in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
