//! Task request validation.
//!
//! [`rules`] holds one pure function per field; [`service`] combines them
//! into the default [`TaskValidator`](crate::task::ports::validator::TaskValidator).

pub mod rules;
pub mod service;

pub use service::DefaultTaskValidator;
