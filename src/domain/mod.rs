//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `ranking` - Pure domain services for multi-criteria forwarder ranking

pub mod foundation;
pub mod ranking;
