//! Shared contracts for the device service admin frontend.
//!
//! Everything here is plain Rust with no browser dependencies: DTOs received
//! from the backend services, wire envelopes, service endpoint configuration
//! and the list query utilities every list page builds on.

pub mod domain;
pub mod shared;
pub mod system;
