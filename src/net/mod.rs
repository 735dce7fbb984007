//! Networking modules for the identity backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the HTTP seam used by the remote gateway and `types`
//! defines the shared wire schema.

pub mod transport;
pub mod types;
