//! Client-side session lifecycle.
//!
//! ARCHITECTURE
//! ============
//! `storage` is the raw key-value backend, `token_store` owns the persisted
//! tokens and profile on top of it, `query_cache` holds derived reads, and
//! `controller` ties them to a gateway and exposes state to the UI.

pub mod controller;
pub mod query_cache;
pub mod storage;
pub mod token_store;
