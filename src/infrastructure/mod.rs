//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports plus the DataStore
//! that owns serialization.

pub mod backend;
pub mod store;
