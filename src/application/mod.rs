//! Application Layer
//!
//! Repositories and the reporting engine - the surface the UI (or the
//! CLI) consumes. Everything returns plain data; nothing here renders.

pub mod export;
pub mod reporting;
pub mod repositories;
