//! Command handlers.
//!
//! Each handler takes an already-built resolver, runs one query and formats
//! the answer for the terminal. Failures come back as `anyhow` errors so the
//! binary exits non-zero.

pub mod find;
pub mod roots;
