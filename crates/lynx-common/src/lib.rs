//! Common utilities for the Lynx layout core.
//!
//! This crate provides shared infrastructure used by all layout components:
//! - **Warning System** - colored, deduplicated terminal output for
//!   recoverable oddities (clamped inputs, disobeyed enforced sizes)

pub mod warning;
