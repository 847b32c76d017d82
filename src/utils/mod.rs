//! Utility functions and helpers
//!
//! Atomic file writes and timestamp helpers.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write, cleanup_temp_files};
pub use time::{days_before, format_display, format_timestamp, now_timestamp, parse_timestamp};
