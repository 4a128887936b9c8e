//! Error types and result aliases for sqlprettier.
//!
//! The formatting engine never fails; errors only arise at the boundary
//! (reading inputs, parsing config files, validating options).
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
