//! Fragment and file processing.
//!
//! The pipeline runs in four phases:
//!
//! **Protection:**
//! - Comment-only lines are lifted out with their line index
//! - Inline and block comments, then function calls, become single tokens
//!
//! **Normalization:**
//! - Whitespace is collapsed and keywords are re-cased
//!
//! **Layout:**
//! - Clause breaks, alias alignment, commas, `GROUP BY` lists, `ON` joining,
//!   `AND`/`OR` indentation, terminators and CTE bodies
//!
//! **Restoration:**
//! - Tokens become their original text again and comment lines are spliced back
//!
//! [`format_sql`] formats a string; [`format_file`] wraps it for readers and
//! writers. [`unified_diff`] renders what formatting would change.

pub mod diff;
pub mod pipeline;

pub use diff::unified_diff;
pub use pipeline::{format_file, format_sql, LayoutContext, Stage, LAYOUT_STAGES};
