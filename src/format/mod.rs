//! SQL layout rules.
//!
//! Each submodule holds one family of `text -> text` rewrites over the
//! placeholder-substituted working text:
//! - [`whitespace`]: Collapsing and trimming whitespace
//! - [`case_convert`]: Keyword and function-name case
//! - [`line_split`]: Clause breaks, inline-comment breaks, `ON` joining, terminators
//! - [`aligner`]: Alias alignment
//! - [`commas`]: List comma placement
//! - [`continuation`]: `GROUP BY` item lines and `AND`/`OR` indentation
//! - [`indenter`]: CTE body indentation
//! - [`restore`]: Restoring protected spans and comment-only lines
//!
//! The order in which they run is fixed by [`crate::process::pipeline`].

pub mod aligner;
pub mod case_convert;
pub mod commas;
pub mod continuation;
pub mod indenter;
pub mod line_split;
pub mod restore;
pub mod whitespace;

pub use aligner::{align_aliases, standardize_as_spacing};
pub use case_convert::{apply_case, convert_function_case, convert_keyword_case};
pub use commas::place_commas;
pub use continuation::{indent_boolean_continuations, layout_group_by};
pub use indenter::{indent_ctes, CteIndenter, CteState};
pub use line_split::{
    break_after_inline_comments, break_clauses, join_on_clauses, split_statements,
};
pub use restore::{restore_spans, splice_comment_lines};
pub use whitespace::{collapse_blank_lines, collapse_whitespace, trim_lines};
