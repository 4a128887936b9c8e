//! SQL lexical infrastructure.
//!
//! No SQL grammar is parsed; everything here works on plain text:
//! - [`registry`]: Static keyword and function registries and the regexes built from them
//! - [`patterns`]: Precompiled regex patterns for the layout rules
//! - [`protect`]: Extraction of comments and function calls into a span table
//!
//! Protected spans are replaced by single token characters, so the layout
//! rules can never reach inside a comment or a function's argument list.

pub mod patterns;
pub mod protect;
pub mod registry;

pub use protect::{
    classify_token, is_token, protect_comments, protect_function_calls, CommentLine, Protected,
    SpanKind, SpanTable,
};
