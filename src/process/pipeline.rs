//! Ordered formatting pipeline
//!
//! 1. Extract comments into the span table
//! 2. Collapse whitespace, then extract function calls
//! 3. Run the layout stages in [`LAYOUT_STAGES`] order
//! 4. Restore spans line by line and splice comment-only lines back in
//!
//! Stage order is part of the output contract: clause breaks must exist
//! before commas are placed, and every line must be final before CTE
//! bodies are indented.

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::format::{
    align_aliases, break_after_inline_comments, break_clauses, collapse_blank_lines,
    collapse_whitespace, convert_keyword_case, indent_boolean_continuations, indent_ctes,
    join_on_clauses, layout_group_by, place_commas, restore_spans, splice_comment_lines,
    split_statements, trim_lines,
};
use crate::parser::{protect_comments, protect_function_calls, Protected, SpanTable};
use crate::Result;

/// Read-only state shared by the layout stages of one call
pub struct LayoutContext<'a> {
    pub config: &'a Config,
    pub spans: &'a SpanTable,
}

/// A named `text -> text` rewrite
pub struct Stage {
    pub name: &'static str,
    pub run: fn(String, &LayoutContext<'_>) -> String,
}

fn keyword_case(text: String, ctx: &LayoutContext<'_>) -> String {
    convert_keyword_case(&text, ctx.config.keyword_case)
}

fn clause_breaks(text: String, ctx: &LayoutContext<'_>) -> String {
    break_clauses(&text, ctx.config.keyword_case)
}

fn alias_alignment(text: String, ctx: &LayoutContext<'_>) -> String {
    align_aliases(&text, ctx.spans)
}

fn comma_placement(text: String, ctx: &LayoutContext<'_>) -> String {
    place_commas(&text, ctx.config.comma_position)
}

fn inline_comment_breaks(text: String, _ctx: &LayoutContext<'_>) -> String {
    break_after_inline_comments(&text)
}

fn statement_terminators(text: String, _ctx: &LayoutContext<'_>) -> String {
    split_statements(&text)
}

fn group_by_lists(text: String, ctx: &LayoutContext<'_>) -> String {
    layout_group_by(
        &text,
        ctx.config.comma_position,
        ctx.config.group_by_single_line,
    )
}

fn join_on(text: String, _ctx: &LayoutContext<'_>) -> String {
    join_on_clauses(&text)
}

fn boolean_continuations(text: String, _ctx: &LayoutContext<'_>) -> String {
    indent_boolean_continuations(&text)
}

fn blank_lines(text: String, _ctx: &LayoutContext<'_>) -> String {
    collapse_blank_lines(&text)
}

fn cte_indentation(text: String, ctx: &LayoutContext<'_>) -> String {
    indent_ctes(&text, ctx.config.cte_indent)
}

fn trailing_whitespace(text: String, _ctx: &LayoutContext<'_>) -> String {
    trim_lines(&text)
}

/// Layout stages in execution order
pub const LAYOUT_STAGES: &[Stage] = &[
    Stage {
        name: "keyword_case",
        run: keyword_case,
    },
    Stage {
        name: "clause_breaks",
        run: clause_breaks,
    },
    Stage {
        name: "alias_alignment",
        run: alias_alignment,
    },
    Stage {
        name: "comma_placement",
        run: comma_placement,
    },
    Stage {
        name: "inline_comment_breaks",
        run: inline_comment_breaks,
    },
    Stage {
        name: "statement_terminators",
        run: statement_terminators,
    },
    Stage {
        name: "group_by_lists",
        run: group_by_lists,
    },
    Stage {
        name: "join_on",
        run: join_on,
    },
    Stage {
        name: "boolean_continuations",
        run: boolean_continuations,
    },
    Stage {
        name: "blank_lines",
        run: blank_lines,
    },
    Stage {
        name: "cte_indentation",
        run: cte_indentation,
    },
    Stage {
        name: "trailing_whitespace",
        run: trailing_whitespace,
    },
];

/// Run every layout stage over the working text
#[must_use]
pub fn run_layout(text: String, ctx: &LayoutContext<'_>) -> String {
    LAYOUT_STAGES.iter().fold(text, |text, stage| {
        let next = (stage.run)(text, ctx);
        tracing::trace!(stage = stage.name, lines = next.lines().count(), "stage done");
        next
    })
}

/// Format one SQL fragment
///
/// Total over its input: malformed SQL is laid out as far as the rules
/// match and never rejected.
#[must_use]
pub fn format_sql(source: &str, config: &Config) -> String {
    let Protected {
        text,
        mut spans,
        comment_lines,
    } = protect_comments(source);

    let text = collapse_whitespace(&text);
    let text = protect_function_calls(&text, &mut spans);

    let ctx = LayoutContext {
        config,
        spans: &spans,
    };
    let laid_out = run_layout(text, &ctx);

    let lines: Vec<String> = laid_out
        .lines()
        .map(|line| restore_spans(line, &spans, config.function_case))
        .collect();
    let lines = splice_comment_lines(lines, &comment_lines);

    tracing::debug!(
        input_bytes = source.len(),
        output_lines = lines.len(),
        comment_lines = comment_lines.len(),
        "formatted SQL fragment"
    );

    lines.join("\n").trim().to_string()
}

/// Format a whole SQL file
///
/// Non-empty output ends with a single newline.
pub fn format_file<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
    filename: &str,
) -> Result<()> {
    let mut source = String::new();
    let mut reader = input;
    reader.read_to_string(&mut source)?;

    tracing::debug!(file = filename, bytes = source.len(), "formatting file");

    let formatted = format_sql(&source, config);
    if !formatted.is_empty() {
        output.write_all(formatted.as_bytes())?;
        output.write_all(b"\n")?;
    }
    Ok(())
}
