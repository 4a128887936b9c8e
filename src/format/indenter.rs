//! CTE body indentation
//!
//! A line ending in `<name> AS (` opens a CTE body. Every following line is
//! indented until the parenthesis that opened the body is closed again;
//! parentheses inside the body are counted, so subexpressions do not end it
//! early. The closing `)` and anything after it go back to the outer level,
//! where the next CTE in the list can open.
//!
//! The tracker is a fold over the line sequence. Each step takes the state
//! left by the previous line and returns the state for the next one.

use crate::parser::patterns::CTE_OPEN_RE;

/// Position of the tracker between two lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CteState {
    #[default]
    Outside,
    /// Inside a CTE body with this many unclosed parentheses
    InsideCte(usize),
}

/// Net parenthesis count of a line (opens minus closes)
pub(crate) fn paren_balance(line: &str) -> isize {
    line.chars().fold(0, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

/// Tracker over the formatted lines
#[derive(Debug)]
pub struct CteIndenter {
    indent: String,
    state: CteState,
    lines: Vec<String>,
}

impl CteIndenter {
    #[must_use]
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent: " ".repeat(indent_width),
            state: CteState::Outside,
            lines: Vec::new(),
        }
    }

    /// State after the last processed line
    #[must_use]
    pub fn state(&self) -> CteState {
        self.state
    }

    /// Process one line, updating the state
    pub fn push_line(&mut self, line: &str) {
        let state = self.state;
        self.state = self.step(state, line);
    }

    /// Processed lines
    #[must_use]
    pub fn finish(self) -> Vec<String> {
        self.lines
    }

    fn step(&mut self, state: CteState, line: &str) -> CteState {
        match state {
            CteState::Outside => self.step_outside(line),
            CteState::InsideCte(depth) => self.step_inside(depth, line),
        }
    }

    fn step_outside(&mut self, line: &str) -> CteState {
        if !CTE_OPEN_RE.is_match(line) {
            self.lines.push(line.to_string());
            return CteState::Outside;
        }
        self.lines.push(line.trim_start().to_string());
        match usize::try_from(paren_balance(line)) {
            Ok(depth) if depth > 0 => CteState::InsideCte(depth),
            _ => CteState::Outside,
        }
    }

    fn step_inside(&mut self, depth: usize, line: &str) -> CteState {
        let mut depth = depth;
        for (i, c) in line.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let body = line[..i].trim_end();
                        if !body.trim().is_empty() {
                            self.lines.push(format!("{}{body}", self.indent));
                        }
                        return self.step_outside(&line[i..]);
                    }
                }
                _ => {}
            }
        }
        self.lines.push(format!("{}{line}", self.indent));
        CteState::InsideCte(depth)
    }
}

/// Indent the bodies of all CTEs in `text`
///
/// An unterminated body leaves the remaining lines indented; that is not an
/// error.
#[must_use]
pub fn indent_ctes(text: &str, indent_width: usize) -> String {
    let mut indenter = CteIndenter::new(indent_width);
    for line in text.lines() {
        indenter.push_line(line);
    }
    if indenter.state() != CteState::Outside {
        tracing::debug!(state = ?indenter.state(), "unterminated CTE body");
    }
    indenter.finish().join("\n")
}
