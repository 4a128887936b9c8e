//! Protected-span extraction
//!
//! Comments and function calls must survive layout untouched. Each one is
//! cut out of the working text and replaced by a single token character
//! drawn from Unicode plane 15 (Supplementary Private Use Area-A). The plane
//! is split into one channel per [`SpanKind`]; a token's code point names
//! both its channel and its slot, so the span table needs no marker strings.
//!
//! Any plane-15 character already present in the input is itself moved into
//! the [`SpanKind::Verbatim`] channel first, so a token can never be confused
//! with input text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::parser::registry::{alternation, build_re, FUNCTIONS};

/// First code point of the token range
const TOKEN_BASE: u32 = 0xF_0000;
/// Slots per channel
const CHANNEL_SIZE: u32 = 0x4000;

/// Channel a protected span belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Input characters that collide with the token range
    Verbatim = 0,
    /// Known function call including its argument list
    Function = 1,
    /// `/* ... */`
    BlockComment = 2,
    /// `-- ...` trailing code on the same line
    InlineComment = 3,
}

impl SpanKind {
    const ALL: [SpanKind; 4] = [
        SpanKind::Verbatim,
        SpanKind::Function,
        SpanKind::BlockComment,
        SpanKind::InlineComment,
    ];

    fn first_code(self) -> u32 {
        TOKEN_BASE + (self as u32) * CHANNEL_SIZE
    }

    /// Regex character-class body covering this channel's tokens
    #[must_use]
    pub fn class_body(self) -> String {
        let first = self.first_code();
        format!(r"\x{{{first:X}}}-\x{{{:X}}}", first + CHANNEL_SIZE - 1)
    }
}

/// Decode a token character into its channel and slot
#[must_use]
pub fn classify_token(c: char) -> Option<(SpanKind, usize)> {
    let code = c as u32;
    if !(TOKEN_BASE..TOKEN_BASE + 4 * CHANNEL_SIZE).contains(&code) {
        return None;
    }
    let offset = code - TOKEN_BASE;
    let kind = SpanKind::ALL[(offset / CHANNEL_SIZE) as usize];
    Some((kind, (offset % CHANNEL_SIZE) as usize))
}

/// Check whether a character lies in the token range
#[must_use]
pub fn is_token(c: char) -> bool {
    classify_token(c).is_some()
}

/// Original text of every protected span, one ordered list per channel
#[derive(Debug, Clone, Default)]
pub struct SpanTable {
    channels: [Vec<String>; 4],
}

impl SpanTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a span and return its token, or `None` once the channel is full
    pub fn insert(&mut self, kind: SpanKind, original: String) -> Option<char> {
        let channel = &mut self.channels[kind as usize];
        let slot = u32::try_from(channel.len()).ok()?;
        if slot >= CHANNEL_SIZE {
            return None;
        }
        let token = char::from_u32(kind.first_code() + slot)?;
        channel.push(original);
        Some(token)
    }

    /// Look up the span behind a token
    #[must_use]
    pub fn get(&self, token: char) -> Option<(SpanKind, &str)> {
        let (kind, slot) = classify_token(token)?;
        self.channels[kind as usize]
            .get(slot)
            .map(|original| (kind, original.as_str()))
    }

    /// Number of spans stored in a channel
    #[must_use]
    pub fn len(&self, kind: SpanKind) -> usize {
        self.channels[kind as usize].len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(Vec::is_empty)
    }

    /// Replace every token with its original text, recursively
    #[must_use]
    pub fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.expand_into(text, &mut out);
        out
    }

    fn expand_into(&self, text: &str, out: &mut String) {
        for c in text.chars() {
            match self.get(c) {
                Some((SpanKind::Verbatim, original)) => out.push_str(original),
                Some((_, original)) => self.expand_into(original, out),
                None => out.push(c),
            }
        }
    }

    /// Width of `text` once its tokens are restored
    #[must_use]
    pub fn display_width(&self, text: &str) -> usize {
        text.chars()
            .map(|c| match self.get(c) {
                Some((SpanKind::Verbatim, original)) => original.chars().count(),
                Some((_, original)) => self.display_width(original),
                None => 1,
            })
            .sum()
    }
}

/// A comment-only line lifted out of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    /// Number of non-comment lines that preceded it in the input
    pub index: usize,
    /// The comment, trimmed
    pub text: String,
}

/// Working text with comments extracted
#[derive(Debug, Clone, Default)]
pub struct Protected {
    pub text: String,
    pub spans: SpanTable,
    pub comment_lines: Vec<CommentLine>,
}

static INLINE_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--[^\n]*").expect("valid inline comment pattern"));

static BLOCK_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment pattern"));

/// Known function call with up to one level of nested parentheses and an
/// optional `OVER (...)` window. Inline-comment tokens may not appear inside.
static FUNCTION_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let inline = SpanKind::InlineComment.class_body();
    let args = format!(r"\((?:[^(){inline}]|\([^(){inline}]*\))*\)");
    build_re(&format!(
        r"\b(?:{})\s*{args}(?:\s*\bOVER\s*{args})?",
        alternation(FUNCTIONS)
    ))
});

/// Move every match of `re` into the span table.
///
/// Matches that no longer fit in the channel stay in the text.
fn extract<'t>(
    text: &'t str,
    re: &Regex,
    kind: SpanKind,
    spans: &mut SpanTable,
    inserted: &mut usize,
) -> Cow<'t, str> {
    re.replace_all(text, |caps: &Captures<'_>| {
        let matched = &caps[0];
        let original = if kind == SpanKind::InlineComment {
            matched.trim_end()
        } else {
            matched
        };
        match spans.insert(kind, original.to_string()) {
            Some(token) => {
                *inserted += 1;
                let rest = &matched[original.len()..];
                format!("{token}{rest}")
            }
            None => matched.to_string(),
        }
    })
}

/// Extract comment-only lines, inline comments and block comments, in that order
///
/// Line endings are normalized to `\n` first. Quoted literals are not
/// recognized, so a `--` or `/*` inside a string is treated as a comment.
#[must_use]
pub fn protect_comments(source: &str) -> Protected {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");

    let mut kept: Vec<&str> = Vec::new();
    let mut comment_lines = Vec::new();
    for line in normalized.split('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with("--") {
            comment_lines.push(CommentLine {
                index: kept.len(),
                text: trimmed.to_string(),
            });
        } else {
            kept.push(line);
        }
    }
    let joined = kept.join("\n");

    let mut spans = SpanTable::new();
    let mut inserted = 0;

    let escaped: String = if joined.chars().any(is_token) {
        let mut unescaped = 0usize;
        let escaped: String = joined
            .chars()
            .map(|c| {
                if !is_token(c) {
                    return c;
                }
                spans
                    .insert(SpanKind::Verbatim, c.to_string())
                    .unwrap_or_else(|| {
                        unescaped += 1;
                        c
                    })
            })
            .collect();
        if unescaped > 0 {
            tracing::warn!(
                unescaped,
                "too many private-use characters to escape; the rest are left in place"
            );
        }
        escaped
    } else {
        joined
    };

    let text = extract(
        &escaped,
        &INLINE_COMMENT_RE,
        SpanKind::InlineComment,
        &mut spans,
        &mut inserted,
    )
    .into_owned();
    let text = extract(
        &text,
        &BLOCK_COMMENT_RE,
        SpanKind::BlockComment,
        &mut spans,
        &mut inserted,
    )
    .into_owned();

    tracing::trace!(
        comment_lines = comment_lines.len(),
        inline = spans.len(SpanKind::InlineComment),
        block = spans.len(SpanKind::BlockComment),
        "comments protected"
    );

    Protected {
        text,
        spans,
        comment_lines,
    }
}

/// Replace registry function calls with tokens
///
/// Runs to a fixpoint: each round protects calls with at most one level of
/// nested parentheses, which turns the next enclosing call into such a call.
#[must_use]
pub fn protect_function_calls(text: &str, spans: &mut SpanTable) -> String {
    let mut current = text.to_string();
    loop {
        let mut inserted = 0;
        let next = extract(
            &current,
            &FUNCTION_CALL_RE,
            SpanKind::Function,
            spans,
            &mut inserted,
        )
        .into_owned();
        current = next;
        if inserted == 0 {
            break;
        }
    }
    current
}
