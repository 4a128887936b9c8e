//! Unified diff of a file against its formatted form

use similar::TextDiff;

/// Lines of unchanged context around each hunk
const CONTEXT_LINES: usize = 3;

/// Render a unified diff from `original` to `formatted`
///
/// Returns `None` when formatting changes nothing.
#[must_use]
pub fn unified_diff(name: &str, original: &str, formatted: &str) -> Option<String> {
    if original == formatted {
        return None;
    }
    let diff = TextDiff::from_lines(original, formatted);
    let rendered = diff
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(name, &format!("{name} (formatted)"))
        .to_string();
    Some(rendered)
}
