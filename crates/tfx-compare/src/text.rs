//! Line based text diffing

use similar::TextDiff;

/// Lines of context around each change
const CONTEXT_LINES: usize = 3;

/// Unified diff between two texts, split on `\n`
///
/// Labels default to `first` and `second`.
///
/// ```
/// let text = tfx_compare::diff("a\nb", "a\nc", None, None);
/// assert_eq!(text, "--- first\n+++ second\n@@ -1,2 +1,2 @@\n a\n-b\n+c");
/// ```
pub fn diff(x: &str, y: &str, x_label: Option<&str>, y_label: Option<&str>) -> String {
    let x_lines: Vec<&str> = x.split('\n').collect();
    let y_lines: Vec<&str> = y.split('\n').collect();
    let text_diff = TextDiff::from_slices(&x_lines, &y_lines);

    let mut lines = Vec::new();
    let mut unified = text_diff.unified_diff();
    for hunk in unified.context_radius(CONTEXT_LINES).iter_hunks() {
        if lines.is_empty() {
            lines.push(format!("--- {}", x_label.unwrap_or("first")));
            lines.push(format!("+++ {}", y_label.unwrap_or("second")));
        }
        lines.push(hunk.header().to_string());
        for change in hunk.iter_changes() {
            lines.push(format!("{}{}", change.tag(), change.value()));
        }
    }
    lines.join("\n")
}

/// Render tabs, carriage returns, backslashes and line ends visibly
pub fn show_whitespace(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
        .replace('\n', "\\n\n")
}

pub fn strip_trailing_whitespace(text: &str) -> String {
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn drop_blank_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
