use std::sync::LazyLock;

use regex::Regex;

static HORIZONTAL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid pattern"));

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid pattern"));

/// Collapse spaces and tabs, trim every line, cap blank-line runs at one and
/// trim the result.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let collapsed = HORIZONTAL_WS.replace_all(&text, " ");
    let lines: Vec<&str> = collapsed.split('\n').map(str::trim).collect();
    let joined = lines.join("\n");
    BLANK_RUN.replace_all(&joined, "\n\n").trim().to_string()
}
