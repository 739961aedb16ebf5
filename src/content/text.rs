//! Text-level helpers: whitespace collapsing, markdown escaping and final
//! output cleanup.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\r\x0C]+").expect("valid regex"));

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Markdown-significant patterns and their escaped replacements.
///
/// `^` anchors apply per line: escaping runs on single text nodes, so a
/// leading `-` or `#` could otherwise start a list item or heading.
static ESCAPES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\\", r"\\"),
        (r"\*", r"\*"),
        (r"(?m)^-", r"\-"),
        (r"(?m)^\+ ", r"\+ "),
        (r"(?m)^(=+)", r"\$1"),
        (r"(?m)^(#{1,6}) ", r"\$1 "),
        (r"`", r"\`"),
        (r"(?m)^~~~", r"\~~~"),
        (r"\[", r"\["),
        (r"\]", r"\]"),
        (r"(?m)^>", r"\>"),
        (r"_", r"\_"),
        (r"(?m)^(\d+)\. ", r"${1}\. "),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), replacement))
    .collect()
});

/// Collapse every run of HTML whitespace to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Backslash-escape characters that would otherwise be read as markdown.
pub fn escape(text: &str) -> String {
    ESCAPES
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

/// At most one blank line between blocks.
pub fn squeeze_blank_lines(markdown: &str) -> String {
    EXCESS_NEWLINES.replace_all(markdown, "\n\n").into_owned()
}

/// Normalize assembled output: blank lines squeezed, no leading or trailing
/// blank space.
pub fn finish(markdown: &str) -> String {
    squeeze_blank_lines(markdown)
        .trim_start_matches(['\n', '\r', '\t'])
        .trim_end()
        .to_string()
}

/// Indent every non-empty line after the first by `indent`.
pub fn indent_continuation(text: &str, indent: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(indent);
            }
        }
        out.push_str(line);
    }
    out
}

/// Longest run of `ch` anywhere in `text`.
pub fn longest_run(text: &str, ch: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b\r\nc"), "a b c");
    }

    #[test]
    fn keeps_non_breaking_space() {
        assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b"), "a\u{a0}\u{a0}b");
    }

    #[test]
    fn escapes_inline_markers() {
        assert_eq!(escape("snake_case *bold* [x]"), r"snake\_case \*bold\* \[x\]");
        assert_eq!(escape("a `tick`"), r"a \`tick\`");
        assert_eq!(escape(r"back\slash"), r"back\\slash");
    }

    #[test]
    fn escapes_line_start_markers_only_at_line_start() {
        assert_eq!(escape("- item"), r"\- item");
        assert_eq!(escape("a - b"), "a - b");
        assert_eq!(escape("# title"), r"\# title");
        assert_eq!(escape("1. first"), r"1\. first");
        assert_eq!(escape("> quote"), r"\> quote");
        assert_eq!(escape("+ plus"), r"\+ plus");
        assert_eq!(escape("=== rule"), r"\=== rule");
    }

    #[test]
    fn finish_squeezes_blank_lines_and_trims() {
        assert_eq!(finish("\n\n\na\n\n\n\nb\n\n"), "a\n\nb");
    }

    #[test]
    fn indent_skips_blank_lines() {
        assert_eq!(indent_continuation("a\n\nb\nc", "    "), "a\n\n    b\n    c");
    }

    #[test]
    fn longest_run_counts_consecutive_chars() {
        assert_eq!(longest_run("a``b```c`", '`'), 3);
        assert_eq!(longest_run("none", '`'), 0);
    }
}
