//! Rendering options shared by the converter and every registered rule.

use serde::Deserialize;

/// Heading syntax for `h1` and `h2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStyle {
    /// Underlined with `=` / `-`. Levels 3-6 still use `#`.
    #[default]
    Setext,
    /// `#`-prefixed at every level.
    Atx,
}

/// Syntax for `<pre>` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeBlockStyle {
    #[default]
    Indented,
    Fenced,
}

/// Markdown rendering options.
///
/// Every field has a default, so a partial TOML table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    pub heading_style: HeadingStyle,
    /// Thematic break emitted for `<hr>`.
    pub hr: String,
    pub bullet_list_marker: String,
    pub code_block_style: CodeBlockStyle,
    /// Fence used when `code_block_style` is `fenced`.
    pub fence: String,
    pub em_delimiter: String,
    pub strong_delimiter: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Setext,
            hr: "* * *".to_string(),
            bullet_list_marker: "*".to_string(),
            code_block_style: CodeBlockStyle::Indented,
            fence: "```".to_string(),
            em_delimiter: "_".to_string(),
            strong_delimiter: "**".to_string(),
        }
    }
}
