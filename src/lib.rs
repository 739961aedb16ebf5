//! `snipdown` - HTML to markdown with GitHub code-snippet collapsing
//!
//! GitHub renders a comment link to a line range (`.../file.rs#L10-L20`) as
//! an embedded widget with the referenced lines. Converting such comments
//! to markdown normally drags the widget's table along. The
//! [`code_snippet`](rules::code_snippet) rule turns the widget back into
//! the bare permalink.
//!
//! # Features
//!
//! - **Converter**: depth-first HTML to CommonMark walker over `scraper`
//! - **Rules**: keyed filter/replacement pairs that take over elements
//! - **Node**: three-operation element interface rules are written against
//! - **Config**: TOML options and rule toggles
//!
//! # Example
//!
//! ```rust
//! use snipdown::{rules::code_snippet, Converter};
//!
//! let mut converter = Converter::new();
//! converter.use_plugin(code_snippet::install);
//!
//! let html = r#"<div class="border rounded-1">
//!   <p><a href="https://github.com/o/r/blob/main/src/lib.rs#L10-L20">src/lib.rs</a></p>
//!   <table><tr><td>10</td><td>fn main() {}</td></tr></table>
//! </div>"#;
//! let md = converter.convert(html).unwrap().markdown;
//! assert_eq!(md, "https://github.com/o/r/blob/main/src/lib.rs#L10-L20");
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod node;
pub mod options;
pub mod rules;

pub use config::{load_config, Config};
pub use content::{ConversionResult, Converter};
pub use error::{ConvertError, Result};
pub use node::Node;
pub use options::{CodeBlockStyle, HeadingStyle, Options};
pub use rules::{code_snippet::CodeSnippetRule, Rule, RuleSet};
