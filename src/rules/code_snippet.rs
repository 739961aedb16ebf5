//! GitHub code-snippet embeds back to plain permalinks.
//!
//! When a comment links to a line range (`.../blob/<ref>/<path>#L10-L20`),
//! GitHub renders the link as a `<div>` widget holding the permalink plus a
//! highlighted table of the referenced lines. Converting that widget
//! naively drags the whole table into the markdown. This rule replaces the
//! widget with the permalink itself.
//!
//! The matching logic is generic over [`Node`], so it runs on any DOM:
//!
//! ```rust
//! use scraper::{Html, Selector};
//! use snipdown::rules::code_snippet::{collapse, match_snippet};
//!
//! let doc = Html::parse_fragment(
//!     r#"<div><a href="https://github.com/o/r/blob/main/a.rs#L3-L5">a.rs</a><table></table></div>"#,
//! );
//! let div = doc.select(&Selector::parse("div").unwrap()).next().unwrap();
//!
//! let link = collapse(match_snippet(&div)).unwrap();
//! assert_eq!(link, "https://github.com/o/r/blob/main/a.rs#L3-L5");
//! ```

use scraper::ElementRef;

use super::Rule;
use crate::content::Converter;
use crate::error::{ConvertError, Result};
use crate::node::Node;
use crate::options::Options;

/// Registry key of this rule.
pub const RULE_KEY: &str = "code-snippet";

const PERMALINK_PREFIX: &str = "https://github.com";
const LINE_MARKER: &str = "#L";

/// Whether `href` is a GitHub permalink to a line range.
///
/// Only the host prefix and the `#L` marker are checked; the path and query
/// are taken as they are.
pub fn is_line_permalink(href: &str) -> bool {
    href.starts_with(PERMALINK_PREFIX) && href.contains(LINE_MARKER)
}

/// First descendant anchor of `node` pointing at a line permalink.
pub fn find_permalink_anchor<N: Node>(node: &N) -> Option<N> {
    node.query_selector(|el| {
        el.tag_name().eq_ignore_ascii_case("a") && el.attr("href").is_some_and(is_line_permalink)
    })
}

/// Match phase: the permalink anchor if `node` is a snippet widget.
///
/// A widget is a `div` with at least one qualifying descendant anchor.
/// With several, the first in document order is returned.
pub fn match_snippet<N: Node>(node: &N) -> Option<N> {
    if !node.tag_name().eq_ignore_ascii_case("div") {
        return None;
    }
    find_permalink_anchor(node)
}

/// Replace phase: the anchor's address, verbatim.
///
/// `None` means the match phase never found an anchor, which is reported as
/// [`ConvertError::NoMatchingAnchor`] instead of producing output.
pub fn collapse<N: Node>(anchor: Option<N>) -> Result<String> {
    anchor
        .as_ref()
        .and_then(|a| a.attr("href"))
        .map(str::to_string)
        .ok_or(ConvertError::NoMatchingAnchor { rule: RULE_KEY })
}

/// [`Rule`] adapter registered under [`RULE_KEY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeSnippetRule;

impl Rule for CodeSnippetRule {
    fn filter(&self, node: ElementRef<'_>, _options: &Options) -> bool {
        match_snippet(&node).is_some()
    }

    fn uses_content(&self) -> bool {
        false
    }

    fn replacement(
        &self,
        _content: &str,
        node: ElementRef<'_>,
        _options: &Options,
    ) -> Result<String> {
        collapse(find_permalink_anchor(&node))
    }
}

/// Install the rule on `converter`, returning it for chaining.
pub fn install(converter: &mut Converter) -> &mut Converter {
    converter.add_rule(RULE_KEY, CodeSnippetRule)
}
