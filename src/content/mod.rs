//! HTML to markdown conversion with pluggable rules.
//!
//! [`Converter`] walks a parsed document depth-first. Registered
//! [`Rule`]s get the first look at each element; everything else goes
//! through the built-in CommonMark rendering in [`html`].
//!
//! # Example
//!
//! ```rust
//! use snipdown::{rules::code_snippet, Converter};
//!
//! let mut converter = Converter::new();
//! converter.use_plugin(code_snippet::install);
//!
//! let html = r#"<p>See:</p><div><a href="https://github.com/o/r/blob/main/lib.rs#L1-L4">lib.rs</a><table><tr><td>1</td></tr></table></div>"#;
//! let result = converter.convert(html).unwrap();
//! assert_eq!(result.markdown, "See:\n\nhttps://github.com/o/r/blob/main/lib.rs#L1-L4");
//! assert_eq!(result.replacements, 1);
//! ```

pub mod html;
pub mod text;

use std::time::Instant;

use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::options::Options;
use crate::rules::{Rule, RuleSet};

/// Metadata about a conversion.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The converted markdown content.
    pub markdown: String,
    /// Number of elements replaced by a registered rule.
    pub replacements: usize,
    /// Conversion time in milliseconds, parsing included.
    pub elapsed_ms: f64,
}

/// Converts HTML to markdown, consulting registered rules first.
///
/// Conversion is synchronous and keeps no state between calls, so one
/// converter can be shared across threads once its rules are set up.
pub struct Converter {
    options: Options,
    rules: RuleSet,
}

impl Converter {
    /// Converter with default options and no rules.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: RuleSet::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Register `rule` under `key`. An existing rule with the same key is
    /// replaced, so the last registration wins.
    pub fn add_rule<R: Rule + 'static>(&mut self, key: impl Into<String>, rule: R) -> &mut Self {
        self.rules.add(key, Box::new(rule));
        self
    }

    pub fn remove_rule(&mut self, key: &str) -> bool {
        self.rules.remove(key)
    }

    /// Apply a plugin, i.e. a function that registers rules and hands the
    /// converter back.
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> &mut Self,
    {
        plugin(self)
    }

    pub fn has_rule(&self, key: &str) -> bool {
        self.rules.contains(key)
    }

    /// Registered rule keys, in lookup order.
    pub fn rule_keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys()
    }

    /// Convert an HTML document or fragment.
    ///
    /// Only `<body>` content is converted; `<head>` is ignored.
    pub fn convert(&self, html: &str) -> Result<ConversionResult> {
        let start = Instant::now();
        let document = Html::parse_document(html);
        let root = document.root_element();
        let body = root
            .children()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "body")
            .unwrap_or(root);

        let mut state = html::WalkState::default();
        let raw = html::convert_children(self, body, &mut state)?;
        Ok(finish(&raw, &state, start))
    }

    /// Convert an already parsed element, the element itself included.
    pub fn convert_element(&self, element: ElementRef<'_>) -> Result<ConversionResult> {
        let start = Instant::now();
        let mut state = html::WalkState::default();
        let raw = html::convert_element(self, element, &mut state)?;
        Ok(finish(&raw, &state, start))
    }
}

fn finish(raw: &str, state: &html::WalkState, start: Instant) -> ConversionResult {
    let markdown = text::finish(raw);
    tracing::debug!(
        "Converted {} bytes of markdown, {} rule replacements",
        markdown.len(),
        state.replacements
    );
    ConversionResult {
        markdown,
        replacements: state.replacements,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use scraper::Selector;

    struct Shout;

    impl Rule for Shout {
        fn filter(&self, node: ElementRef<'_>, _options: &Options) -> bool {
            node.value().name() == "em"
        }

        fn replacement(
            &self,
            content: &str,
            _node: ElementRef<'_>,
            _options: &Options,
        ) -> Result<String> {
            Ok(content.to_uppercase())
        }
    }

    struct Broken;

    impl Rule for Broken {
        fn filter(&self, node: ElementRef<'_>, _options: &Options) -> bool {
            node.value().name() == "div"
        }

        fn replacement(
            &self,
            _content: &str,
            _node: ElementRef<'_>,
            _options: &Options,
        ) -> Result<String> {
            Err(ConvertError::NoMatchingAnchor { rule: "broken" })
        }
    }

    #[test]
    fn converts_basic_html() {
        let result = Converter::new()
            .convert("<html><body><h1>Title</h1><p>Paragraph</p></body></html>")
            .unwrap();
        assert_eq!(result.markdown, "Title\n=====\n\nParagraph");
        assert_eq!(result.replacements, 0);
        assert!(result.elapsed_ms >= 0.0);
    }

    #[test]
    fn head_is_ignored() {
        let html = "<html><head><title>T</title></head><body><p>Body</p></body></html>";
        assert_eq!(Converter::new().convert(html).unwrap().markdown, "Body");
    }

    #[test]
    fn rules_override_builtins_and_receive_content() {
        let mut converter = Converter::new();
        converter.add_rule("shout", Shout);
        let result = converter.convert("<p>say <em>hi</em></p>").unwrap();
        assert_eq!(result.markdown, "say HI");
        assert_eq!(result.replacements, 1);
    }

    #[test]
    fn rule_errors_propagate() {
        let mut converter = Converter::new();
        converter.add_rule("broken", Broken);
        assert!(converter.convert("<div>x</div>").is_err());
    }

    #[test]
    fn removed_rule_no_longer_applies() {
        let mut converter = Converter::new();
        converter.add_rule("shout", Shout);
        assert!(converter.remove_rule("shout"));
        assert!(!converter.has_rule("shout"));
        assert_eq!(converter.convert("<em>hi</em>").unwrap().markdown, "_hi_");
    }

    #[test]
    fn use_plugin_chains() {
        fn plugin(c: &mut Converter) -> &mut Converter {
            c.add_rule("shout", Shout)
        }
        let mut converter = Converter::new();
        converter.use_plugin(plugin).use_plugin(plugin);
        assert_eq!(converter.rule_keys().collect::<Vec<_>>(), vec!["shout"]);
    }

    #[test]
    fn convert_element_includes_the_element() {
        let doc = Html::parse_fragment("<blockquote><p>quoted</p></blockquote>");
        let sel = Selector::parse("blockquote").unwrap();
        let bq = doc.select(&sel).next().unwrap();
        let result = Converter::new().convert_element(bq).unwrap();
        assert_eq!(result.markdown, "> quoted");
    }
}
