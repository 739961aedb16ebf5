//! Conversion rules that override the converter's built-in rendering.
//!
//! # Architecture
//!
//! - [`Rule`]: a filter/replacement pair consulted for every element
//! - [`RuleSet`]: keyed registry, most recently added rule first
//! - [`code_snippet`]: collapses GitHub code-snippet embeds to their permalink
//!
//! # Example
//!
//! ```rust
//! use snipdown::{rules::code_snippet, Converter};
//!
//! let mut converter = Converter::new();
//! converter.use_plugin(code_snippet::install);
//! assert!(converter.has_rule(code_snippet::RULE_KEY));
//! ```

pub mod code_snippet;

use scraper::ElementRef;

use crate::error::Result;
use crate::options::Options;

/// A filter/replacement pair applied to elements during conversion.
///
/// The converter calls [`replacement`](Rule::replacement) only for elements
/// whose [`filter`](Rule::filter) returned `true`. Rules are stateless and
/// must not assume any call order across elements.
pub trait Rule: Send + Sync {
    /// Whether this rule takes over `node` and its whole subtree.
    fn filter(&self, node: ElementRef<'_>, options: &Options) -> bool;

    /// Whether [`replacement`](Rule::replacement) reads `content`. When
    /// `false` the subtree is not converted and `content` is empty.
    fn uses_content(&self) -> bool {
        true
    }

    /// Markdown that replaces `node`.
    ///
    /// `content` is the already converted markdown of the node's children.
    fn replacement(&self, content: &str, node: ElementRef<'_>, options: &Options)
        -> Result<String>;
}

/// Keyed rule registry.
///
/// Lookup is O(n) over registered rules, newest first. Re-adding a key
/// replaces the earlier rule, so a key is never active twice.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<(String, Box<dyn Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule` under `key`, replacing any rule already using it.
    pub fn add(&mut self, key: impl Into<String>, rule: Box<dyn Rule>) {
        let key = key.into();
        if let Some(pos) = self.rules.iter().position(|(k, _)| *k == key) {
            tracing::debug!("Replacing rule: {}", key);
            self.rules.remove(pos);
        }
        self.rules.insert(0, (key, rule));
    }

    /// Drop the rule registered under `key`. Returns whether one existed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|(k, _)| k != key);
        self.rules.len() != before
    }

    /// First rule whose filter accepts `node`, with its key.
    pub fn find(&self, node: ElementRef<'_>, options: &Options) -> Option<(&str, &dyn Rule)> {
        self.rules
            .iter()
            .find(|(_, rule)| rule.filter(node, options))
            .map(|(key, rule)| (key.as_str(), &**rule))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rules.iter().any(|(k, _)| k == key)
    }

    /// Registered keys, in lookup order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
