//! Minimal element capability set that rules are written against.
//!
//! Rules only ever need three things from an element: its tag name, a
//! first-match descendant query and an attribute read. Keeping the surface
//! that small lets a rule run on any DOM, not just the [`scraper`] tree the
//! [`Converter`](crate::Converter) walks.

use scraper::ElementRef;

/// Read-only view of an element in the document under conversion.
pub trait Node: Sized {
    /// Tag name as the DOM reports it. Compare case-insensitively.
    fn tag_name(&self) -> &str;

    /// Value of the attribute `name`, if present.
    fn attr(&self, name: &str) -> Option<&str>;

    /// First descendant element, in depth-first document order, for which
    /// `predicate` holds. The element itself is not a candidate.
    fn query_selector<P>(&self, predicate: P) -> Option<Self>
    where
        P: FnMut(&Self) -> bool;
}

impl Node for ElementRef<'_> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn query_selector<P>(&self, mut predicate: P) -> Option<Self>
    where
        P: FnMut(&Self) -> bool,
    {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| predicate(el))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        let sel = Selector::parse(css).unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn query_selector_excludes_self() {
        let doc = Html::parse_fragment(r#"<div id="outer"><p><div id="inner"></div></p></div>"#);
        let outer = first(&doc, "#outer");
        let found = outer.query_selector(|el| el.tag_name() == "div").unwrap();
        assert_eq!(found.attr("id"), Some("inner"));
    }

    #[test]
    fn query_selector_uses_document_order() {
        let doc = Html::parse_fragment(
            r#"<section><p><a id="a1" href="x"></a></p><a id="a2" href="y"></a></section>"#,
        );
        let section = first(&doc, "section");
        let found = section.query_selector(|el| el.tag_name() == "a").unwrap();
        assert_eq!(found.attr("id"), Some("a1"));
    }

    #[test]
    fn query_selector_without_match_is_none() {
        let doc = Html::parse_fragment("<div><span>text</span></div>");
        let div = first(&doc, "div");
        assert!(div.query_selector(|el| el.tag_name() == "a").is_none());
    }

    #[test]
    fn attr_reads_raw_value() {
        let doc = Html::parse_fragment(r#"<a href="https://github.com/o/r#L1">x</a>"#);
        let a = first(&doc, "a");
        assert_eq!(a.attr("href"), Some("https://github.com/o/r#L1"));
        assert_eq!(a.attr("title"), None);
    }
}
