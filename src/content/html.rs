//! Depth-first HTML walker producing markdown.
//!
//! Registered rules get the first look at every element. Elements no rule
//! claims fall through to the built-in CommonMark rendering below.

use scraper::{ElementRef, Node as DomNode};

use super::text::{
    collapse_whitespace, escape, indent_continuation, longest_run, squeeze_blank_lines,
};
use super::Converter;
use crate::error::Result;
use crate::options::{CodeBlockStyle, HeadingStyle, Options};

/// Elements rendered as blocks. Whitespace next to them is not significant.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas", "center", "dd",
    "details", "dialog", "dir", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer",
    "form", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "html",
    "li", "main", "menu", "nav", "noframes", "ol", "output", "p", "pre", "section", "summary",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul", "video",
];

/// Elements dropped together with their content.
const DROPPED_ELEMENTS: &[&str] = &[
    "head", "link", "meta", "noscript", "script", "style", "template", "title",
];

pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag)
}

/// Element nesting depth past which subtrees are flattened to plain text.
pub const MAX_DEPTH: usize = 256;

/// Per-conversion bookkeeping.
#[derive(Debug, Default)]
pub struct WalkState {
    pub replacements: usize,
    depth: usize,
}

/// Markdown for `element` itself, rules included.
///
/// Past [`MAX_DEPTH`] nested elements the subtree is emitted as escaped
/// text only, so pathological nesting cannot exhaust the stack.
pub fn convert_element(
    converter: &Converter,
    element: ElementRef<'_>,
    state: &mut WalkState,
) -> Result<String> {
    if state.depth >= MAX_DEPTH {
        tracing::warn!(
            "Nesting deeper than {} elements, flattening <{}> to text",
            MAX_DEPTH,
            element.value().name()
        );
        let text: String = element.text().collect();
        return Ok(escape(&collapse_whitespace(&text)));
    }

    state.depth += 1;
    let markdown = render_element(converter, element, state);
    state.depth -= 1;
    markdown
}

fn render_element(
    converter: &Converter,
    element: ElementRef<'_>,
    state: &mut WalkState,
) -> Result<String> {
    let options = converter.options();
    let tag = element.value().name();

    if let Some((key, rule)) = converter.rules().find(element, options) {
        let content = if rule.uses_content() {
            convert_children(converter, element, state)?
        } else {
            String::new()
        };
        let replacement = rule.replacement(&content, element, options)?;
        tracing::debug!("Rule {} replaced <{}> ({} bytes)", key, tag, replacement.len());
        state.replacements += 1;
        return Ok(replacement);
    }

    tracing::trace!("Built-in rendering for <{}>", tag);
    match tag {
        t if DROPPED_ELEMENTS.contains(&t) => Ok(String::new()),
        "p" => Ok(block(&convert_children(converter, element, state)?)),
        "br" => Ok("  \n".to_string()),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = usize::from(tag.as_bytes()[1] - b'0');
            let content = convert_children(converter, element, state)?;
            Ok(heading(content.trim(), level, options))
        }
        "blockquote" => {
            let content = convert_children(converter, element, state)?;
            Ok(blockquote(&content))
        }
        "ul" | "ol" => list(converter, element, state),
        "li" => {
            let prefix = format!("{}   ", options.bullet_list_marker);
            Ok(format!("{}\n", list_item(converter, element, &prefix, state)?))
        }
        "pre" => Ok(code_block(element, options)),
        "code" | "kbd" | "samp" => Ok(inline_code(&element.text().collect::<String>())),
        "a" => {
            let content = convert_children(converter, element, state)?;
            Ok(link(&content, element))
        }
        "img" => Ok(image(element)),
        "em" | "i" => {
            let content = convert_children(converter, element, state)?;
            Ok(delimit(&content, &options.em_delimiter))
        }
        "strong" | "b" => {
            let content = convert_children(converter, element, state)?;
            Ok(delimit(&content, &options.strong_delimiter))
        }
        "hr" => Ok(block(&options.hr)),
        _ => {
            let content = convert_children(converter, element, state)?;
            if is_block(tag) {
                Ok(block(&content))
            } else {
                Ok(content)
            }
        }
    }
}

/// Concatenated markdown of `element`'s children.
///
/// Text nodes are whitespace-collapsed and escaped. Whitespace at the edge
/// of a block (first/last child of one, or adjacent to a block sibling) is
/// dropped.
pub fn convert_children(
    converter: &Converter,
    element: ElementRef<'_>,
    state: &mut WalkState,
) -> Result<String> {
    let parent_is_block = is_block(element.value().name());
    let children: Vec<_> = element.children().collect();
    let block_at = |index: Option<usize>| -> bool {
        match index {
            None => parent_is_block,
            Some(i) => children
                .get(i)
                .and_then(|n| ElementRef::wrap(*n))
                .is_some_and(|e| is_block(e.value().name())),
        }
    };

    let mut out = String::new();
    for (i, child) in children.iter().enumerate() {
        match child.value() {
            DomNode::Text(text) => {
                let collapsed = collapse_whitespace(text);
                let mut piece = collapsed.as_str();
                if block_at(i.checked_sub(1)) {
                    piece = piece.trim_start_matches(' ');
                }
                let next = if i + 1 < children.len() { Some(i + 1) } else { None };
                if block_at(next) {
                    piece = piece.trim_end_matches(' ');
                }
                if !piece.is_empty() {
                    out.push_str(&escape(piece));
                }
            }
            DomNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(*child) {
                    out.push_str(&convert_element(converter, child_element, state)?);
                }
            }
            _ => {}
        }
    }
    Ok(out)
}

fn block(content: &str) -> String {
    format!("\n\n{content}\n\n")
}

fn heading(content: &str, level: usize, options: &Options) -> String {
    if options.heading_style == HeadingStyle::Setext && level <= 2 {
        let underline = if level == 1 { "=" } else { "-" };
        let width = content.chars().count().max(1);
        return format!("\n\n{content}\n{}\n\n", underline.repeat(width));
    }
    format!("\n\n{} {content}\n\n", "#".repeat(level))
}

fn blockquote(content: &str) -> String {
    let quoted: Vec<String> = squeeze_blank_lines(content)
        .trim_matches('\n')
        .split('\n')
        .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
        .collect();
    block(&quoted.join("\n"))
}

fn list(converter: &Converter, element: ElementRef<'_>, state: &mut WalkState) -> Result<String> {
    let options = converter.options();
    let ordered = element.value().name() == "ol";
    let mut number = element
        .value()
        .attr("start")
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(1);

    let mut items = Vec::new();
    for child in element.children().filter_map(ElementRef::wrap) {
        if child.value().name() == "li" {
            let prefix = if ordered {
                format!("{number}.  ")
            } else {
                format!("{}   ", options.bullet_list_marker)
            };
            number += 1;
            items.push(list_item(converter, child, &prefix, state)?);
        } else {
            // Lists nested directly in a list instead of in an item.
            let nested = convert_element(converter, child, state)?;
            let nested = nested.trim_matches('\n');
            if !nested.is_empty() {
                items.push(format!("    {}", indent_continuation(nested, "    ")));
            }
        }
    }
    Ok(block(&items.join("\n")))
}

fn list_item(
    converter: &Converter,
    element: ElementRef<'_>,
    prefix: &str,
    state: &mut WalkState,
) -> Result<String> {
    let content = squeeze_blank_lines(&convert_children(converter, element, state)?);
    let content = content.trim_start_matches('\n').trim_end();
    Ok(format!("{prefix}{}", indent_continuation(content, "    ")))
}

fn code_block(element: ElementRef<'_>, options: &Options) -> String {
    let text: String = element.text().collect();
    let code = text.strip_suffix('\n').unwrap_or(&text);

    match options.code_block_style {
        CodeBlockStyle::Indented => {
            let indented: Vec<String> = code.split('\n').map(|line| format!("    {line}")).collect();
            block(&indented.join("\n"))
        }
        CodeBlockStyle::Fenced => {
            let language = element
                .children()
                .filter_map(ElementRef::wrap)
                .find(|c| c.value().name() == "code")
                .and_then(|c| c.value().attr("class"))
                .and_then(|class| {
                    class
                        .split_whitespace()
                        .find_map(|c| c.strip_prefix("language-"))
                })
                .unwrap_or("");

            let fence_char = options.fence.chars().next().unwrap_or('`');
            let run = longest_run(code, fence_char);
            let fence = if run >= options.fence.chars().count() {
                fence_char.to_string().repeat(run + 1)
            } else {
                options.fence.clone()
            };
            block(&format!("{fence}{language}\n{code}\n{fence}"))
        }
    }
}

fn inline_code(text: &str) -> String {
    let code = text.replace(['\r', '\n'], " ");
    if code.is_empty() {
        return String::new();
    }
    let delimiter = "`".repeat(longest_run(&code, '`') + 1);
    let pad = if code.starts_with('`') || code.ends_with('`') { " " } else { "" };
    format!("{delimiter}{pad}{code}{pad}{delimiter}")
}

fn link(content: &str, element: ElementRef<'_>) -> String {
    let Some(href) = element.value().attr("href").filter(|h| !h.is_empty()) else {
        return content.to_string();
    };
    let href = href.replace('(', "\\(").replace(')', "\\)");
    format!("[{content}]({href}{})", title_suffix(element))
}

fn image(element: ElementRef<'_>) -> String {
    let Some(src) = element.value().attr("src").filter(|s| !s.is_empty()) else {
        return String::new();
    };
    let alt = element.value().attr("alt").map(collapse_whitespace).unwrap_or_default();
    format!("![{alt}]({src}{})", title_suffix(element))
}

fn title_suffix(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("title")
        .map(|t| format!(" \"{}\"", collapse_whitespace(t).replace('"', "\\\"")))
        .unwrap_or_default()
}

fn delimit(content: &str, delimiter: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    format!("{delimiter}{content}{delimiter}")
}
