//! HTML fragment to Markdown rendering.
//!
//! The conversion itself is done by `html2md`. Before handing the fragment
//! over, the scraper tree is prepared: scripts are dropped, whitespace is
//! moved out of emphasis tags, and characters in the page text that Markdown
//! would read as syntax are swapped for private-use placeholders. The
//! placeholders come back as backslash escapes, so markers generated by the
//! converter itself stay untouched.

use ego_tree::NodeId;
use scraper::node::Text;
use scraper::{Html, Node};
use thiserror::Error;

/// Characters that get a backslash when they appear in page text.
/// Index `i` travels through the converter as `U+E000 + i`.
const ESCAPABLE: [char; 13] = [
    '\\', '*', '_', '`', '[', ']', '<', '>', '#', '-', '+', '.', ')',
];

/// Escaped wherever they occur; the rest only as a line-leading marker.
const ALWAYS_ESCAPED: [char; 8] = ['\\', '*', '_', '`', '[', ']', '<', '>'];

const PLACEHOLDER_BASE: u32 = 0xE000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConvertError {
    #[error("fragment has text but rendered to nothing")]
    Empty,
    #[error("markdown converter panicked")]
    Converter,
}

/// Render an HTML fragment as Markdown
pub fn html_to_markdown(fragment: &str) -> Result<String, ConvertError> {
    let mut html = Html::parse_fragment(fragment);
    let has_text = html
        .root_element()
        .text()
        .any(|t| !t.trim().is_empty());

    drop_elements(&mut html, &["script", "style", "template"]);
    hoist_emphasis_spaces(&mut html);
    escape_page_text(&mut html);

    let prepared = html.root_element().inner_html();
    let converted = std::panic::catch_unwind(|| html2md::parse_html(&prepared))
        .map_err(|_| ConvertError::Converter)?;
    let markdown = tidy(&restore_placeholders(&converted))
        .trim_start()
        .to_string();

    if markdown.is_empty() && has_text {
        return Err(ConvertError::Empty);
    }

    Ok(markdown)
}

/// Text content of a fragment with whitespace collapsed
pub fn plain_text(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    let text: String = html.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_ids(html: &Html, names: &[&str]) -> Vec<NodeId> {
    html.root_element()
        .descendants()
        .filter(|node| matches!(node.value(), Node::Element(e) if names.contains(&e.name())))
        .map(|node| node.id())
        .collect()
}

fn drop_elements(html: &mut Html, names: &[&str]) {
    for id in element_ids(html, names) {
        if let Some(mut node) = html.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// `<b> x </b>` becomes ` <b>x</b> ` so the converter emits `**x**`
fn hoist_emphasis_spaces(html: &mut Html) {
    for id in element_ids(html, &["b", "strong", "em", "i"]) {
        let Some(mut node) = html.tree.get_mut(id) else {
            continue;
        };

        let mut leading = false;
        if let Some(mut first) = node.first_child() {
            if let Node::Text(text) = first.value() {
                if text.starts_with(char::is_whitespace) {
                    let trimmed = text.trim_start().to_string();
                    text.text = trimmed.as_str().into();
                    leading = true;
                }
            }
        }

        let mut trailing = false;
        if let Some(mut last) = node.last_child() {
            if let Node::Text(text) = last.value() {
                if text.ends_with(char::is_whitespace) {
                    let trimmed = text.trim_end().to_string();
                    text.text = trimmed.as_str().into();
                    trailing = true;
                }
            }
        }

        if leading {
            node.insert_before(space());
        }
        if trailing {
            node.insert_after(space());
        }
    }
}

fn space() -> Node {
    Node::Text(Text { text: " ".into() })
}

/// Replace Markdown syntax in text nodes outside code with placeholders
fn escape_page_text(html: &mut Html) {
    let ids: Vec<NodeId> = html
        .root_element()
        .descendants()
        .filter(|node| node.value().is_text())
        .filter(|node| {
            !node.ancestors().any(|a| {
                matches!(a.value(), Node::Element(e) if matches!(e.name(), "pre" | "code" | "kbd" | "tt"))
            })
        })
        .map(|node| node.id())
        .collect();

    for id in ids {
        if let Some(mut node) = html.tree.get_mut(id) {
            if let Node::Text(text) = node.value() {
                let escaped = escape_text(&text.text);
                text.text = escaped.as_str().into();
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    let body = text.trim_start();
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..text.len() - body.len()]);

    let marker = leading_marker(body);
    for (i, ch) in body.char_indices() {
        if Some(i) == marker || ALWAYS_ESCAPED.contains(&ch) {
            out.push(placeholder(ch));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Byte offset of a block marker at the start of `text`: `#`, `- `, `+ `,
/// or the `.`/`)` of `12. ` / `12) `
fn leading_marker(text: &str) -> Option<usize> {
    let followed_by_space =
        |rest: &str| rest.is_empty() || rest.starts_with(char::is_whitespace);

    match text.chars().next()? {
        '#' => Some(0),
        '-' | '+' if followed_by_space(&text[1..]) => Some(0),
        c if c.is_ascii_digit() => {
            let digits = text.chars().take_while(char::is_ascii_digit).count();
            let rest = &text[digits..];
            let delimited = rest.starts_with(['.', ')']);
            (digits <= 9 && delimited && followed_by_space(&rest[1..])).then_some(digits)
        }
        _ => None,
    }
}

fn placeholder(ch: char) -> char {
    ESCAPABLE
        .iter()
        .position(|&c| c == ch)
        .and_then(|i| char::from_u32(PLACEHOLDER_BASE + i as u32))
        .unwrap_or(ch)
}

fn restore_placeholders(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    for ch in markdown.chars() {
        let index = (ch as u32).wrapping_sub(PLACEHOLDER_BASE) as usize;
        match ESCAPABLE.get(index) {
            Some(&original) => {
                out.push('\\');
                out.push(original);
            }
            None => out.push(ch),
        }
    }
    out
}

/// Strip trailing whitespace per line and keep at most one blank line
fn tidy(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in raw.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().is_none_or(|last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
