//! Release-notes page parsing.
//!
//! Turns a raw HTML document into the flat, ordered list of elements the
//! extractor cares about.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Headings, feature titles and feature bodies, in document order.
const FEATURE_SELECTOR: &str = "h2, td.title, td.content";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("document is empty")]
    EmptyDocument,
    #[error("invalid selector: {0}")]
    Selector(String),
}

/// One structural element of a release-notes page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageElement {
    /// An `h2`: the page subject the first time, a category afterwards
    Heading { text: String },
    /// A `td.title` cell holding a feature name
    TitleCell { text: String },
    /// A `td.content` cell holding a feature description
    ContentCell {
        /// Inner HTML of the cell
        html: String,
        /// Whether the previous element sibling is a `td.title`
        follows_title: bool,
    },
}

/// Parse a document into its tagged feature elements
pub fn parse_page(html: &str) -> Result<Vec<PageElement>, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    let selector =
        Selector::parse(FEATURE_SELECTOR).map_err(|e| ParseError::Selector(e.to_string()))?;
    let document = Html::parse_document(html);

    Ok(document.select(&selector).map(classify).collect())
}

fn classify(element: ElementRef<'_>) -> PageElement {
    if element.value().name() == "h2" {
        PageElement::Heading {
            text: element.text().collect(),
        }
    } else if is_title_cell(element) {
        PageElement::TitleCell {
            text: element.text().collect(),
        }
    } else {
        let follows_title = element
            .prev_siblings()
            .find_map(ElementRef::wrap)
            .is_some_and(is_title_cell);
        PageElement::ContentCell {
            html: element.inner_html(),
            follows_title,
        }
    }
}

fn is_title_cell(element: ElementRef<'_>) -> bool {
    let value = element.value();
    value.name() == "td" && value.classes().any(|class| class == "title")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str) -> PageElement {
        PageElement::Heading {
            text: text.to_string(),
        }
    }

    fn title(text: &str) -> PageElement {
        PageElement::TitleCell {
            text: text.to_string(),
        }
    }

    #[test]
    fn elements_come_out_in_document_order() {
        let html = r#"
            <html><body>
              <h2>Java development tools</h2>
              <h2>Java Editor</h2>
              <table>
                <tr><td class="title">Quick fix</td><td class="content"><p>Fixes <b>things</b>.</p></td></tr>
              </table>
            </body></html>"#;

        let elements = parse_page(html).unwrap();
        assert_eq!(elements.len(), 4);
        assert_eq!(elements[0], heading("Java development tools"));
        assert_eq!(elements[1], heading("Java Editor"));
        assert_eq!(elements[2], title("Quick fix"));
        assert_eq!(
            elements[3],
            PageElement::ContentCell {
                html: "<p>Fixes <b>things</b>.</p>".to_string(),
                follows_title: true,
            }
        );
    }

    #[test]
    fn content_cell_after_another_cell_does_not_follow_title() {
        let html = r#"<table><tr>
              <td class="title">Orphan</td><td class="note">x</td><td class="content">body</td>
            </tr></table>"#;

        let elements = parse_page(html).unwrap();
        assert_eq!(elements[0], title("Orphan"));
        assert!(matches!(
            elements[1],
            PageElement::ContentCell {
                follows_title: false,
                ..
            }
        ));
    }

    #[test]
    fn text_is_not_trimmed() {
        let html = "<table><tr><td class=\"title\">\n  Spaced <em>out</em> \n</td></tr></table>";
        let elements = parse_page(html).unwrap();
        assert_eq!(elements, vec![title("\n  Spaced out \n")]);
    }

    #[test]
    fn other_headings_and_cells_are_ignored() {
        let html = "<h1>Top</h1><h3>Sub</h3><table><tr><td>plain</td></tr></table>";
        assert!(parse_page(html).unwrap().is_empty());
    }

    #[test]
    fn blank_document_is_a_parse_error() {
        assert!(matches!(
            parse_page("  \n "),
            Err(ParseError::EmptyDocument)
        ));
    }
}
