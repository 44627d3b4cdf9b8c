//! Feature extraction from parsed release-notes pages.

use crate::page::PageElement;

/// A single "New and Noteworthy" entry found on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Text of the title cell
    pub title: String,
    /// Inner HTML of the content cell
    pub body: String,
    /// Most recent heading after the page title; empty before the first one
    pub category: String,
    /// First heading of the page
    pub page_title: String,
}

impl Feature {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        category: impl Into<String>,
        page_title: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category: category.into(),
            page_title: page_title.into(),
        }
    }
}

/// Walk one page's elements and collect every title cell that is directly
/// followed by its content cell.
///
/// A title cell without an adjacent content cell is dropped.
pub fn extract_features(elements: &[PageElement]) -> Vec<Feature> {
    let mut features = Vec::new();
    let mut page_title: Option<&str> = None;
    let mut category = "";

    let mut iter = elements.iter().peekable();
    while let Some(element) = iter.next() {
        match element {
            PageElement::Heading { text } => match page_title {
                None => {
                    tracing::info!("Processing page '{text}'");
                    page_title = Some(text.as_str());
                }
                Some(_) => {
                    tracing::info!("Found category '{text}'");
                    category = text.as_str();
                }
            },
            PageElement::TitleCell { text } => {
                tracing::info!("Found feature title '{text}'");
                if let Some(PageElement::ContentCell {
                    html,
                    follows_title: true,
                }) = iter.peek()
                {
                    features.push(Feature::new(
                        text.as_str(),
                        html.as_str(),
                        category,
                        page_title.unwrap_or_default(),
                    ));
                    iter.next();
                }
            }
            PageElement::ContentCell { .. } => {}
        }
    }

    features
}
