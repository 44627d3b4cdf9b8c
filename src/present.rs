//! Presenting the collected matches to the user.

use crate::clipboard::Clipboard;
use crate::extract::Feature;
use crate::markdown;
use colored::Colorize;
use std::io::{self, Write};

/// What the presenter ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing matched
    NoResults,
    /// Several matches were listed; carries the count
    Ambiguous(usize),
    /// The single match is on the clipboard
    Copied,
    /// The clipboard was unavailable, so the single match went to the console
    Printed,
}

/// Report the matches: list them, publish the single one, or say there are none.
pub fn present<C, W>(features: &[Feature], clipboard: &mut C, out: &mut W) -> io::Result<Outcome>
where
    C: Clipboard + ?Sized,
    W: Write,
{
    match features {
        [] => {
            writeln!(out, "{}", "No results found.".yellow())?;
            Ok(Outcome::NoResults)
        }
        [feature] => {
            let quote = render_quote(feature);
            match clipboard.set_text(&quote) {
                Ok(()) => {
                    writeln!(out, "{}", "Results copied to clipboard.".green())?;
                    Ok(Outcome::Copied)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "clipboard unavailable, printing result instead");
                    write!(out, "{quote}")?;
                    Ok(Outcome::Printed)
                }
            }
        }
        many => {
            for feature in many {
                writeln!(out, "{}", disambiguation_line(feature))?;
            }
            Ok(Outcome::Ambiguous(many.len()))
        }
    }
}

/// `title - category from page title`
pub fn disambiguation_line(feature: &Feature) -> String {
    format!(
        "{} - {} from {}",
        feature.title, feature.category, feature.page_title
    )
}

/// Convert the feature body and wrap it as a Markdown block quote.
///
/// A body that cannot be rendered falls back to its plain text.
pub fn render_quote(feature: &Feature) -> String {
    let body = match markdown::html_to_markdown(&feature.body) {
        Ok(markdown) => markdown,
        Err(e) => {
            tracing::warn!(title = %feature.title, error = %e, "markdown conversion failed, using plain text");
            markdown::plain_text(&feature.body)
        }
    };
    format_quote(&heading_text(&feature.title), &body)
}

/// Title cells can wrap across lines; the heading must stay on one
fn heading_text(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `> ## title` followed by every body line prefixed with `> `
pub fn format_quote(title: &str, body: &str) -> String {
    let mut quote = format!("> ## {title}\n");
    for line in body.split('\n') {
        quote.push_str("> ");
        quote.push_str(line);
        quote.push('\n');
    }
    quote
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardError;

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Vec<String>,
        broken: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.broken {
                return Err(ClipboardError::NoTool);
            }
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    fn run(features: &[Feature], clipboard: &mut RecordingClipboard) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = present(features, clipboard, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn no_matches_reports_and_leaves_clipboard_alone() {
        let mut clipboard = RecordingClipboard::default();
        let (outcome, out) = run(&[], &mut clipboard);

        assert_eq!(outcome, Outcome::NoResults);
        assert!(out.contains("No results found."));
        assert!(clipboard.writes.is_empty());
    }

    #[test]
    fn several_matches_are_listed_without_conversion() {
        let features = vec![
            Feature::new("Improved Search", "<p>a</p>", "Views", "Platform"),
            Feature::new("Search filters", "<p>b</p>", "Editor", "Java development tools"),
        ];
        let mut clipboard = RecordingClipboard::default();
        let (outcome, out) = run(&features, &mut clipboard);

        assert_eq!(outcome, Outcome::Ambiguous(2));
        assert!(out.contains("Improved Search - Views from Platform\n"));
        assert!(out.contains("Search filters - Editor from Java development tools\n"));
        assert!(!out.contains("<p>"));
        assert!(clipboard.writes.is_empty());
    }

    #[test]
    fn single_match_is_quoted_onto_the_clipboard() {
        let features = vec![Feature::new("Foo", "Bar baz.", "", "Platform")];
        let mut clipboard = RecordingClipboard::default();
        let (outcome, out) = run(&features, &mut clipboard);

        assert_eq!(outcome, Outcome::Copied);
        assert!(out.contains("Results copied to clipboard."));
        assert_eq!(clipboard.writes, vec!["> ## Foo\n> Bar baz.\n".to_string()]);
    }

    #[test]
    fn every_body_line_is_quoted() {
        let feature = Feature::new(
            "  Sticky scrolling\n",
            "<p>Scroll <b>less</b>.</p><ul><li>Java</li><li>XML</li></ul>",
            "Views",
            "Platform",
        );
        let quote = render_quote(&feature);

        assert!(quote.starts_with("> ## Sticky scrolling\n> Scroll **less**.\n"));
        assert!(quote.contains("Java"));
        assert!(quote.ends_with("XML\n"));
        assert!(quote.lines().all(|line| line.starts_with("> ")));
    }

    #[test]
    fn wrapped_title_stays_on_the_heading_line() {
        let feature = Feature::new("Sticky\n      scrolling\t view", "x", "", "Platform");
        let quote = render_quote(&feature);

        assert_eq!(quote, "> ## Sticky scrolling view\n> x\n");
        assert!(quote.lines().all(|line| line.starts_with("> ")));
    }

    #[test]
    fn markdown_lookalike_body_stays_text() {
        let feature = Feature::new("Filters", "<p>1. Use *.java filters</p>", "", "");
        assert_eq!(
            render_quote(&feature),
            "> ## Filters\n> 1\\. Use \\*.java filters\n"
        );
    }

    #[test]
    fn body_is_converted_once() {
        // Escaped markup must survive as text; a second pass would turn it into tags.
        let feature = Feature::new("Tags", "Use &lt;b&gt; tags", "", "");
        assert_eq!(render_quote(&feature), "> ## Tags\n> Use \\<b\\> tags\n");
    }

    #[test]
    fn unrenderable_body_falls_back_to_text() {
        let feature = Feature::new("Script", "<script>var x = 1;</script>", "", "");
        assert_eq!(render_quote(&feature), "> ## Script\n> var x = 1;\n");
    }

    #[test]
    fn broken_clipboard_prints_the_quote() {
        let features = vec![Feature::new("Foo", "Bar baz.", "", "Platform")];
        let mut clipboard = RecordingClipboard {
            broken: true,
            ..Default::default()
        };
        let (outcome, out) = run(&features, &mut clipboard);

        assert_eq!(outcome, Outcome::Printed);
        assert_eq!(out, "> ## Foo\n> Bar baz.\n");
    }
}
