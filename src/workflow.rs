//! The fetch → parse → extract → filter loop over all release-notes pages.

use crate::config::Query;
use crate::extract::{extract_features, Feature};
use crate::fetch::PageSource;
use crate::filter::MatchFilter;
use crate::page::parse_page;

/// Visit every page in order and collect the features matching `query`.
///
/// A page that cannot be fetched or parsed is logged and skipped; matches
/// from the other pages are kept.
pub async fn collect_matches<S>(source: &S, urls: &[String], query: &Query) -> Vec<Feature>
where
    S: PageSource,
{
    let filter = MatchFilter::from_query(query);
    let mut matches = Vec::new();

    for url in urls {
        tracing::debug!(%url, "fetching page");

        let html = match source.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Error fetching URL, skipping page");
                continue;
            }
        };

        let elements = match parse_page(&html) {
            Ok(elements) => elements,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Error parsing page, skipping");
                continue;
            }
        };

        let before = matches.len();
        matches.extend(
            extract_features(&elements)
                .into_iter()
                .filter(|feature| filter.matches(feature)),
        );
        tracing::debug!(%url, matched = matches.len() - before, "page done");
    }

    matches
}
