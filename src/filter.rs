//! Matching features against the user's query.

use crate::config::Query;
use crate::extract::Feature;

/// Case-insensitive substring filter on feature and page titles.
///
/// Only lowercasing is applied: no trimming, no Unicode case folding.
#[derive(Debug, Clone)]
pub struct MatchFilter {
    title: String,
    page: String,
}

impl MatchFilter {
    pub fn new(title_to_match: &str, page_to_match: &str) -> Self {
        Self {
            title: title_to_match.to_lowercase(),
            page: page_to_match.to_lowercase(),
        }
    }

    pub fn from_query(query: &Query) -> Self {
        Self::new(&query.title_to_match, &query.page_to_match)
    }

    pub fn matches(&self, feature: &Feature) -> bool {
        feature.title.to_lowercase().contains(&self.title)
            && feature.page_title.to_lowercase().contains(&self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(title: &str, page_title: &str) -> Feature {
        Feature::new(title, "", "", page_title)
    }

    #[test]
    fn title_match_ignores_case() {
        let filter = MatchFilter::new("search", "");
        assert!(filter.matches(&feature("Improved Search", "Platform")));
        assert!(!filter.matches(&feature("Improved Debugging", "Platform")));
    }

    #[test]
    fn empty_page_substring_matches_every_page() {
        let filter = MatchFilter::new("a", "");
        assert!(filter.matches(&feature("a", "")));
        assert!(filter.matches(&feature("a", "Java development tools")));
    }

    #[test]
    fn both_substrings_must_match() {
        let filter = MatchFilter::new("quick", "JAVA");
        assert!(filter.matches(&feature("Quick assist", "Java development tools")));
        assert!(!filter.matches(&feature("Quick assist", "Platform")));
    }

    #[test]
    fn whitespace_is_significant() {
        let filter = MatchFilter::new(" search", "");
        assert!(!filter.matches(&feature("Search", "Platform")));
    }
}
