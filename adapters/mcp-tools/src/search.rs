//! Canned web search results
//!
//! There is no search backend behind this; results are templated from the
//! query so the orchestrator has something realistic to work with.

use reqwest::Url;
use vibe_core::prelude::*;

/// (title suffix, base URL, query key, snippet template, source)
const TEMPLATES: [(&str, &str, &str, &str, &str); 3] = [
    (
        "Article 1",
        "https://example.com/article1",
        "q",
        "This is a relevant article about {} that provides useful information...",
        "example.com",
    ),
    (
        "Guide",
        "https://guide.com/topic",
        "search",
        "A comprehensive guide covering {} with step-by-step instructions...",
        "guide.com",
    ),
    (
        "News",
        "https://news.com/latest",
        "topic",
        "Latest news and updates related to {} from reliable sources...",
        "news.com",
    ),
];

/// Build at most `num_results` mock results for `query`
pub fn mock_results(query: &str, num_results: usize) -> Result<Vec<SearchResult>, ToolError> {
    TEMPLATES
        .iter()
        .take(num_results)
        .map(|(suffix, base, key, snippet, source)| {
            let url = Url::parse_with_params(base, &[(*key, query)]).map_err(|e| {
                ToolError::InvalidArguments {
                    tool: "web_search".to_string(),
                    reason: e.to_string(),
                }
            })?;

            Ok(SearchResult {
                title: format!("Search result for '{}' - {}", query, suffix),
                url: url.into(),
                snippet: snippet.replace("{}", query),
                source: source.to_string(),
            })
        })
        .collect()
}
