//! URL splitting utilities

use std::collections::BTreeMap;
use url::Url;

/// Split a URL into its query-less form and its query parameters
///
/// Path segments are normalised (`.` and `..` are resolved). When a parameter
/// appears more than once the last occurrence wins. A URL that cannot be
/// parsed is returned unchanged with no parameters.
///
/// # Example
/// ```rust
/// use bitbucket_api::split_url;
///
/// let (url, query) = split_url("https://example.com/rest/./api/../api/repos?start=25&limit=10");
/// assert_eq!(url, "https://example.com/rest/api/repos");
/// assert_eq!(query["start"], "25");
/// assert_eq!(query["limit"], "10");
/// ```
pub fn split_url(url: &str) -> (String, BTreeMap<String, String>) {
    let Ok(mut parsed) = Url::parse(url) else {
        return (url.to_string(), BTreeMap::new());
    };

    let query = parsed.query_pairs().into_owned().collect();
    parsed.set_query(None);
    parsed.set_fragment(None);

    (parsed.to_string(), query)
}
