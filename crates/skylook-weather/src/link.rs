//! Outbound link to a web search for the selected city's weather.

const SEARCH_URL: &str = "https://www.google.com/search?q=weather+in+";

/// Build a search-engine link for `city`. Plain string construction, no request.
pub fn search_link(city: &str) -> String {
    format!("{}{}", SEARCH_URL, urlencoding::encode(city))
}
