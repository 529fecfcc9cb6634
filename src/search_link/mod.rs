//! External search links for chart entries.
//!
//! There is no streaming service integration: an entry just links to the
//! service's search page, queried with its title and artist.

use once_cell::sync::Lazy;
use regex::Regex;

pub const SEARCH_BASE_URL: &str = "https://open.spotify.com/search";
pub const EMBED_BASE_URL: &str = "https://open.spotify.com/embed/track";

/// Credited-artist separators, only when surrounded by whitespace so that
/// names like "Ft. Lauderdale" or "X Ambassadors" at the edges survive.
static CREDIT_SEPARATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:\s+(?:featuring|feat\.?|ft\.?)\s+)|\s+[&x]\s+")
        .expect("Invalid Regex, this should be fixed at compile time.")
});

/// Turns "title artist" into a search query: separators become a space,
/// anything that is not alphanumeric or whitespace is dropped, whitespace is
/// collapsed.
pub fn clean_query(query: &str) -> String {
    // Replaced twice since matches can't overlap: "A & B & C".
    let spaced = CREDIT_SEPARATORS.replace_all(query, " ");
    let spaced = CREDIT_SEPARATORS.replace_all(&spaced, " ");
    let filtered: String = spaced
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    filtered.split_whitespace().collect::<Vec<&str>>().join(" ")
}

pub fn build_search_reference(title: &str, artist: &str) -> String {
    let query = clean_query(&format!("{} {}", title, artist));
    format!("{}/{}", SEARCH_BASE_URL, urlencoding::encode(&query))
}

pub fn build_embed_reference(track_id: &str) -> String {
    format!("{}/{}", EMBED_BASE_URL, urlencoding::encode(track_id.trim()))
}
