//! Resolves YouTube URLs and bare IDs to an 11-character video ID.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Extraction rules tried in order; the first capture group of the
    /// first matching rule wins. The ordering is part of the contract:
    /// the leading rule is deliberately broad (anything after `v=` or a
    /// path separator) and usually fires before the narrower ones get a
    /// turn, but all four are kept for compatibility.
    static ref EXTRACTION_RULES: [Regex; 4] = [
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11}).*").unwrap(),
        Regex::new(r"(?:embed/)([0-9A-Za-z_-]{11})").unwrap(),
        Regex::new(r"(?:watch\?v=)([0-9A-Za-z_-]{11})").unwrap(),
        Regex::new(r"^([0-9A-Za-z_-]{11})$").unwrap(),
    ];
}

/// Extract a video ID from a watch URL, youtu.be short link, embed URL or
/// bare 11-character ID. Returns `None` when no rule matches.
pub fn resolve_video_id(input: &str) -> Option<String> {
    EXTRACTION_RULES
        .iter()
        .find_map(|rule| rule.captures(input))
        .map(|caps| caps[1].to_string())
}
