use regex::bytes::Regex;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchType {
    Hex(Vec<u8>),
    Ascii(String),
    Regex(String),
}

impl SearchType {
    /// Parse a hex string such as `"DEADbeef"` or `"de ad"` into a byte pattern.
    /// Returns `None` for an odd number of digits or non-hex characters.
    #[must_use]
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if !digits.len().is_multiple_of(2) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        (0..digits.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
            .collect::<Option<Vec<u8>>>()
            .map(Self::Hex)
    }
}

/// Searches for a pattern in the document.
/// Returns the half-open span of every match.
#[must_use]
pub fn search(data: &[u8], search_type: &SearchType) -> Vec<Range<usize>> {
    match search_type {
        SearchType::Hex(p) => search_bytes(data, p),
        SearchType::Ascii(s) => search_bytes(data, s.as_bytes()),
        SearchType::Regex(p) => search_regex(data, p),
    }
}

/// Slide window search. Overlapping matches are all reported.
fn search_bytes(data: &[u8], pattern: &[u8]) -> Vec<Range<usize>> {
    let size = pattern.len();
    if size == 0 {
        return vec![];
    }

    data.windows(size)
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(offset, _)| offset..offset + size)
        .collect()
}

/// Regex search. Empty matches are skipped since they mark no bytes.
fn search_regex(data: &[u8], pattern: &str) -> Vec<Range<usize>> {
    let Ok(re) = Regex::new(pattern) else {
        log::debug!("Invalid search regex: {pattern}");
        return vec![];
    };

    re.find_iter(data)
        .map(|mtch| mtch.range())
        .filter(|range| !range.is_empty())
        .collect()
}
