//! DOI extraction from free-form property values.
//!
//! Source nodes carry DOIs embedded in URLs and citation strings
//! ("http://dx.doi.org/10.1109/5.771073", "doi:10.1000/182", plain text).
//! Extraction scans for the `10.<registrant>/<suffix>` shape rather than
//! requiring any particular carrier format.

/// Punctuation that is more likely sentence trailing than part of a suffix.
const TRAILING: [char; 5] = ['.', ',', ';', ')', ']'];

/// Extract the first DOI found in `text`, lowercased.
///
/// A match is `10.` followed by a 4-9 digit registrant code, a `/`, and a
/// non-empty suffix running to the next whitespace or quoting character.
/// Trailing sentence punctuation is stripped from the suffix.
pub fn extract_doi(text: &str) -> Option<String> {
    let mut search = 0;
    while let Some(found) = text[search..].find("10.") {
        let start = search + found;
        if let Some(doi) = doi_at(&text[start..]) {
            return Some(doi);
        }
        search = start + 3;
    }
    None
}

fn doi_at(text: &str) -> Option<String> {
    let rest = &text[3..];
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if !(4..=9).contains(&digits) || rest.as_bytes().get(digits) != Some(&b'/') {
        return None;
    }

    let prefix_len = 3 + digits + 1;
    let suffix = &text[prefix_len..];
    let end = suffix.find(is_terminator).unwrap_or(suffix.len());
    let candidate = text[..prefix_len + end].trim_end_matches(TRAILING);
    if candidate.len() <= prefix_len {
        return None;
    }
    Some(candidate.to_lowercase())
}

fn is_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>')
}
