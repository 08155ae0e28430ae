//! Roman numeral token parsing
//!
//! Splits a template token such as `ii7`, `Imaj7`, `vii°` or `V/V` into the
//! degree it refers to and the chord quality it asks for.

use crate::chord::ChordQuality;

/// A parsed Roman numeral token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomanToken<'a> {
    /// The token as written.
    pub text: &'a str,
    /// Lowercase degree key, e.g. `"vii"` for `vii°` or `VII7`.
    pub degree: String,
    /// Quality forced by a `7`, `maj7` or `m7` suffix.
    pub quality: Option<ChordQuality>,
    /// For `X/Y` tokens, the degree key of `Y`.
    pub secondary_of: Option<String>,
}

/// Degree key of a numeral: case and `°` are ignored, as are quality suffixes.
///
/// Quality suffixes never contain the letters `i` or `v`, so keeping only those
/// letters drops them.
pub fn degree_key(numeral: &str) -> String {
    numeral
        .chars()
        .filter(|c| matches!(c, 'I' | 'V' | 'i' | 'v'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Quality implied by a suffix anywhere in `numeral`, checked longest first.
pub fn suffix_quality(numeral: &str) -> Option<ChordQuality> {
    let lower = numeral.to_lowercase();
    if lower.contains("maj7") {
        Some(ChordQuality::Major7)
    } else if lower.contains("m7") {
        Some(ChordQuality::Minor7)
    } else if lower.contains('7') {
        Some(ChordQuality::Dominant7)
    } else {
        None
    }
}

/// Parse a template token.
///
/// In a secondary-dominant token `X/Y` the quality defaults to
/// [`ChordQuality::Dominant7`]; only `maj7` or `m7` on `X` change it.
///
/// ```
/// use tonehouse::progression::parse_roman;
/// use tonehouse::ChordQuality;
///
/// let token = parse_roman("Imaj7");
/// assert_eq!(token.degree, "i");
/// assert_eq!(token.quality, Some(ChordQuality::Major7));
///
/// let token = parse_roman("V/V");
/// assert_eq!(token.secondary_of.as_deref(), Some("v"));
/// assert_eq!(token.quality, Some(ChordQuality::Dominant7));
/// ```
pub fn parse_roman(text: &str) -> RomanToken<'_> {
    match text.split_once('/') {
        Some((head, target)) => {
            let quality = match suffix_quality(head) {
                Some(ChordQuality::Major7) => ChordQuality::Major7,
                Some(ChordQuality::Minor7) => ChordQuality::Minor7,
                _ => ChordQuality::Dominant7,
            };
            RomanToken {
                text,
                degree: degree_key(head),
                quality: Some(quality),
                secondary_of: Some(degree_key(target)),
            }
        }
        None => RomanToken {
            text,
            degree: degree_key(text),
            quality: suffix_quality(text),
            secondary_of: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_key() {
        assert_eq!(degree_key("I"), "i");
        assert_eq!(degree_key("vii°"), "vii");
        assert_eq!(degree_key("ii°"), "ii");
        assert_eq!(degree_key("Imaj7"), "i");
        assert_eq!(degree_key("ii7"), "ii");
        assert_eq!(degree_key("VIm7"), "vi");
        assert_eq!(degree_key("IV"), degree_key("iv"));
    }

    #[test]
    fn test_suffix_quality() {
        assert_eq!(suffix_quality("IV"), None);
        assert_eq!(suffix_quality("V7"), Some(ChordQuality::Dominant7));
        assert_eq!(suffix_quality("ii7"), Some(ChordQuality::Dominant7));
        assert_eq!(suffix_quality("Imaj7"), Some(ChordQuality::Major7));
        assert_eq!(suffix_quality("iim7"), Some(ChordQuality::Minor7));
        assert_eq!(suffix_quality("IMAJ7"), Some(ChordQuality::Major7));
    }

    #[test]
    fn test_parse_plain_and_slash() {
        let token = parse_roman("vi");
        assert_eq!(token.degree, "vi");
        assert_eq!(token.quality, None);
        assert_eq!(token.secondary_of, None);

        let token = parse_roman("Vmaj7/IV");
        assert_eq!(token.degree, "v");
        assert_eq!(token.quality, Some(ChordQuality::Major7));
        assert_eq!(token.secondary_of.as_deref(), Some("iv"));
    }
}
