use unicode_normalization::UnicodeNormalization;

/// Normalize a text block lifted from the page to NFC and trim it.
///
/// Latin pages mix precomposed and combining accents (æ, ë); NFC keeps
/// them in one form. Trimming also drops the non-breaking spaces the site
/// leaves at cell edges.
pub fn clean_block(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nfc() {
        // e + combining diaeresis -> ë (precomposed)
        let decomposed = "Israe\u{0308}l";
        assert_eq!(clean_block(decomposed), "Isra\u{00eb}l");
    }

    #[test]
    fn test_trims_nbsp_and_newlines() {
        assert_eq!(clean_block("\n\u{a0} 1  Et factum est \u{a0}\n"), "1  Et factum est");
    }
}
