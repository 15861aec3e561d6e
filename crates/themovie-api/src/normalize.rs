//! Umlaut transliteration for search queries.
//!
//! Queries may contain precomposed umlauts (`ö`, U+00F6) or decomposed ones
//! (`o` followed by U+0308 COMBINING DIAERESIS) depending on the caller's
//! input method. Both forms are rewritten to the same ASCII text before the
//! query is percent-encoded, so TMDB sees one spelling per title.

/// A single pattern and the ASCII text that replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementRule {
    /// Character or combining sequence to search for.
    pub pattern: &'static str,
    /// Plain ASCII substituted for every occurrence.
    pub replacement: &'static str,
}

impl ReplacementRule {
    /// Creates a rule.
    const fn new(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
        }
    }

    /// Byte length of the pattern's UTF-8 encoding.
    ///
    /// 2 for precomposed umlauts and `ß`, 3 for decomposed sequences.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.pattern.len()
    }

    /// Replaces every occurrence of this rule's pattern in `text`.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        replace_all(text, self.pattern, self.replacement)
    }
}

/// Umlauts rewritten as digraphs (`ö` → `oe`), applied in order.
pub const DIGRAPH_RULES: [ReplacementRule; 13] = [
    ReplacementRule::new("\u{00C4}", "Ae"),
    ReplacementRule::new("\u{00D6}", "Oe"),
    ReplacementRule::new("\u{00DC}", "Ue"),
    ReplacementRule::new("\u{00E4}", "ae"),
    ReplacementRule::new("\u{00F6}", "oe"),
    ReplacementRule::new("\u{00FC}", "ue"),
    ReplacementRule::new("\u{00DF}", "ss"),
    ReplacementRule::new("A\u{0308}", "Ae"),
    ReplacementRule::new("a\u{0308}", "ae"),
    ReplacementRule::new("O\u{0308}", "Oe"),
    ReplacementRule::new("o\u{0308}", "oe"),
    ReplacementRule::new("U\u{0308}", "Ue"),
    ReplacementRule::new("u\u{0308}", "ue"),
];

/// Umlauts reduced to their base letter (`ö` → `o`), applied in order.
///
/// `ß` has no base letter and still becomes `ss`.
pub const BASE_LETTER_RULES: [ReplacementRule; 13] = [
    ReplacementRule::new("\u{00C4}", "A"),
    ReplacementRule::new("\u{00D6}", "O"),
    ReplacementRule::new("\u{00DC}", "U"),
    ReplacementRule::new("\u{00E4}", "a"),
    ReplacementRule::new("\u{00F6}", "o"),
    ReplacementRule::new("\u{00FC}", "u"),
    ReplacementRule::new("\u{00DF}", "ss"),
    ReplacementRule::new("A\u{0308}", "A"),
    ReplacementRule::new("a\u{0308}", "a"),
    ReplacementRule::new("O\u{0308}", "O"),
    ReplacementRule::new("o\u{0308}", "o"),
    ReplacementRule::new("U\u{0308}", "U"),
    ReplacementRule::new("u\u{0308}", "u"),
];

/// How umlauts are spelled in ASCII.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Transliteration {
    /// `ä` → `ae`, `Ö` → `Oe`, `ß` → `ss`.
    #[default]
    Digraph,
    /// `ä` → `a`, `Ö` → `O`, `ß` → `ss`.
    BaseLetter,
}

impl Transliteration {
    /// The ordered rule table for this style.
    #[must_use]
    pub const fn rules(self) -> &'static [ReplacementRule] {
        match self {
            Self::Digraph => &DIGRAPH_RULES,
            Self::BaseLetter => &BASE_LETTER_RULES,
        }
    }
}

/// Replaces every occurrence of `pattern` in `text` with `replacement`.
///
/// The leftmost occurrence is replaced first and the scan restarts from the
/// beginning of the updated text, until no occurrence is left. An empty
/// pattern leaves the text unchanged. A replacement that contains the pattern
/// would never converge, so it is applied in a single left-to-right pass.
#[must_use]
pub fn replace_all(text: &str, pattern: &str, replacement: &str) -> String {
    if pattern.is_empty() {
        return String::from(text);
    }
    if replacement.contains(pattern) {
        return text.replace(pattern, replacement);
    }

    let mut out = String::from(text);
    while let Some(offset) = out.find(pattern) {
        let Some(rest_start) = offset.checked_add(pattern.len()) else {
            break;
        };
        let (Some(prefix), Some(rest)) = (out.get(..offset), out.get(rest_start..)) else {
            break;
        };
        out = [prefix, replacement, rest].concat();
    }
    out
}

/// Applies every rule of `style` to `text`, in table order.
#[must_use]
pub fn transliterate(text: &str, style: Transliteration) -> String {
    style
        .rules()
        .iter()
        .fold(String::from(text), |acc, rule| rule.apply(&acc))
}

/// Rewrites German umlauts and `ß` as ASCII digraphs.
///
/// Total over all inputs: text without umlauts is returned unchanged.
///
/// # Examples
///
/// ```
/// use themovie_api::normalize::normalize_umlauts;
///
/// assert_eq!(normalize_umlauts("Die Schöne und das Biest"), "Die Schoene und das Biest");
/// assert_eq!(normalize_umlauts("Straße"), "Strasse");
/// ```
#[must_use]
pub fn normalize_umlauts(text: &str) -> String {
    transliterate(text, Transliteration::Digraph)
}

#[cfg(test)]
mod tests {
    use unicode_normalization::UnicodeNormalization;

    use super::*;

    #[test]
    fn test_text_without_umlauts_is_unchanged() {
        // Arrange
        let input = "Sing 2: The Big Show!";

        // Act
        let output = normalize_umlauts(input);

        // Assert
        assert_eq!(output, input);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_umlauts(""), "");
        assert_eq!(transliterate("", Transliteration::BaseLetter), "");
        assert_eq!(replace_all("", "\u{00E4}", "ae"), "");
    }

    #[test]
    fn test_precomposed_umlaut_digraph() {
        assert_eq!(normalize_umlauts("Sch\u{00F6}ne"), "Schoene");
    }

    #[test]
    fn test_precomposed_umlaut_base_letter() {
        assert_eq!(
            transliterate("Sch\u{00F6}ne", Transliteration::BaseLetter),
            "Schone"
        );
    }

    #[test]
    fn test_beauty_and_the_beast() {
        // Arrange
        let input = "Die Sch\u{00F6}ne und das Biest";

        // Act
        let base_letter = transliterate(input, Transliteration::BaseLetter);
        let digraph = normalize_umlauts(input);

        // Assert
        assert_eq!(base_letter, "Die Schone und das Biest");
        assert_eq!(digraph, "Die Schoene und das Biest");
    }

    #[test]
    fn test_all_precomposed_umlauts() {
        assert_eq!(
            normalize_umlauts("\u{00C4}\u{00D6}\u{00DC}\u{00E4}\u{00F6}\u{00FC}"),
            "AeOeUeaeoeue"
        );
    }

    #[test]
    fn test_all_decomposed_umlauts() {
        assert_eq!(
            normalize_umlauts("A\u{0308}O\u{0308}U\u{0308}a\u{0308}o\u{0308}u\u{0308}"),
            "AeOeUeaeoeue"
        );
    }

    #[test]
    fn test_sharp_s() {
        assert_eq!(normalize_umlauts("Stra\u{00DF}e"), "Strasse");
        assert_eq!(
            transliterate("Stra\u{00DF}e", Transliteration::BaseLetter),
            "Strasse"
        );
    }

    #[test]
    fn test_decomposed_matches_precomposed() {
        // Arrange
        let titles = [
            "M\u{00FC}nchen",
            "\u{00DC}berleben in K\u{00F6}ln",
            "Die Br\u{00FC}cke am Flu\u{00DF}",
            "\u{00C4}rger im Para\u{00DF}ies",
        ];

        for title in titles {
            // Act
            let nfc: String = title.nfc().collect();
            let nfd: String = title.nfd().collect();

            // Assert
            assert_ne!(nfc, nfd, "{title} should differ between NFC and NFD");
            assert_eq!(normalize_umlauts(&nfc), normalize_umlauts(&nfd));
            assert_eq!(
                transliterate(&nfc, Transliteration::BaseLetter),
                transliterate(&nfd, Transliteration::BaseLetter)
            );
        }
    }

    #[test]
    fn test_mixed_encodings_in_one_string() {
        // Arrange: precomposed ü followed by decomposed ü
        let input = "\u{00FC}u\u{0308}";

        // Act & Assert
        assert_eq!(normalize_umlauts(input), "ueue");
    }

    #[test]
    fn test_adjacent_occurrences() {
        assert_eq!(normalize_umlauts("\u{00E4}\u{00E4}"), "aeae");
        assert_eq!(normalize_umlauts("a\u{0308}a\u{0308}"), "aeae");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Die Sch\u{00F6}ne und das Biest",
            "Gr\u{00FC}\u{00DF}e aus K\u{00F6}ln",
            "o\u{0308}\u{0308}",
            "e\u{0308}",
            "plain ascii",
        ];

        for input in inputs {
            for style in [Transliteration::Digraph, Transliteration::BaseLetter] {
                let once = transliterate(input, style);
                let twice = transliterate(&once, style);
                assert_eq!(once, twice, "{input:?} with {style:?}");
            }
        }
    }

    #[test]
    fn test_codepoint_count_grows_only_with_umlauts() {
        // Arrange
        let with = "Sch\u{00F6}ne Gr\u{00FC}\u{00DF}e";
        let without = "Schoene Gruesse";

        // Act
        let with_out = normalize_umlauts(with);
        let without_out = normalize_umlauts(without);

        // Assert
        assert!(with_out.chars().count() > with.chars().count());
        assert_eq!(without_out.chars().count(), without.chars().count());
    }

    #[test]
    fn test_other_diacritics_are_kept() {
        assert_eq!(normalize_umlauts("Am\u{00E9}lie"), "Am\u{00E9}lie");
        assert_eq!(normalize_umlauts("No\u{00EB}l"), "No\u{00EB}l");
    }

    #[test]
    fn test_rule_byte_lengths() {
        for rule in DIGRAPH_RULES.iter().chain(BASE_LETTER_RULES.iter()) {
            let expected = if rule.pattern.chars().count() == 1 { 2 } else { 3 };
            assert_eq!(rule.byte_len(), expected, "{:?}", rule.pattern);
            assert!(rule.replacement.is_ascii());
        }
    }

    #[test]
    fn test_replace_all_pattern_absent() {
        assert_eq!(replace_all("Biest", "\u{00F6}", "oe"), "Biest");
    }

    #[test]
    fn test_replace_all_at_start_and_end() {
        assert_eq!(replace_all("\u{00D6}l", "\u{00D6}", "Oe"), "Oel");
        assert_eq!(replace_all("Bl\u{00FC}", "\u{00FC}", "ue"), "Blue");
    }

    #[test]
    fn test_replace_all_restarts_from_beginning() {
        // Arrange: removing "ab" exposes a new "ab" spanning the splice
        let input = "aabb";

        // Act
        let output = replace_all(input, "ab", "");

        // Assert
        assert_eq!(output, "");
    }

    #[test]
    fn test_replace_all_empty_pattern() {
        assert_eq!(replace_all("Biest", "", "x"), "Biest");
    }

    #[test]
    fn test_replace_all_replacement_contains_pattern() {
        assert_eq!(replace_all("aXa", "a", "aa"), "aaXaa");
    }

    #[test]
    fn test_default_style_is_digraph() {
        assert_eq!(Transliteration::default(), Transliteration::Digraph);
        assert_eq!(Transliteration::default().rules(), &DIGRAPH_RULES);
    }
}
