use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// Word tokens: runs of word characters (underscore excluded), with an
// optional embedded straight or curly apostrophe.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\W_]+['’]*[^\W_]*)").unwrap());

/// Parse a string into words, splitting at non-alphanumeric characters.
/// Underscore splits tokens; straight and curly apostrophes are allowed
/// inside a token. The input is lowercased first unless `preserve_case`.
pub fn parse_words(text: &str, preserve_case: bool) -> Vec<String> {
    let normalized;
    let text = if preserve_case {
        text
    } else {
        normalized = text.to_lowercase();
        &normalized
    };

    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True iff the whole word matches `[A-Z0-9]{2,}`.
pub fn is_acronym(word: &str) -> bool {
    let mut n = 0;
    for c in word.chars() {
        if !(c.is_ascii_uppercase() || c.is_ascii_digit()) {
            return false;
        }
        n += 1;
    }
    n >= 2
}

pub(crate) fn try_parse_i64(term: &str) -> Option<i64> {
    term.parse::<i64>().ok()
}

/// Normalize ligatures: "scientiﬁc" "ﬁelds" "ﬁnal"
pub fn unicode_normalization_form_kc(input: &str) -> String {
    input.nfkc().collect::<String>()
}

pub(crate) fn len(s: &str) -> usize {
    s.chars().count()
}

pub(crate) fn remove(s: &str, index: usize) -> String {
    s.chars()
        .enumerate()
        .filter(|(ii, _)| ii != &index)
        .map(|(_, ch)| ch)
        .collect()
}

pub(crate) fn slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end - start).collect()
}

pub(crate) fn suffix(s: &str, start: usize) -> String {
    s.chars().skip(start).collect::<String>()
}

pub(crate) fn at(s: &str, i: isize) -> Option<char> {
    if i < 0 {
        return None;
    }
    s.chars().nth(i as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_words_splits_on_non_word_chars() {
        assert_eq!(
            parse_words("whereis th elove", false),
            ["whereis", "th", "elove"]
        );
        assert_eq!(parse_words("a-b c.d", false), ["a", "b", "c", "d"]);
    }

    #[test]
    fn parse_words_lowercases_unless_preserving() {
        assert_eq!(parse_words("Can YU Read", false), ["can", "yu", "read"]);
        assert_eq!(parse_words("Can YU Read", true), ["Can", "YU", "Read"]);
    }

    #[test]
    fn parse_words_keeps_embedded_apostrophes() {
        assert_eq!(parse_words("couqdn'tread", false), ["couqdn'tread"]);
        assert_eq!(parse_words("glasses’c", false), ["glasses’c"]);
    }

    #[test]
    fn parse_words_splits_on_underscore() {
        assert_eq!(parse_words("snake_case", false), ["snake", "case"]);
    }

    #[test]
    fn acronym_detection() {
        assert!(is_acronym("NASA"));
        assert!(is_acronym("MP3"));
        assert!(!is_acronym("A"));
        assert!(!is_acronym("NaSA"));
        assert!(!is_acronym("nasa"));
    }

    #[test]
    fn nfkc_normalization() {
        assert_eq!(unicode_normalization_form_kc("scientiﬁc"), "scientific");
    }

    #[test]
    fn char_index_helpers() {
        assert_eq!(len("部分居民"), 4);
        assert_eq!(remove("abc", 1), "ac");
        assert_eq!(slice("abcdef", 1, 4), "bcd");
        assert_eq!(suffix("abcdef", 4), "ef");
        assert_eq!(at("abc", 1), Some('b'));
        assert_eq!(at("abc", -1), None);
        assert_eq!(at("abc", 3), None);
    }
}
