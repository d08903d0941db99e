//! Title helpers

/// Capitalize the first letter of every word, leaving the rest untouched.
///
/// A word starts after whitespace or punctuation; apostrophes and
/// underscores do not break a word, so `don't` becomes `Don't`. Words that
/// start with a digit are left alone (`3rd` stays `3rd`).
pub fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if at_word_start && c.is_alphabetic() {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '\'' || c == '_');
    }

    result
}

/// Derive a human readable title from a file stem (`hello-world` -> `Hello World`)
pub fn derive_title(stem: &str) -> String {
    let stem = stem.strip_suffix(".md").unwrap_or(stem);
    title_case(&stem.replace('-', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title("hello-world"), "Hello World");
        assert_eq!(derive_title("about"), "About");
        assert_eq!(derive_title("about.md"), "About");
        assert_eq!(derive_title("2024-03-01-hello-world"), "2024 03 01 Hello World");
    }

    #[test]
    fn test_title_case_keeps_existing_capitals() {
        assert_eq!(title_case("my HTML notes"), "My HTML Notes");
        assert_eq!(title_case("iPhone review"), "IPhone Review");
    }

    #[test]
    fn test_title_case_word_boundaries() {
        assert_eq!(title_case("don't panic"), "Don't Panic");
        assert_eq!(title_case("snake_case words"), "Snake_case Words");
        assert_eq!(title_case("3rd time"), "3rd Time");
        assert_eq!(title_case("a.b (c)"), "A.B (C)");
        assert_eq!(title_case("élan vital"), "Élan Vital");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_is_idempotent() {
        for input in ["hello world", "Hello World", "don't stop", "über cool post", "a b c"] {
            let once = title_case(input);
            assert_eq!(title_case(&once), once);
            assert_eq!(derive_title(&once), once);
        }
    }
}
