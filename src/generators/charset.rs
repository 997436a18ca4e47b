// src/generators/charset.rs
use crate::models::GenerationOptions;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const DEFAULT_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters easily confused with one another
pub const SIMILAR: &str = "il1Lo0O";

/// Brackets, slashes and punctuation that are awkward to type or quote
pub const AMBIGUOUS: &str = "{}[]()/\\~,;.<>";

/// Assembles the effective character set for `options`.
///
/// Order is lowercase, uppercase, digits, symbols. Each character appears
/// once, so sampling over the result is uniform over the set.
pub fn build_charset(options: &GenerationOptions) -> Vec<char> {
    let mut chars: Vec<char> = Vec::new();

    if options.include_lowercase {
        chars.extend(LOWERCASE.chars());
    }
    if options.include_uppercase {
        chars.extend(UPPERCASE.chars());
    }
    if options.include_numbers {
        chars.extend(DIGITS.chars());
    }
    if options.include_symbols {
        if options.custom_symbols.is_empty() {
            chars.extend(DEFAULT_SYMBOLS.chars());
        } else {
            chars.extend(options.custom_symbols.chars());
        }
    }

    if options.exclude_similar {
        chars.retain(|c| !SIMILAR.contains(*c));
    }
    if options.exclude_ambiguous {
        chars.retain(|c| !AMBIGUOUS.contains(*c));
    }
    if !options.exclude_characters.is_empty() {
        chars.retain(|c| !options.exclude_characters.contains(*c));
    }

    // custom symbols may repeat or overlap the alphanumerics
    let mut seen = std::collections::HashSet::new();
    chars.retain(|c| seen.insert(*c));

    chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_drops_similar_and_ambiguous() {
        let set = build_charset(&GenerationOptions::default());
        for c in SIMILAR.chars().chain(AMBIGUOUS.chars()) {
            assert!(!set.contains(&c), "{} should be excluded", c);
        }
        assert!(set.contains(&'a'));
        assert!(set.contains(&'Z'));
        assert!(set.contains(&'7'));
        assert!(set.contains(&'#'));
    }

    #[test]
    fn full_set_without_exclusions() {
        let options = GenerationOptions {
            exclude_similar: false,
            exclude_ambiguous: false,
            ..GenerationOptions::default()
        };
        let set = build_charset(&options);
        assert_eq!(set.len(), 26 + 26 + 10 + DEFAULT_SYMBOLS.len());
        assert_eq!(set[0], 'a');
        assert_eq!(set[26], 'A');
        assert_eq!(set[52], '0');
    }

    #[test]
    fn custom_symbols_replace_defaults() {
        let options = GenerationOptions {
            include_lowercase: false,
            include_uppercase: false,
            include_numbers: false,
            custom_symbols: "*+*".to_string(),
            ..GenerationOptions::default()
        };
        assert_eq!(build_charset(&options), vec!['*', '+']);
    }

    #[test]
    fn custom_symbols_ignored_when_symbols_disabled() {
        let options = GenerationOptions {
            include_symbols: false,
            custom_symbols: "~".to_string(),
            ..GenerationOptions::default()
        };
        assert!(!build_charset(&options).contains(&'~'));
    }

    #[test]
    fn exclude_characters_applied_last() {
        let options = GenerationOptions {
            include_uppercase: false,
            include_numbers: false,
            include_symbols: false,
            exclude_similar: false,
            exclude_characters: "abcxyz".to_string(),
            ..GenerationOptions::default()
        };
        let set = build_charset(&options);
        assert_eq!(set.len(), 20);
        assert!(!set.contains(&'a'));
        assert!(set.contains(&'d'));
    }

    #[test]
    fn nothing_included_gives_empty_set() {
        let options = GenerationOptions {
            include_uppercase: false,
            include_lowercase: false,
            include_numbers: false,
            include_symbols: false,
            ..GenerationOptions::default()
        };
        assert!(build_charset(&options).is_empty());
    }
}
