// src/generators/strength.rs
use std::collections::HashSet;

use crate::models::{GenerationOptions, Requirements};
use super::charset::{DIGITS, LOWERCASE};

const COMMON_PATTERNS: [&str; 6] = ["qwerty", "asdf", "password", "admin", "123456", "letmein"];

// Approximate size of the printable symbol alphabet
const SYMBOL_CLASS_SIZE: u32 = 32;

/// Per-class character counts of a password
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClassCounts {
    pub lowercase: usize,
    pub uppercase: usize,
    pub digits: usize,
    pub symbols: usize,
}

impl ClassCounts {
    pub fn of(password: &str) -> Self {
        let mut counts = Self::default();
        for c in password.chars() {
            if c.is_ascii_lowercase() {
                counts.lowercase += 1;
            } else if c.is_ascii_uppercase() {
                counts.uppercase += 1;
            } else if c.is_ascii_digit() {
                counts.digits += 1;
            } else {
                counts.symbols += 1;
            }
        }
        counts
    }
}

/// Heuristic strength score in 0..=100.
///
/// The hygiene bonus reflects what the caller asked for in `options`, not
/// what the password happens to contain.
pub fn calculate_strength(password: &str, options: &GenerationOptions) -> u8 {
    let mut score: i32 = 0;
    let length = password.chars().count();
    let counts = ClassCounts::of(password);

    // Length (0-40 points)
    for threshold in [8, 12, 16, 20] {
        if length >= threshold {
            score += 10;
        }
    }

    // Variety (0-30 points)
    if counts.lowercase > 0 {
        score += 5;
    }
    if counts.uppercase > 0 {
        score += 5;
    }
    if counts.digits > 0 {
        score += 5;
    }
    if counts.symbols > 0 {
        score += 10;
    }
    if count_unique_characters(password) as f64 > length as f64 * 0.7 {
        score += 5;
    }

    // Penalties
    if has_repeating_pattern(password) {
        score -= 10;
    }
    if has_sequential_pattern(password) {
        score -= 10;
    }
    if has_common_pattern(password) {
        score -= 5;
    }

    if options.exclude_similar {
        score += 5;
    }
    if options.exclude_ambiguous {
        score += 5;
    }

    score.clamp(0, 100) as u8
}

/// `length * log2(S)` where `S` sums the sizes of the classes that appear
/// in the password. An approximation derived from the output, not from the
/// alphabet that produced it.
pub fn calculate_entropy(password: &str) -> f64 {
    let size = character_set_size(password);
    if size == 0 {
        return 0.0;
    }
    password.chars().count() as f64 * f64::from(size).log2()
}

pub fn character_set_size(password: &str) -> u32 {
    let counts = ClassCounts::of(password);
    let mut size = 0;
    if counts.lowercase > 0 {
        size += 26;
    }
    if counts.uppercase > 0 {
        size += 26;
    }
    if counts.digits > 0 {
        size += 10;
    }
    if counts.symbols > 0 {
        size += SYMBOL_CLASS_SIZE;
    }
    size
}

pub fn count_unique_characters(password: &str) -> usize {
    password.chars().collect::<HashSet<_>>().len()
}

/// True when some prefix of 2..=len/2 characters occurs doubled anywhere.
pub fn has_repeating_pattern(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    (2..=chars.len() / 2).any(|i| {
        let prefix: String = chars[..i].iter().collect();
        password.contains(&prefix.repeat(2))
    })
}

/// True when any three-character run of digits or letters, ascending or
/// descending, appears case-insensitively.
pub fn has_sequential_pattern(password: &str) -> bool {
    let lowered = password.to_lowercase();
    for sequence in [DIGITS, LOWERCASE] {
        let forward: Vec<char> = sequence.chars().collect();
        let reversed: Vec<char> = forward.iter().rev().copied().collect();
        for seq in [forward, reversed] {
            let found = seq
                .windows(3)
                .any(|w| lowered.contains(&w.iter().collect::<String>()));
            if found {
                return true;
            }
        }
    }
    false
}

pub fn has_common_pattern(password: &str) -> bool {
    let lowered = password.to_lowercase();
    COMMON_PATTERNS.iter().any(|p| lowered.contains(p))
}

/// Length of the longest run of identical adjacent characters
pub fn longest_run(password: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut prev = None;
    for c in password.chars() {
        if Some(c) == prev {
            current += 1;
        } else {
            current = 1;
            prev = Some(c);
        }
        longest = longest.max(current);
    }
    longest
}

pub fn validate_requirements(password: &str, requirements: &Requirements) -> bool {
    let length = password.chars().count();
    let counts = ClassCounts::of(password);

    if requirements.min_length > 0 && length < requirements.min_length {
        return false;
    }
    if requirements.max_length > 0 && length > requirements.max_length {
        return false;
    }
    if counts.uppercase < requirements.min_uppercase
        || counts.lowercase < requirements.min_lowercase
        || counts.digits < requirements.min_numbers
        || counts.symbols < requirements.min_symbols
    {
        return false;
    }
    if requirements.max_consecutive > 0 && longest_run(password) > requirements.max_consecutive {
        return false;
    }

    true
}

/// Human-readable advice for a scored password
pub fn strength_feedback(password: &str, strength: u8) -> Vec<String> {
    let mut feedback = Vec::new();
    let counts = ClassCounts::of(password);
    let length = password.chars().count();

    feedback.push(format!("{} password", crate::utils::strength_label(strength)));

    if counts.uppercase == 0 {
        feedback.push("Add uppercase letters for better security".to_string());
    }
    if counts.digits == 0 {
        feedback.push("Add numbers for better security".to_string());
    }
    if counts.symbols == 0 {
        feedback.push("Add symbols for better security".to_string());
    }
    if length < 12 {
        feedback.push("Increase password length to at least 12 characters".to_string());
    } else if length < 16 && strength >= 60 {
        feedback.push("For maximum security, consider increasing length to 16+ characters".to_string());
    }
    if has_sequential_pattern(password) {
        feedback.push("Avoid sequences such as 'abc' or '123'".to_string());
    }
    if has_repeating_pattern(password) {
        feedback.push("Avoid repeating the same chunk of characters".to_string());
    }
    if has_common_pattern(password) {
        feedback.push("Avoid common words and keyboard patterns".to_string());
    }

    feedback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_hygiene() -> GenerationOptions {
        GenerationOptions::unscoped()
    }

    #[test]
    fn entropy_of_worked_example() {
        let entropy = calculate_entropy("aA1!");
        assert!((entropy - 4.0 * 94f64.log2()).abs() < 1e-9);
        assert!((entropy - 26.22).abs() < 0.01);
    }

    #[test]
    fn entropy_counts_only_present_classes() {
        assert!((calculate_entropy("abcd") - 4.0 * 26f64.log2()).abs() < 1e-9);
        assert!((calculate_entropy("12") - 2.0 * 10f64.log2()).abs() < 1e-9);
        assert!((calculate_entropy("é") - 32f64.log2()).abs() < 1e-9);
        assert_eq!(calculate_entropy(""), 0.0);
    }

    #[test]
    fn strength_is_deterministic() {
        let options = GenerationOptions::default();
        let a = calculate_strength("Xk#9vR!m2Qe$7tWz", &options);
        let b = calculate_strength("Xk#9vR!m2Qe$7tWz", &options);
        assert_eq!(a, b);
    }

    #[test]
    fn strength_of_strong_random_password() {
        // 16 chars: +30 length, +25 variety, +5 unique, +10 hygiene
        assert_eq!(calculate_strength("Xk#9vR!m2Qe$7tWz", &GenerationOptions::default()), 70);
        assert_eq!(calculate_strength("Xk#9vR!m2Qe$7tWz", &no_hygiene()), 60);
    }

    #[test]
    fn strength_penalties_and_floor() {
        // "password": +10 length, +5 lower, +5 unique, -5 common pattern
        assert_eq!(calculate_strength("password", &no_hygiene()), 15);
        // "abcabc": sequential -10, repeating -10, lower +5
        assert_eq!(calculate_strength("abcabc", &no_hygiene()), 0);
        assert_eq!(calculate_strength("", &no_hygiene()), 0);
    }

    #[test]
    fn strength_never_exceeds_hundred() {
        let long = "Xk#9vR!m2Qe$7tWzPy&4Nh%8Jd";
        assert!(calculate_strength(long, &GenerationOptions::default()) <= 100);
    }

    #[test]
    fn repeating_pattern_detection() {
        assert!(has_repeating_pattern("abab"));
        assert!(has_repeating_pattern("xyQxyQ12"));
        assert!(has_repeating_pattern("k9k9abc"));
        // only prefixes are considered
        assert!(!has_repeating_pattern("zk9k9z"));
        assert!(!has_repeating_pattern("abcd"));
        assert!(!has_repeating_pattern("a"));
    }

    #[test]
    fn sequential_pattern_detection() {
        assert!(has_sequential_pattern("x123y"));
        assert!(has_sequential_pattern("qCBAq"));
        assert!(has_sequential_pattern("XYZ"));
        assert!(has_sequential_pattern("987"));
        assert!(!has_sequential_pattern("a1b2c3"));
        assert!(!has_sequential_pattern("acegik"));
    }

    #[test]
    fn common_pattern_detection() {
        assert!(has_common_pattern("myQWERTYkeys"));
        assert!(has_common_pattern("LetMeIn!"));
        assert!(!has_common_pattern("Xk#9vR!m"));
    }

    #[test]
    fn consecutive_run_boundary() {
        let requirements = Requirements {
            min_length: 0,
            max_length: 0,
            min_uppercase: 0,
            min_lowercase: 0,
            min_numbers: 0,
            min_symbols: 0,
            max_consecutive: 2,
        };
        assert!(validate_requirements("aab1", &requirements));
        assert!(!validate_requirements("aaab1", &requirements));
    }

    #[test]
    fn requirement_minimums_enforced() {
        let requirements = Requirements {
            min_length: 8,
            max_length: 12,
            min_uppercase: 2,
            min_lowercase: 1,
            min_numbers: 1,
            min_symbols: 1,
            max_consecutive: 2,
        };
        assert!(validate_requirements("AbC1!xyz", &requirements));
        assert!(!validate_requirements("Abc1!xyz", &requirements));
        assert!(!validate_requirements("AbC1!", &requirements));
        assert!(!validate_requirements("AbC1!xyzxyzxyz", &requirements));
        assert!(!validate_requirements("AbCd!xyz", &requirements));
    }

    #[test]
    fn longest_run_counts_chars() {
        assert_eq!(longest_run(""), 0);
        assert_eq!(longest_run("abc"), 1);
        assert_eq!(longest_run("abbbc"), 3);
        assert_eq!(longest_run("aabb"), 2);
    }

    #[test]
    fn feedback_mentions_missing_classes() {
        let feedback = strength_feedback("abcdefgh", 20);
        assert!(feedback.iter().any(|f| f.contains("uppercase")));
        assert!(feedback.iter().any(|f| f.contains("numbers")));
        assert!(feedback.iter().any(|f| f.contains("sequences")));
    }
}
