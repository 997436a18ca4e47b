// src/generators/memorable.rs
use crate::crypto::{choose, SecureRandom};
use crate::models::MemorableOptions;

pub const WORDS: [&str; 38] = [
    "apple", "banana", "cherry", "dragon", "eagle", "forest", "garden", "house",
    "island", "jungle", "knight", "ladder", "mountain", "ocean", "palace", "queen",
    "river", "sunset", "tiger", "umbrella", "village", "winter", "yellow", "zebra",
    "adventure", "butterfly", "crystal", "diamond", "elephant", "firework", "galaxy",
    "harmony", "infinity", "journey", "kangaroo", "lightning", "mystery", "nature",
];

pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
pub const SYMBOLS: [char; 5] = ['!', '@', '#', '$', '%'];

/// Builds `word-word-...[digit]symbol` from independently drawn words.
pub fn compose(rng: &mut dyn SecureRandom, options: &MemorableOptions) -> String {
    let words: Vec<&str> = (0..options.word_count)
        .filter_map(|_| choose(rng, &WORDS).copied())
        .collect();

    let mut password = words.join(&options.separator);

    if options.include_numbers {
        if let Some(digit) = choose(rng, &DIGITS) {
            password.push(*digit);
        }
    }
    if let Some(symbol) = choose(rng, &SYMBOLS) {
        password.push(*symbol);
    }

    password
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::seeded_random;

    #[test]
    fn shape_with_number() {
        let mut rng = seeded_random(3);
        let options = MemorableOptions::default();
        let password = compose(rng.as_mut(), &options);

        let symbol = password.chars().last().unwrap();
        assert!(SYMBOLS.contains(&symbol));
        let digit = password.chars().rev().nth(1).unwrap();
        assert!(digit.is_ascii_digit());

        let body = &password[..password.len() - 2];
        let words: Vec<&str> = body.split('-').collect();
        assert_eq!(words.len(), 4);
        assert!(words.iter().all(|w| WORDS.contains(w)));
    }

    #[test]
    fn shape_without_number() {
        let mut rng = seeded_random(9);
        let options = MemorableOptions {
            word_count: 2,
            separator: ".".to_string(),
            include_numbers: false,
        };
        let password = compose(rng.as_mut(), &options);
        let body = &password[..password.len() - 1];
        assert!(!body.chars().any(|c| c.is_ascii_digit()));
        assert_eq!(body.split('.').count(), 2);
    }

    #[test]
    fn zero_words_still_gets_symbol() {
        let mut rng = seeded_random(1);
        let options = MemorableOptions {
            word_count: 0,
            separator: "-".to_string(),
            include_numbers: false,
        };
        let password = compose(rng.as_mut(), &options);
        assert_eq!(password.chars().count(), 1);
    }
}
