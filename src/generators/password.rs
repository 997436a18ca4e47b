// src/generators/password.rs
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use log::{debug, warn};
use uuid::Uuid;

use crate::crypto::{self, SecureRandom};
use crate::models::{
    GeneratedPassword, GenerationOptions, HistoryEntry, HistoryOptions, MemorableOptions,
    PasswordKind, PasswordStats, Requirements,
};
use super::charset::build_charset;
use super::history::GenerationHistory;
use super::{memorable, strength, GeneratorError, Result};

pub const HISTORY_CAPACITY: usize = 100;
pub const MAX_REQUIREMENT_ATTEMPTS: usize = 100;

// Preferred length for requirement-driven generation, clamped to the range
const REQUIREMENTS_TARGET_LENGTH: usize = 16;

/// Receives notifications about engine activity
pub trait GenerationObserver: Send + Sync {
    fn password_generated(&self, generated: &GeneratedPassword);

    fn history_cleared(&self) {}
}

pub struct PasswordEngine {
    rng: Mutex<Box<dyn SecureRandom>>,
    history: Mutex<GenerationHistory>,
    observer: Option<Box<dyn GenerationObserver>>,
}

impl PasswordEngine {
    pub fn new() -> Self {
        Self::with_random(crypto::os_random())
    }

    pub fn with_random(rng: Box<dyn SecureRandom>) -> Self {
        PasswordEngine {
            rng: Mutex::new(rng),
            history: Mutex::new(GenerationHistory::new(HISTORY_CAPACITY)),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn GenerationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Generates one password from the effective character set of `options`.
    ///
    /// Fails with `InvalidConfiguration` before any sampling if the set is
    /// empty.
    pub fn generate(&self, options: &GenerationOptions) -> Result<GeneratedPassword> {
        self.generate_scored(options, options)
    }

    /// Like `generate`, but the hygiene bonus follows the exclusion flags of
    /// `scoring`, i.e. what the caller explicitly asked for, while the
    /// character set still comes from `options`.
    pub fn generate_scored(&self, options: &GenerationOptions, scoring: &GenerationOptions) -> Result<GeneratedPassword> {
        let charset = build_charset(options);
        if charset.is_empty() {
            warn!("Rejected generation request: effective character set is empty");
            return Err(GeneratorError::InvalidConfiguration(
                "No valid characters available for password generation".to_string(),
            ));
        }

        let password: String = {
            let mut rng = self.rng();
            (0..options.length)
                .map(|_| charset[rng.next_index(charset.len())])
                .collect()
        };

        let strength = strength::calculate_strength(&password, scoring);
        debug!("Generated {}-character password from a {}-character set", options.length, charset.len());

        Ok(self.record(
            password,
            strength,
            PasswordKind::Standard,
            HistoryOptions::Standard(options.clone()),
        ))
    }

    /// Rejection loop: keeps generating until a candidate satisfies
    /// `requirements` or the attempt budget runs out.
    pub fn generate_with_requirements(&self, requirements: &Requirements) -> Result<GeneratedPassword> {
        let options = requirement_options(requirements);

        // no class was asked for, so nothing can ever be drawn
        if build_charset(&options).is_empty() {
            warn!("Requirements select no character classes");
            return Err(GeneratorError::RequirementsUnsatisfiable { attempts: 0 });
        }

        // the default exclusions shape the set, but none were requested
        let scoring = GenerationOptions::unscoped();
        for attempt in 1..=MAX_REQUIREMENT_ATTEMPTS {
            let candidate = self.generate_scored(&options, &scoring)?;
            if Self::validate_requirements(&candidate.password, requirements) {
                debug!("Requirements satisfied after {} attempt(s)", attempt);
                return Ok(candidate);
            }
        }

        warn!("Could not satisfy requirements within {} attempts", MAX_REQUIREMENT_ATTEMPTS);
        Err(GeneratorError::RequirementsUnsatisfiable {
            attempts: MAX_REQUIREMENT_ATTEMPTS,
        })
    }

    /// Dictionary passphrase. Scored without dictionary awareness, so the
    /// strength overstates how hard these are to guess.
    pub fn generate_memorable(&self, word_count: usize, separator: &str, include_numbers: bool) -> GeneratedPassword {
        let options = MemorableOptions {
            word_count,
            separator: separator.to_string(),
            include_numbers,
        };

        let password = {
            let mut rng = self.rng();
            memorable::compose(rng.as_mut(), &options)
        };

        let strength = strength::calculate_strength(&password, &GenerationOptions::unscoped());

        self.record(
            password,
            strength,
            PasswordKind::Memorable,
            HistoryOptions::Memorable(options),
        )
    }

    /// Independent generations; duplicates are possible.
    pub fn generate_multiple(&self, count: usize, options: &GenerationOptions) -> Result<Vec<GeneratedPassword>> {
        self.generate_multiple_scored(count, options, options)
    }

    pub fn generate_multiple_scored(
        &self,
        count: usize,
        options: &GenerationOptions,
        scoring: &GenerationOptions,
    ) -> Result<Vec<GeneratedPassword>> {
        (0..count).map(|_| self.generate_scored(options, scoring)).collect()
    }

    /// Length used for requirement-driven generation:
    /// `max(min_length, min(max_length, 16))`.
    pub fn requirement_length(requirements: &Requirements) -> usize {
        requirements
            .min_length
            .max(requirements.max_length.min(REQUIREMENTS_TARGET_LENGTH))
    }

    pub fn calculate_strength(password: &str, options: &GenerationOptions) -> u8 {
        strength::calculate_strength(password, options)
    }

    pub fn calculate_entropy(password: &str) -> f64 {
        strength::calculate_entropy(password)
    }

    pub fn validate_requirements(password: &str, requirements: &Requirements) -> bool {
        strength::validate_requirements(password, requirements)
    }

    pub fn get_history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.history().recent(limit)
    }

    pub fn clear_history(&self) {
        self.history().clear();
        if let Some(observer) = &self.observer {
            observer.history_cleared();
        }
    }

    pub fn get_stats(&self) -> PasswordStats {
        self.history().stats()
    }

    fn record(
        &self,
        password: String,
        strength: u8,
        kind: PasswordKind,
        options: HistoryOptions,
    ) -> GeneratedPassword {
        let timestamp = Utc::now();
        let generated = GeneratedPassword {
            entropy: strength::calculate_entropy(&password),
            password,
            strength,
            kind,
            timestamp,
        };

        self.history().push(HistoryEntry {
            id: Uuid::new_v4(),
            password: generated.password.clone(),
            options,
            strength,
            timestamp,
        });

        if let Some(observer) = &self.observer {
            observer.password_generated(&generated);
        }

        generated
    }

    fn rng(&self) -> MutexGuard<'_, Box<dyn SecureRandom>> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn history(&self) -> MutexGuard<'_, GenerationHistory> {
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for PasswordEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn requirement_options(requirements: &Requirements) -> GenerationOptions {
    GenerationOptions {
        length: PasswordEngine::requirement_length(requirements),
        include_uppercase: requirements.min_uppercase > 0,
        include_lowercase: requirements.min_lowercase > 0,
        include_numbers: requirements.min_numbers > 0,
        include_symbols: requirements.min_symbols > 0,
        ..GenerationOptions::default()
    }
}
