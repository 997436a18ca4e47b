// src/models.rs
use uuid::Uuid;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;

// Password generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerationOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub exclude_similar: bool,
    pub exclude_ambiguous: bool,
    /// Replaces the default symbol set when non-empty
    pub custom_symbols: String,
    /// Characters removed after the set is assembled
    pub exclude_characters: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
            exclude_similar: true,
            exclude_ambiguous: true,
            custom_symbols: String::new(),
            exclude_characters: String::new(),
        }
    }
}

impl GenerationOptions {
    /// Options that request no character hygiene. Used when scoring
    /// passwords that were not produced from a character set.
    pub fn unscoped() -> Self {
        Self {
            exclude_similar: false,
            exclude_ambiguous: false,
            ..Self::default()
        }
    }
}

/// Constraints for rejection-loop generation. A zero field disables its check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Requirements {
    pub min_length: usize,
    pub max_length: usize,
    pub min_uppercase: usize,
    pub min_lowercase: usize,
    pub min_numbers: usize,
    pub min_symbols: usize,
    /// Longest allowed run of identical adjacent characters
    pub max_consecutive: usize,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            min_uppercase: 1,
            min_lowercase: 1,
            min_numbers: 1,
            min_symbols: 1,
            max_consecutive: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemorableOptions {
    pub word_count: usize,
    pub separator: String,
    pub include_numbers: bool,
}

impl Default for MemorableOptions {
    fn default() -> Self {
        Self {
            word_count: 4,
            separator: "-".to_string(),
            include_numbers: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PasswordKind {
    Standard,
    Memorable,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeneratedPassword {
    pub password: String,
    /// Heuristic score in 0..=100
    pub strength: u8,
    /// Approximate entropy in bits
    pub entropy: f64,
    pub kind: PasswordKind,
    pub timestamp: DateTime<Utc>,
}

/// The parameters a history entry was generated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOptions {
    Standard(GenerationOptions),
    Memorable(MemorableOptions),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub password: String,
    pub options: HistoryOptions,
    pub strength: u8,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PasswordStats {
    pub total_generated: usize,
    pub average_strength: f64,
    pub average_entropy: f64,
    pub most_common_length: usize,
    pub strongest_password: Option<HistoryEntry>,
    pub weakest_password: Option<HistoryEntry>,
}
