// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::utils::lenient;
use crate::models::{
    GeneratedPassword, GenerationOptions, HistoryEntry, MemorableOptions, PasswordStats, Requirements,
};
use crate::logging::LogEntry;

// Every request field is optional; absent or mistyped values fall back to
// the engine defaults.

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct GenerationRequest {
    /// Password length (default 16)
    #[serde(default, deserialize_with = "lenient")]
    pub length: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub include_uppercase: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub include_lowercase: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub include_numbers: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub include_symbols: Option<bool>,
    /// Drop look-alike characters (default true)
    #[serde(default, deserialize_with = "lenient")]
    pub exclude_similar: Option<bool>,
    /// Drop brackets, slashes and similar punctuation (default true)
    #[serde(default, deserialize_with = "lenient")]
    pub exclude_ambiguous: Option<bool>,
    /// Replaces the default symbol set when non-empty
    #[serde(default, deserialize_with = "lenient")]
    pub custom_symbols: Option<String>,
    /// Characters removed from the final set
    #[serde(default, deserialize_with = "lenient")]
    pub exclude_characters: Option<String>,
}

impl GenerationRequest {
    pub fn to_options(&self) -> GenerationOptions {
        let defaults = GenerationOptions::default();
        GenerationOptions {
            length: self.length.unwrap_or(defaults.length),
            include_uppercase: self.include_uppercase.unwrap_or(defaults.include_uppercase),
            include_lowercase: self.include_lowercase.unwrap_or(defaults.include_lowercase),
            include_numbers: self.include_numbers.unwrap_or(defaults.include_numbers),
            include_symbols: self.include_symbols.unwrap_or(defaults.include_symbols),
            exclude_similar: self.exclude_similar.unwrap_or(defaults.exclude_similar),
            exclude_ambiguous: self.exclude_ambiguous.unwrap_or(defaults.exclude_ambiguous),
            custom_symbols: self.custom_symbols.clone().unwrap_or(defaults.custom_symbols),
            exclude_characters: self.exclude_characters.clone().unwrap_or(defaults.exclude_characters),
        }
    }

    /// Options for scoring: only exclusions the client actually sent earn
    /// the hygiene bonus.
    pub fn scoring_options(&self) -> GenerationOptions {
        GenerationOptions {
            exclude_similar: self.exclude_similar.unwrap_or(false),
            exclude_ambiguous: self.exclude_ambiguous.unwrap_or(false),
            ..self.to_options()
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct MemorableRequest {
    /// Number of dictionary words (default 4)
    #[serde(default, deserialize_with = "lenient")]
    pub word_count: Option<usize>,
    /// Word separator (default "-")
    #[serde(default, deserialize_with = "lenient")]
    pub separator: Option<String>,
    /// Append a digit before the trailing symbol (default true)
    #[serde(default, deserialize_with = "lenient")]
    pub include_numbers: Option<bool>,
}

impl MemorableRequest {
    pub fn to_options(&self) -> MemorableOptions {
        let defaults = MemorableOptions::default();
        MemorableOptions {
            word_count: self.word_count.unwrap_or(defaults.word_count),
            separator: self.separator.clone().unwrap_or(defaults.separator),
            include_numbers: self.include_numbers.unwrap_or(defaults.include_numbers),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct RequirementsRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub min_length: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_length: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_uppercase: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_lowercase: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_numbers: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub min_symbols: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_consecutive: Option<usize>,
}

impl RequirementsRequest {
    pub fn to_requirements(&self) -> Requirements {
        let defaults = Requirements::default();
        Requirements {
            min_length: self.min_length.unwrap_or(defaults.min_length),
            max_length: self.max_length.unwrap_or(defaults.max_length),
            min_uppercase: self.min_uppercase.unwrap_or(defaults.min_uppercase),
            min_lowercase: self.min_lowercase.unwrap_or(defaults.min_lowercase),
            min_numbers: self.min_numbers.unwrap_or(defaults.min_numbers),
            min_symbols: self.min_symbols.unwrap_or(defaults.min_symbols),
            max_consecutive: self.max_consecutive.unwrap_or(defaults.max_consecutive),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct MultipleRequest {
    /// Number of passwords (default 5)
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<usize>,
    #[serde(default, deserialize_with = "lenient")]
    pub options: Option<GenerationRequest>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Maximum number of entries, most recent first
    pub limit: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MultipleResponse {
    pub passwords: Vec<GeneratedPassword>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub stats: PasswordStats,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordAnalysisResponse {
    pub success: bool,
    pub strength: u8,
    pub entropy: f64,
    pub feedback: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LogsResponse {
    pub success: bool,
    pub entries: Vec<LogEntry>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    /// Whether the operation was successful
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let request: GenerationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.to_options(), GenerationOptions::default());

        let request: RequirementsRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.to_requirements(), Requirements::default());

        let request: MemorableRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.to_options(), MemorableOptions::default());
    }

    #[test]
    fn mistyped_fields_take_defaults() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"length": "twenty", "include_symbols": false, "exclude_similar": 3}"#).unwrap();
        let options = request.to_options();
        assert_eq!(options.length, 16);
        assert!(!options.include_symbols);
        assert!(options.exclude_similar);
    }

    #[test]
    fn defaulted_exclusions_are_not_scored() {
        let request: GenerationRequest = serde_json::from_str("{}").unwrap();
        let options = request.to_options();
        let scoring = request.scoring_options();
        assert!(options.exclude_similar && options.exclude_ambiguous);
        assert!(!scoring.exclude_similar && !scoring.exclude_ambiguous);

        let request: GenerationRequest =
            serde_json::from_str(r#"{"exclude_similar": true, "exclude_ambiguous": "yes"}"#).unwrap();
        let scoring = request.scoring_options();
        assert!(scoring.exclude_similar);
        assert!(!scoring.exclude_ambiguous);
    }

    #[test]
    fn nested_options_are_lenient() {
        let request: MultipleRequest =
            serde_json::from_str(r#"{"count": 3, "options": {"length": 20, "include_numbers": "no"}}"#).unwrap();
        assert_eq!(request.count, Some(3));
        let options = request.options.unwrap().to_options();
        assert_eq!(options.length, 20);
        assert!(options.include_numbers);

        let request: MultipleRequest = serde_json::from_str(r#"{"count": -1, "options": 7}"#).unwrap();
        assert!(request.count.is_none());
        assert!(request.options.is_none());
    }
}
