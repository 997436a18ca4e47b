// src/generators/mod.rs
use thiserror::Error;

pub mod charset;
pub mod history;
pub mod memorable;
pub mod password;
pub mod strength;

pub use password::{GenerationObserver, PasswordEngine};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Could not generate password meeting all requirements after {attempts} attempts")]
    RequirementsUnsatisfiable { attempts: usize },
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
