// src/cli/commands.rs
use clap::Subcommand;

use crate::models::{GenerationOptions, Requirements};

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, env = "WEB_PORT")]
        port: Option<u16>,

        /// Address to bind
        #[arg(long, env = "WEB_ADDRESS")]
        address: Option<String>,
    },

    /// Generate a random password
    Generate(GenerateArgs),

    /// Generate several random passwords with the same options
    Multiple {
        /// Number of passwords
        #[arg(long, short = 'n', default_value_t = 5)]
        count: usize,

        #[command(flatten)]
        options: GenerateArgs,
    },

    /// Generate a memorable word-based password
    Memorable {
        /// Number of words
        #[arg(long, short, default_value_t = 4)]
        words: usize,

        /// Separator between words
        #[arg(long, short, default_value = "-")]
        separator: String,

        /// Do not append a digit
        #[arg(long)]
        no_numbers: bool,
    },

    /// Generate a password satisfying minimum character counts
    Requirements(RequirementsArgs),

    /// Score an existing password
    Analyze {
        /// Password to analyze
        #[arg(required = true)]
        password: String,
    },

    /// Issue a bearer token for the API (requires JWT_SECRET)
    Token {
        /// Subject (user id) to put in the token
        #[arg(required = true)]
        subject: String,

        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Password length
    #[arg(long, short, default_value_t = 16)]
    pub length: usize,

    #[arg(long)]
    pub no_uppercase: bool,

    #[arg(long)]
    pub no_lowercase: bool,

    #[arg(long)]
    pub no_numbers: bool,

    #[arg(long)]
    pub no_symbols: bool,

    /// Keep look-alike characters such as l, 1, O and 0
    #[arg(long)]
    pub allow_similar: bool,

    /// Keep brackets, slashes and similar punctuation
    #[arg(long)]
    pub allow_ambiguous: bool,

    /// Symbol set replacing the default one
    #[arg(long)]
    pub symbols: Option<String>,

    /// Characters that must never appear
    #[arg(long)]
    pub exclude: Option<String>,
}

impl GenerateArgs {
    pub fn to_options(&self) -> GenerationOptions {
        GenerationOptions {
            length: self.length,
            include_uppercase: !self.no_uppercase,
            include_lowercase: !self.no_lowercase,
            include_numbers: !self.no_numbers,
            include_symbols: !self.no_symbols,
            exclude_similar: !self.allow_similar,
            exclude_ambiguous: !self.allow_ambiguous,
            custom_symbols: self.symbols.clone().unwrap_or_default(),
            exclude_characters: self.exclude.clone().unwrap_or_default(),
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct RequirementsArgs {
    #[arg(long, default_value_t = 8)]
    pub min_length: usize,

    #[arg(long, default_value_t = 128)]
    pub max_length: usize,

    #[arg(long, default_value_t = 1)]
    pub min_uppercase: usize,

    #[arg(long, default_value_t = 1)]
    pub min_lowercase: usize,

    #[arg(long, default_value_t = 1)]
    pub min_numbers: usize,

    #[arg(long, default_value_t = 1)]
    pub min_symbols: usize,

    /// Longest allowed run of one repeated character
    #[arg(long, default_value_t = 2)]
    pub max_consecutive: usize,
}

impl RequirementsArgs {
    pub fn to_requirements(&self) -> Requirements {
        Requirements {
            min_length: self.min_length,
            max_length: self.max_length,
            min_uppercase: self.min_uppercase,
            min_lowercase: self.min_lowercase,
            min_numbers: self.min_numbers,
            min_symbols: self.min_symbols,
            max_consecutive: self.max_consecutive,
        }
    }
}
