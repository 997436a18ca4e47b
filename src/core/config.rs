// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use log::LevelFilter;

// Configuration for the password generation service
#[derive(Debug, Clone)]
pub struct Config {
    // Web Interface
    pub web_address: String,
    pub web_port: u16,

    // Authentication
    pub jwt_secret: Option<String>,
    pub token_duration: Duration,

    // Password Generation
    pub min_password_length: usize,
    pub max_password_length: usize,
    pub max_batch_count: usize,
    pub default_history_limit: usize,

    // Logging
    pub log_level: LevelFilter,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Web Interface
            web_address: "127.0.0.1".to_string(),
            web_port: 5000,

            // Authentication
            jwt_secret: None,
            token_duration: Duration::from_secs(24 * 60 * 60),

            // Password Generation
            min_password_length: 8,
            max_password_length: 128,
            max_batch_count: 50,
            default_history_limit: 10,

            // Logging
            log_level: LevelFilter::Info,
            log_dir: PathBuf::from("./logs"),
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> (Self, Vec<String>) {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unparseable values keep
    /// the default and are returned as warnings, since the logger is not up
    /// yet while the config is read.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut warnings = Vec::new();

        if let Some(dir) = crate::utils::get_app_data_dir() {
            config.log_dir = dir.join("logs");
        }

        // Web Interface
        if let Some(address) = lookup("WEB_ADDRESS") {
            config.web_address = address;
        }
        parse_into(&lookup, "WEB_PORT", &mut config.web_port, &mut warnings);

        // Authentication
        config.jwt_secret = lookup("JWT_SECRET").filter(|s| !s.trim().is_empty());
        if let Some(val) = lookup("TOKEN_DURATION_HOURS") {
            match val.parse::<u64>().ok().and_then(|hours| hours.checked_mul(60 * 60)) {
                Some(secs) => config.token_duration = Duration::from_secs(secs),
                None => warnings.push(format!("Ignoring invalid TOKEN_DURATION_HOURS '{}'", val)),
            }
        }

        // Password Generation
        parse_into(&lookup, "MIN_PASSWORD_LENGTH", &mut config.min_password_length, &mut warnings);
        parse_into(&lookup, "MAX_PASSWORD_LENGTH", &mut config.max_password_length, &mut warnings);
        parse_into(&lookup, "MAX_BATCH_COUNT", &mut config.max_batch_count, &mut warnings);
        parse_into(&lookup, "DEFAULT_HISTORY_LIMIT", &mut config.default_history_limit, &mut warnings);

        if config.min_password_length > config.max_password_length {
            warnings.push(format!(
                "MIN_PASSWORD_LENGTH {} exceeds MAX_PASSWORD_LENGTH {}, restoring defaults",
                config.min_password_length, config.max_password_length
            ));
            let defaults = Config::default();
            config.min_password_length = defaults.min_password_length;
            config.max_password_length = defaults.max_password_length;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => warnings.push(format!("Unknown log level '{}', keeping {}", level, config.log_level)),
            }
        }

        if let Some(dir) = lookup("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        (config, warnings)
    }

    pub fn auth_enabled(&self) -> bool {
        self.jwt_secret.is_some()
    }

    pub fn length_in_range(&self, length: usize) -> bool {
        (self.min_password_length..=self.max_password_length).contains(&length)
    }
}

fn parse_into<F, T>(lookup: &F, key: &str, target: &mut T, warnings: &mut Vec<String>)
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(val) = lookup(key) {
        match val.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => warnings.push(format!("Ignoring invalid {} '{}'", key, val)),
        }
    }
}
