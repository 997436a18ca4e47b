// src/logging/mod.rs
use std::path::PathBuf;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

use crate::generators::GenerationObserver;
use crate::models::{GeneratedPassword, PasswordKind};

pub const AUDIT_COMPONENT: &str = "Generator";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Log rotation error: {0}")]
    RotationError(String),
}

pub type Result<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl LogLevel {
    fn rank(self) -> u8 {
        match self {
            LogLevel::Debug => 0,
            LogLevel::Info => 1,
            LogLevel::Warning => 2,
            LogLevel::Error => 3,
            LogLevel::Critical => 4,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub component: String,
    pub message: String,
    pub error_details: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Minimum severity to include
    pub level: Option<LogLevel>,
    pub component: Option<String>,
    pub search_term: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Append-only audit log with size-based rotation.
///
/// Line format: `RFC3339 [LEVEL] [component] message [Error: details]`
pub struct Logger {
    log_dir: PathBuf,
    current_log_file: PathBuf,
    max_log_size: u64,        // Maximum size of a log file before rotation (in bytes)
    max_log_files: usize,     // Maximum number of log files to keep
}

impl Logger {
    pub fn new(log_dir: PathBuf) -> Result<Self> {
        if !log_dir.exists() {
            fs::create_dir_all(&log_dir)?;
        }

        let current_log_file = log_dir.join("passgen-audit.log");

        if !current_log_file.exists() {
            File::create(&current_log_file)?;
        }

        Ok(Self {
            log_dir,
            current_log_file,
            max_log_size: 10 * 1024 * 1024,  // 10 MB default
            max_log_files: 5,                // Keep 5 log files by default
        })
    }

    pub fn with_limits(mut self, max_log_size: u64, max_log_files: usize) -> Self {
        self.max_log_size = max_log_size;
        self.max_log_files = max_log_files.max(1);
        self
    }

    pub fn log(&self, level: LogLevel, component: &str, message: &str,
               error_details: Option<&str>) -> Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            component: component.to_string(),
            message: message.to_string(),
            error_details: error_details.map(String::from),
        };

        self.check_rotation()?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.current_log_file)?;

        let log_line = format!("{} [{}] [{}] {}{}\n",
            entry.timestamp.to_rfc3339(),
            entry.level,
            entry.component,
            entry.message,
            entry.error_details.map_or(String::new(), |err| format!(" [Error: {}]", err))
        );

        file.write_all(log_line.as_bytes())?;

        Ok(())
    }

    // Get logs with filtering, newest last
    pub fn get_logs(&self, filter: &LogFilter) -> Result<Vec<LogEntry>> {
        let content = fs::read_to_string(&self.current_log_file)?;

        let entries: Vec<LogEntry> = content
            .lines()
            .filter_map(parse_log_line)
            .filter(|entry| entry_matches_filter(entry, filter))
            .collect();

        let offset = filter.offset.unwrap_or(0).min(entries.len());
        let limit = filter.limit.unwrap_or(usize::MAX);

        Ok(entries.into_iter().skip(offset).take(limit).collect())
    }

    fn check_rotation(&self) -> Result<()> {
        let metadata = match fs::metadata(&self.current_log_file) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if metadata.len() > self.max_log_size {
            self.rotate_logs()?;
        }

        Ok(())
    }

    fn rotate_logs(&self) -> Result<()> {
        let timestamp = Utc::now().format("%Y%m%d%H%M%S%f");
        let rotated_log_file = self.log_dir.join(format!("passgen-audit-{}.log", timestamp));

        fs::rename(&self.current_log_file, &rotated_log_file)
            .map_err(|e| LoggingError::RotationError(format!("{}: {}", rotated_log_file.display(), e)))?;

        File::create(&self.current_log_file)?;

        self.cleanup_old_logs()
    }

    // Keep only the newest rotated files
    fn cleanup_old_logs(&self) -> Result<()> {
        let mut log_files = Vec::new();

        for entry in fs::read_dir(&self.log_dir)? {
            let path = entry?.path();

            let is_rotated = path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with("passgen-audit-") && n.ends_with(".log"));

            if path.is_file() && is_rotated {
                log_files.push(path);
            }
        }

        // Timestamped names sort chronologically; newest first
        log_files.sort();
        log_files.reverse();

        for file in log_files.iter().skip(self.max_log_files - 1) {
            fs::remove_file(file)?;
        }

        Ok(())
    }
}

fn parse_log_line(line: &str) -> Option<LogEntry> {
    let (timestamp_str, rest) = line.split_once(' ')?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str).ok()?.with_timezone(&Utc);

    let rest = rest.strip_prefix('[')?;
    let (level_str, rest) = rest.split_once("] [")?;
    let level = match level_str {
        "DEBUG" => LogLevel::Debug,
        "INFO" => LogLevel::Info,
        "WARNING" => LogLevel::Warning,
        "ERROR" => LogLevel::Error,
        "CRITICAL" => LogLevel::Critical,
        _ => return None,
    };

    let (component, rest) = rest.split_once("] ")?;

    let (message, error_details) = match rest.find(" [Error: ") {
        Some(start) => {
            let details = rest[start + 9..].trim_end_matches(']');
            (&rest[..start], Some(details.to_string()))
        }
        None => (rest, None),
    };

    Some(LogEntry {
        timestamp,
        level,
        component: component.to_string(),
        message: message.trim().to_string(),
        error_details,
    })
}

fn entry_matches_filter(entry: &LogEntry, filter: &LogFilter) -> bool {
    if let Some(start_date) = filter.start_date {
        if entry.timestamp < start_date {
            return false;
        }
    }

    if let Some(end_date) = filter.end_date {
        if entry.timestamp > end_date {
            return false;
        }
    }

    if let Some(level) = filter.level {
        if entry.level.rank() < level.rank() {
            return false;
        }
    }

    if let Some(component) = &filter.component {
        if !entry.component.contains(component.as_str()) {
            return false;
        }
    }

    if let Some(term) = &filter.search_term {
        if !entry.message.contains(term.as_str())
            && !entry.component.contains(term.as_str())
            && !entry.error_details.as_ref().map_or(false, |err| err.contains(term.as_str()))
        {
            return false;
        }
    }

    true
}

/// Writes generation events to the audit log. The password itself is
/// never recorded.
pub struct AuditObserver {
    logger: std::sync::Arc<Logger>,
}

impl AuditObserver {
    pub fn new(logger: std::sync::Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl GenerationObserver for AuditObserver {
    fn password_generated(&self, generated: &GeneratedPassword) {
        let kind = match generated.kind {
            PasswordKind::Standard => "standard",
            PasswordKind::Memorable => "memorable",
        };
        let message = format!(
            "Generated {} password (length {}, strength {}, entropy {:.1} bits)",
            kind,
            generated.password.chars().count(),
            generated.strength,
            generated.entropy
        );
        if let Err(e) = self.logger.log(LogLevel::Info, AUDIT_COMPONENT, &message, None) {
            log::warn!("Failed to write audit entry: {}", e);
        }
    }

    fn history_cleared(&self) {
        if let Err(e) = self.logger.log(LogLevel::Info, AUDIT_COMPONENT, "Generation history cleared", None) {
            log::warn!("Failed to write audit entry: {}", e);
        }
    }
}

/// Console logging through `env_logger`; `RUST_LOG` still overrides.
pub fn init_console_logger(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp_secs()
        .format_module_path(true)
        .try_init();
}
