// src/utils/format.rs
use chrono::{DateTime, Utc};

// Format a duration for display
pub fn format_time_ago(time: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(time);

    let seconds = duration.num_seconds().max(0);

    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", duration.num_minutes())
    } else if seconds < 86400 {
        format!("{} hours ago", duration.num_hours())
    } else {
        format!("{} days ago", duration.num_days())
    }
}

/// Shows the first and last characters only
pub fn mask_password(password: &str) -> String {
    let chars: Vec<char> = password.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let hidden = "*".repeat(chars.len() - 2);
    format!("{}{}{}", chars[0], hidden, chars[chars.len() - 1])
}

pub fn strength_label(strength: u8) -> &'static str {
    match strength {
        0..=19 => "Very weak",
        20..=39 => "Weak",
        40..=59 => "Moderate",
        60..=79 => "Strong",
        _ => "Very strong",
    }
}
