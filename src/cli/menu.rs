// src/cli/menu.rs
use inquire::{Confirm, CustomType, InquireError, Password, Select, Text};
use std::error::Error;

use crate::cli::handlers::{print_generated, styled_strength};
use crate::core::config::Config;
use crate::generators::{strength, PasswordEngine};
use crate::models::{GenerationOptions, HistoryOptions, Requirements};
use crate::utils::{format_time_ago, mask_password, strength_label};

const GENERATE: &str = "🔐  Generate secure password";
const MEMORABLE: &str = "🧠  Generate memorable password";
const REQUIREMENTS: &str = "📏  Generate with requirements";
const MULTIPLE: &str = "🔢  Generate several passwords";
const ANALYZE: &str = "🔍  Analyze a password";
const HISTORY: &str = "📜  View history";
const STATS: &str = "📊  View statistics";
const CLEAR: &str = "🗑️  Clear history";
const EXIT: &str = "❌  Exit";

pub fn run_cli_menu(engine: &PasswordEngine, config: &Config) -> Result<(), Box<dyn Error>> {
    println!("🦀🔐 Welcome to");
    println!("╔══════════════════════════════════════╗");
    println!("║        🦀 RUSTPASSGEN GENERATOR      ║");
    println!("╚══════════════════════════════════════╝");

    loop {
        let choice = Select::new(
            "What would you like to do?",
            vec![GENERATE, MEMORABLE, REQUIREMENTS, MULTIPLE, ANALYZE, HISTORY, STATS, CLEAR, EXIT],
        )
        .prompt();

        let choice = match choice {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(Box::new(e)),
        };

        let result = match choice {
            GENERATE => generate_menu(engine, config),
            MEMORABLE => memorable_menu(engine),
            REQUIREMENTS => requirements_menu(engine, config),
            MULTIPLE => multiple_menu(engine, config),
            ANALYZE => analyze_menu(),
            HISTORY => history_menu(engine, config),
            STATS => {
                show_stats(engine);
                Ok(())
            }
            CLEAR => clear_menu(engine),
            _ => break,
        };

        match result {
            Ok(()) => {}
            // Esc inside a sub-prompt returns to the main menu
            Err(e) if is_cancel(e.as_ref()) => println!("↩️  Cancelled"),
            Err(e) => println!("❌ {}", e),
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}

fn is_cancel(error: &(dyn Error + 'static)) -> bool {
    matches!(
        error.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled)
    )
}

fn prompt_options(config: &Config) -> Result<GenerationOptions, Box<dyn Error>> {
    let length: usize = CustomType::new("Password length:")
        .with_default(16)
        .with_error_message("Please enter a valid number")
        .prompt()?;

    if !config.length_in_range(length) {
        return Err(format!(
            "Password length must be between {} and {} characters",
            config.min_password_length, config.max_password_length
        )
        .into());
    }

    let include_uppercase = Confirm::new("Include uppercase letters?").with_default(true).prompt()?;
    let include_lowercase = Confirm::new("Include lowercase letters?").with_default(true).prompt()?;
    let include_numbers = Confirm::new("Include numbers?").with_default(true).prompt()?;
    let include_symbols = Confirm::new("Include symbols?").with_default(true).prompt()?;
    let exclude_similar = Confirm::new("Exclude look-alike characters (l, 1, O, 0)?")
        .with_default(true)
        .prompt()?;
    let exclude_ambiguous = Confirm::new("Exclude brackets and slashes?").with_default(true).prompt()?;
    let custom_symbols = if include_symbols {
        Text::new("Custom symbols (leave empty for default):").prompt()?
    } else {
        String::new()
    };
    let exclude_characters = Text::new("Characters to exclude (leave empty for none):").prompt()?;

    Ok(GenerationOptions {
        length,
        include_uppercase,
        include_lowercase,
        include_numbers,
        include_symbols,
        exclude_similar,
        exclude_ambiguous,
        custom_symbols,
        exclude_characters,
    })
}

fn generate_menu(engine: &PasswordEngine, config: &Config) -> Result<(), Box<dyn Error>> {
    let options = prompt_options(config)?;
    let generated = engine.generate(&options)?;
    print_generated(&generated);
    Ok(())
}

fn memorable_menu(engine: &PasswordEngine) -> Result<(), Box<dyn Error>> {
    let words: usize = CustomType::new("Number of words:")
        .with_default(4)
        .with_error_message("Please enter a valid number")
        .prompt()?;
    if words == 0 {
        return Err("Word count must be at least 1".into());
    }
    let separator = Text::new("Separator:").with_default("-").prompt()?;
    let include_numbers = Confirm::new("Append a number?").with_default(true).prompt()?;

    let generated = engine.generate_memorable(words, &separator, include_numbers);
    print_generated(&generated);
    Ok(())
}

fn requirements_menu(engine: &PasswordEngine, config: &Config) -> Result<(), Box<dyn Error>> {
    let defaults = Requirements::default();
    let ask = |message: &str, default: usize| -> Result<usize, InquireError> {
        CustomType::new(message)
            .with_default(default)
            .with_error_message("Please enter a valid number")
            .prompt()
    };

    let requirements = Requirements {
        min_length: ask("Minimum length:", defaults.min_length)?,
        max_length: ask("Maximum length:", defaults.max_length)?,
        min_uppercase: ask("Minimum uppercase letters:", defaults.min_uppercase)?,
        min_lowercase: ask("Minimum lowercase letters:", defaults.min_lowercase)?,
        min_numbers: ask("Minimum numbers:", defaults.min_numbers)?,
        min_symbols: ask("Minimum symbols:", defaults.min_symbols)?,
        max_consecutive: ask("Longest run of one character:", defaults.max_consecutive)?,
    };

    let length = PasswordEngine::requirement_length(&requirements);
    if !config.length_in_range(length) {
        return Err(format!(
            "Password length must be between {} and {} characters",
            config.min_password_length, config.max_password_length
        )
        .into());
    }

    let generated = engine.generate_with_requirements(&requirements)?;
    print_generated(&generated);
    Ok(())
}

fn multiple_menu(engine: &PasswordEngine, config: &Config) -> Result<(), Box<dyn Error>> {
    let count: usize = CustomType::new("How many passwords?")
        .with_default(5)
        .with_error_message("Please enter a valid number")
        .prompt()?;
    if count == 0 || count > config.max_batch_count {
        return Err(format!("Count must be between 1 and {}", config.max_batch_count).into());
    }

    let options = prompt_options(config)?;
    for generated in engine.generate_multiple(count, &options)? {
        print_generated(&generated);
    }
    Ok(())
}

fn analyze_menu() -> Result<(), Box<dyn Error>> {
    let password = Password::new("Password to analyze:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let score = strength::calculate_strength(&password, &GenerationOptions::unscoped());
    println!("\nStrength: {}/100 ({})", styled_strength(score), strength_label(score));
    println!("Entropy: {:.1} bits", strength::calculate_entropy(&password));
    for line in strength::strength_feedback(&password, score) {
        println!("  • {}", line);
    }
    Ok(())
}

fn history_menu(engine: &PasswordEngine, config: &Config) -> Result<(), Box<dyn Error>> {
    let history = engine.get_history(config.default_history_limit);
    if history.is_empty() {
        println!("📭 No passwords generated yet.");
        return Ok(());
    }

    let reveal = Confirm::new("Show full passwords?").with_default(false).prompt()?;

    println!("\n📜 Recent passwords:");
    for (i, entry) in history.iter().enumerate() {
        let shown = if reveal {
            entry.password.clone()
        } else {
            mask_password(&entry.password)
        };
        let kind = match entry.options {
            HistoryOptions::Standard(_) => "standard",
            HistoryOptions::Memorable(_) => "memorable",
        };
        println!(
            "{:>3}. {}  [{}, strength {}/100, {}]",
            i + 1,
            shown,
            kind,
            styled_strength(entry.strength),
            format_time_ago(entry.timestamp)
        );
    }
    Ok(())
}

fn show_stats(engine: &PasswordEngine) {
    let stats = engine.get_stats();
    if stats.total_generated == 0 {
        println!("📭 No passwords generated yet.");
        return;
    }

    println!("\n📊 Generation statistics:");
    println!("Total generated: {}", stats.total_generated);
    println!("Average strength: {:.1}/100", stats.average_strength);
    println!("Average entropy: {:.1} bits", stats.average_entropy);
    println!("Most common length: {}", stats.most_common_length);
    if let Some(strongest) = &stats.strongest_password {
        println!("Strongest: {} ({}/100)", mask_password(&strongest.password), strongest.strength);
    }
    if let Some(weakest) = &stats.weakest_password {
        println!("Weakest: {} ({}/100)", mask_password(&weakest.password), weakest.strength);
    }
}

fn clear_menu(engine: &PasswordEngine) -> Result<(), Box<dyn Error>> {
    if Confirm::new("Clear all generation history?").with_default(false).prompt()? {
        engine.clear_history();
        println!("✅ History cleared.");
    }
    Ok(())
}
