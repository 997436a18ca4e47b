// src/cli/handlers.rs
use anyhow::{bail, Context, Result};
use console::style;
use serde::Serialize;

use crate::cli::commands::{GenerateArgs, RequirementsArgs};
use crate::core::auth::TokenVerifier;
use crate::core::config::Config;
use crate::generators::{strength, PasswordEngine};
use crate::models::{GeneratedPassword, GenerationOptions};
use crate::utils::strength_label;

// Handlers for one-shot CLI commands

pub fn handle_generate(engine: &PasswordEngine, config: &Config, args: &GenerateArgs, json: bool) -> Result<()> {
    ensure_length(config, args.length)?;

    let generated = engine
        .generate(&args.to_options())
        .context("Password generation failed")?;

    if json {
        return print_json(&generated);
    }
    print_generated(&generated);
    Ok(())
}

pub fn handle_multiple(
    engine: &PasswordEngine,
    config: &Config,
    count: usize,
    args: &GenerateArgs,
    json: bool,
) -> Result<()> {
    ensure_length(config, args.length)?;
    if count == 0 || count > config.max_batch_count {
        bail!("Count must be between 1 and {}", config.max_batch_count);
    }

    let passwords = engine
        .generate_multiple(count, &args.to_options())
        .context("Password generation failed")?;

    if json {
        return print_json(&passwords);
    }
    for generated in &passwords {
        print_generated(generated);
    }
    Ok(())
}

pub fn handle_memorable(
    engine: &PasswordEngine,
    words: usize,
    separator: &str,
    include_numbers: bool,
    json: bool,
) -> Result<()> {
    if words == 0 {
        bail!("Word count must be at least 1");
    }

    let generated = engine.generate_memorable(words, separator, include_numbers);
    if json {
        return print_json(&generated);
    }
    print_generated(&generated);
    Ok(())
}

pub fn handle_requirements(
    engine: &PasswordEngine,
    config: &Config,
    args: &RequirementsArgs,
    json: bool,
) -> Result<()> {
    let requirements = args.to_requirements();
    ensure_length(config, PasswordEngine::requirement_length(&requirements))?;

    let generated = engine
        .generate_with_requirements(&requirements)
        .context("Could not generate a password meeting the requirements")?;

    if json {
        return print_json(&generated);
    }
    print_generated(&generated);
    Ok(())
}

#[derive(Serialize)]
struct Analysis<'a> {
    password: &'a str,
    strength: u8,
    entropy: f64,
    feedback: Vec<String>,
}

pub fn handle_analyze(password: &str, json: bool) -> Result<()> {
    let score = PasswordEngine::calculate_strength(password, &GenerationOptions::unscoped());
    let analysis = Analysis {
        password,
        strength: score,
        entropy: PasswordEngine::calculate_entropy(password),
        feedback: strength::strength_feedback(password, score),
    };

    if json {
        return print_json(&analysis);
    }

    println!("Strength: {}/100 ({})", styled_strength(score), strength_label(score));
    println!("Entropy: {:.1} bits", analysis.entropy);
    for line in &analysis.feedback {
        println!("  • {}", line);
    }
    Ok(())
}

pub fn handle_token(config: &Config, subject: &str, email: Option<&str>) -> Result<()> {
    let secret = match config.jwt_secret.as_deref() {
        Some(secret) => secret,
        None => bail!("JWT_SECRET is not set; the API does not require tokens"),
    };

    let verifier = TokenVerifier::new(secret, config.token_duration);
    let token = verifier.issue_token(subject, email).context("Failed to issue token")?;
    println!("{}", token);
    Ok(())
}

fn ensure_length(config: &Config, length: usize) -> Result<()> {
    if !config.length_in_range(length) {
        bail!(
            "Password length must be between {} and {} characters",
            config.min_password_length,
            config.max_password_length
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_generated(generated: &GeneratedPassword) {
    println!("\nGenerated Password: {}", style(&generated.password).bold());
    println!(
        "Strength: {}/100 ({})",
        styled_strength(generated.strength),
        strength_label(generated.strength)
    );
    println!("Entropy: {:.1} bits", generated.entropy);
}

pub fn styled_strength(strength: u8) -> console::StyledObject<u8> {
    match strength {
        0..=39 => style(strength).red(),
        40..=59 => style(strength).yellow(),
        _ => style(strength).green(),
    }
}
