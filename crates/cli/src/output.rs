//! Output formatting utilities

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use flight_lib::RiskLevel;
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file, ignoring case
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a 0..1 fraction as a rounded percentage
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Format a delay in minutes
pub fn format_minutes(minutes: f64) -> String {
    format!("{:.2} min", minutes)
}

/// Format an optional delay, using `--` when absent
pub fn format_optional_minutes(minutes: Option<f64>) -> String {
    minutes.map(format_minutes).unwrap_or_else(|| "--".to_string())
}

/// Format a count with thousands separators
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a bucket value; whole numbers print without decimals
pub fn format_bucket(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Format an RFC 3339 timestamp as local wall-clock time
pub fn format_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        dt.with_timezone(&chrono::Local).format("%H:%M").to_string()
    } else {
        ts.to_string()
    }
}

/// Color confidence based on value
pub fn color_confidence(confidence: f64) -> String {
    let formatted = format_percent(confidence);
    if confidence >= 0.8 {
        formatted.green().to_string()
    } else if confidence >= 0.6 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}

/// Color a risk level label
pub fn color_risk(risk: RiskLevel) -> String {
    match risk {
        RiskLevel::Low => risk.label().green().to_string(),
        RiskLevel::Medium => risk.label().yellow().to_string(),
        RiskLevel::High => risk.label().red().to_string(),
    }
}

/// Color a free-form risk label from the route flights endpoint
pub fn color_risk_text(risk: &str) -> String {
    let lower = risk.to_lowercase();
    if lower.contains("high") {
        risk.red().to_string()
    } else if lower.contains("medium") {
        risk.yellow().to_string()
    } else {
        risk.green().to_string()
    }
}
