//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use thelewale_geo::DistanceLabel;
use thelewale_vendors::{Badge, Dish, ModerationStatus, RatingSummary};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a subheader
    pub fn subheader(message: &str) {
        println!();
        println!("{}", message.bold().dimmed());
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Five stars, filled up to the rounded average
pub fn stars(average: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = average.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Rating line, or the no-rating marker
pub fn format_rating(summary: &RatingSummary) -> String {
    match summary.average {
        Some(average) => format!("{} {summary}", stars(average)),
        None => summary.to_string(),
    }
}

/// Dish with its price in rupees
pub fn format_dish(dish: &Dish) -> String {
    match dish.price {
        Some(price) if price.fract() == 0.0 => format!("{} - ₹{price:.0}", dish.name),
        Some(price) => format!("{} - ₹{price:.2}", dish.name),
        None => format!("{} - price on request", dish.name),
    }
}

/// Distance, dimmed when unknown
pub fn format_distance(distance: &DistanceLabel) -> String {
    match distance {
        DistanceLabel::Known(_) => distance.to_string(),
        DistanceLabel::Unavailable => distance.to_string().dimmed().to_string(),
    }
}

/// Moderation status, colored
pub fn format_status(status: ModerationStatus) -> String {
    match status {
        ModerationStatus::Approved => status.green().to_string(),
        ModerationStatus::Pending => status.yellow().to_string(),
        ModerationStatus::Rejected => status.red().to_string(),
    }
}

/// Badge name in its configured color
pub fn format_badge(badge: &Badge) -> String {
    let name = badge.name.as_str();
    match badge.color.as_str() {
        "blue" => name.blue().bold().to_string(),
        "green" => name.green().bold().to_string(),
        "yellow" | "gold" => name.yellow().bold().to_string(),
        "red" => name.red().bold().to_string(),
        "magenta" | "purple" => name.magenta().bold().to_string(),
        "cyan" => name.cyan().bold().to_string(),
        _ => name.bold().to_string(),
    }
}
