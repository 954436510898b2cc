use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::catalog::Criterion;
use crate::scoring::{Quote, RatingSet, MAX_RATING};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the total score with one decimal place ("72.0", "63.5")
pub fn format_total_score(total_score: f64) -> String {
    format!("{:.1}", (total_score * 10.0).round() / 10.0)
}

/// Format a fee with thousands separators and currency prefix ("$5,750")
pub fn format_fee(fee: i64, currency: &str) -> String {
    format!("{}{}", currency, group_thousands(fee))
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Five-cell slider bar for a rating ("███░░")
fn rating_bar(rating: u8) -> String {
    let filled = rating.min(MAX_RATING) as usize;
    let empty = MAX_RATING as usize - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a quote as a table: one row per criterion (label, rating bar,
/// weighted points), then total score and proposed fee.
pub fn format_quote_table(quote: &Quote, currency: &str, use_colors: bool) -> String {
    let label_width = quote
        .breakdown
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);

    // Shrink labels on narrow terminals; bar(5) + rating(1) + points(6) plus
    // separators take ~20 columns
    let label_width = match get_terminal_width() {
        Some(w) if w > 24 => label_width.min(w - 20),
        Some(_) => 20,
        None => label_width,
    };

    let mut lines: Vec<String> = quote
        .breakdown
        .iter()
        .map(|c| {
            let label = truncate_label(c.label, label_width);
            let bar = rating_bar(c.rating);
            if use_colors {
                format!(
                    "{:<width$}  {} {}  {:>5.1}",
                    label,
                    bar.cyan(),
                    c.rating.bold(),
                    c.points,
                    width = label_width
                )
            } else {
                format!(
                    "{:<width$}  {} {}  {:>5.1}",
                    label,
                    bar,
                    c.rating,
                    c.points,
                    width = label_width
                )
            }
        })
        .collect();

    let score = format_total_score(quote.total_score);
    let fee = format_fee(quote.fee, currency);

    lines.push(String::new());
    if use_colors {
        lines.push(format!("Total Weighted Score: {}", score.bold()));
        lines.push(format!("Proposed Fee: {}", fee.green().bold()));
    } else {
        lines.push(format!("Total Weighted Score: {}", score));
        lines.push(format!("Proposed Fee: {}", fee));
    }

    lines.join("\n")
}

/// Format a quote as JSON for scripting: ratings, per-criterion breakdown,
/// display score and fee.
pub fn format_quote_json(quote: &Quote, ratings: &RatingSet) -> serde_json::Result<String> {
    let value = serde_json::json!({
        "ratings": ratings,
        "breakdown": quote.breakdown,
        "total_score": quote.display_score(),
        "fee": quote.fee,
    });
    serde_json::to_string_pretty(&value)
}

/// Format the catalog: key, weight and label per criterion, optionally
/// followed by the five level descriptions.
pub fn format_catalog(catalog: &[Criterion], show_levels: bool, use_colors: bool) -> String {
    let key_width = catalog
        .iter()
        .map(|c| c.key.chars().count())
        .max()
        .unwrap_or(0);

    catalog
        .iter()
        .map(|c| {
            // Pad before styling so ANSI codes don't skew the alignment
            let key_padded = format!("{:<kw$}", c.key, kw = key_width);
            let weight = format!("{:>5}", format!("{}%", c.weight));
            let header = if use_colors {
                format!("{}  {}  {}", key_padded.cyan(), weight, c.label.bold())
            } else {
                format!("{}  {}  {}", key_padded, weight, c.label)
            };

            if show_levels {
                let levels = c
                    .levels
                    .iter()
                    .map(|l| format!("    {}", l))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{}\n{}", header, levels)
            } else {
                header
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
