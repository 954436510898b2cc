use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quote_builder::catalog::catalog;
use quote_builder::scoring::{
    compute_quote, validate_catalog, validate_schedule, RatingSet, MAX_RATING, MIN_RATING,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 1;
const EXIT_IO: i32 = 2;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive slider view (default if no subcommand)
    Tui,
    /// Print a quote from saved ratings plus any overrides
    Quote {
        /// Override one rating, e.g. --set methodology=5 (repeatable)
        #[arg(long = "set", value_name = "KEY=RATING")]
        set: Vec<String>,

        /// Path to a ratings file (defaults to ~/.config/quote-builder/ratings.json)
        #[arg(long)]
        ratings: Option<PathBuf>,

        /// Ignore saved ratings and start from defaults
        #[arg(long)]
        defaults: bool,

        /// Emit JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Print the criteria catalog with weights
    Catalog {
        /// Also print the five level descriptions per criterion
        #[arg(long)]
        levels: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "quote-builder")]
#[command(about = "Fee estimator for valuation engagements", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to ~/.config/quote-builder/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match quote_builder::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate catalog and fee schedule at startup
    if let Err(errors) = validate_catalog(catalog()) {
        eprintln!("Catalog errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let schedule = config.fee_schedule();
    if let Err(errors) = validate_schedule(&schedule) {
        eprintln!("Fee schedule errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match command {
        Commands::Tui => {
            let ratings_path = quote_builder::storage::get_ratings_path();
            let ratings = match quote_builder::storage::load_ratings(&ratings_path, catalog()) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to load saved ratings: {}", e);
                    std::process::exit(EXIT_IO);
                }
            };

            let theme = quote_builder::tui::resolve_theme(
                quote_builder::tui::Theme::from_config(config.theme.as_deref()),
            );
            let app =
                quote_builder::tui::App::new(catalog(), ratings, ratings_path, config, theme);

            if let Err(e) = quote_builder::tui::run_tui(app).await {
                eprintln!("TUI error: {}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Quote {
            set,
            ratings,
            defaults,
            json,
        } => {
            let mut rating_set = if defaults {
                RatingSet::default_for(catalog())
            } else {
                let path = ratings.unwrap_or_else(quote_builder::storage::get_ratings_path);
                match quote_builder::storage::load_ratings(&path, catalog()) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("Failed to load ratings: {}", e);
                        std::process::exit(EXIT_IO);
                    }
                }
            };

            for pair in &set {
                match parse_override(pair) {
                    Ok((key, value)) => rating_set.set(&key, value),
                    Err(e) => {
                        eprintln!("Invalid --set '{}': {}", pair, e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            }

            let quote = match compute_quote(catalog(), &schedule, &rating_set) {
                Ok(q) => q,
                Err(e) => {
                    eprintln!("Scoring error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            if json {
                match quote_builder::output::format_quote_json(&quote, &rating_set) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Failed to serialize quote: {}", e);
                        std::process::exit(EXIT_IO);
                    }
                }
            } else {
                let use_colors = quote_builder::output::should_use_colors();
                println!(
                    "{}",
                    quote_builder::output::format_quote_table(
                        &quote,
                        config.currency(),
                        use_colors
                    )
                );
            }
        }
        Commands::Catalog { levels } => {
            let use_colors = quote_builder::output::should_use_colors();
            println!(
                "{}",
                quote_builder::output::format_catalog(catalog(), levels, use_colors)
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Parse a `key=rating` override. The key must exist in the catalog and the
/// rating must be an integer in [1,5].
fn parse_override(pair: &str) -> Result<(String, u8), String> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| "expected KEY=RATING".to_string())?;

    if quote_builder::catalog::find(key).is_none() {
        let known: Vec<_> = catalog().iter().map(|c| c.key).collect();
        return Err(format!(
            "unknown criterion '{}' (known: {})",
            key,
            known.join(", ")
        ));
    }

    let rating: u8 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not an integer", value))?;
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(format!(
            "rating {} out of range {}-{}",
            rating, MIN_RATING, MAX_RATING
        ));
    }

    Ok((key.to_string(), rating))
}
