pub mod formatter;

pub use formatter::{
    format_catalog, format_fee, format_quote_json, format_quote_table, format_total_score,
    should_use_colors,
};
