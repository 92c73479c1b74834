use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::{OutputMode, RuntimeConfig};
use crate::error::AppError;

pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }
    let table = Table::new(data).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Listings render as a table in table mode and as the JSON value otherwise.
pub fn print_listing<T: Tabled>(rows: &[T], value: &serde_json::Value, config: &RuntimeConfig) {
    match config.output_mode {
        OutputMode::Table => print_table(rows),
        OutputMode::Json => print_json(value),
    }
}

/// Output of `--dry-run`: the request that would have been sent.
pub fn print_request(url: &reqwest::Url) {
    print_json(&serde_json::json!({ "request": url.as_str() }));
}

pub fn print_error(err: &AppError) {
    eprintln!(
        "{}",
        serde_json::to_string_pretty(&err.to_json()).unwrap_or_default()
    );
}
