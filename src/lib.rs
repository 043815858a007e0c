//! # Warstats
//!
//! Combat performance analytics over archived clan-war records.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (war records, sides, members, attacks)
//! - **archive**: War archive query boundary and JSON-backed implementation
//! - **calculate**: The analytics engine (freshness, defense resolution,
//!   filters, aggregation, ranking)
//! - **config**: Configuration loading and validation

pub mod archive;
pub mod calculate;
pub mod config;
pub mod models;

pub use models::*;

/// Normalize a player or clan tag: trim, uppercase, map the letter `O`
/// to zero (a common transcription mistake; tags never contain `O`),
/// and ensure a leading `#`.
pub fn normalize_tag(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('#')
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'O' => '0',
            upper => upper,
        })
        .collect();
    format!("#{}", cleaned)
}
