use crate::core::{Item, Snapshot};
use crate::utils::error::{RankError, Result};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DisplayFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
}

impl DisplayFormat {
    pub const NAMES: &'static [&'static str] = &["table", "csv", "tsv", "json"];
}

impl FromStr for DisplayFormat {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(DisplayFormat::Table),
            "csv" => Ok(DisplayFormat::Csv),
            "tsv" => Ok(DisplayFormat::Tsv),
            "json" => Ok(DisplayFormat::Json),
            other => Err(RankError::InvalidConfigValueError {
                field: "display.format".to_string(),
                value: other.to_string(),
                reason: format!("Valid formats: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}

/// Renders members in the order given (callers pass canonical order).
pub fn render_snapshot(format: DisplayFormat, items: &[Item]) -> Result<String> {
    match format {
        DisplayFormat::Table => Ok(render_table(items)),
        DisplayFormat::Csv => render_delimited(items, b','),
        DisplayFormat::Tsv => render_delimited(items, b'\t'),
        DisplayFormat::Json => {
            let snapshot = Snapshot {
                items: items.to_vec(),
            };
            Ok(serde_json::to_string_pretty(&snapshot)?)
        }
    }
}

fn render_table(items: &[Item]) -> String {
    let name_width = items
        .iter()
        .map(|item| item.name().chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<name_width$}  {:>5}  Image",
        "Rank", "Name", "Votes"
    );
    let _ = writeln!(out, "{}", "-".repeat(4 + 2 + name_width + 2 + 5 + 2 + 5));

    for item in items {
        let _ = writeln!(
            out,
            "{:>4}  {:<name_width$}  {:>5}  {}",
            item.rank_or_zero(),
            item.name(),
            item.votes,
            item.profile.image_path
        );
    }

    if items.is_empty() {
        let _ = writeln!(out, "(no cats left)");
    }
    out
}

fn render_delimited(items: &[Item], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["rank", "name", "votes", "image_path"])?;
    for item in items {
        writer.write_record([
            item.rank_or_zero().to_string(),
            item.profile.name.clone(),
            item.votes.to_string(),
            item.profile.image_path.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RankError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| RankError::ConfigError {
        message: format!("rendered output is not UTF-8: {}", e),
    })
}
