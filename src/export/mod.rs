//! Semicolon-delimited CSV of the (month, role) rows behind a budget.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use crate::engine::{round_hours, BudgetSnapshot, Inputs};
use crate::models::{defaults, NumericInput};

pub(crate) const FILE_NAME: &str = "budget_data.csv";
pub(crate) const CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub(crate) const HEADER: &str =
    "month;role;commitmentLevel;hourlyRate;workingHoursPerDay;hours;amount";

/// Render the export text. One row per (month, role), month-major, both in
/// stored order. Every body field is double-quoted.
///
/// `hours` is recomputed here rather than read from the snapshot, and a blank
/// or zero working-hours value falls back to 8. The snapshot treats blank as
/// 0, so for such a role the `hours` column and the `amount` column disagree.
pub(crate) fn to_csv(snapshot: &BudgetSnapshot, inputs: &Inputs<'_>) -> Result<String> {
    let mut out = Vec::new();
    out.extend_from_slice(HEADER.as_bytes());
    out.push(b'\n');

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(out);

    for month in inputs.months {
        let period = snapshot.get(&month.key);
        let days = inputs.days(&month.key);

        for role in inputs.roles {
            let commitment = inputs.commitment(&role.id, &month.key);
            let rate = inputs.hourly_rates.get(&role.id).copied().unwrap_or_default();
            let hours_per_day = inputs
                .working_hours
                .get(&role.id)
                .copied()
                .unwrap_or(NumericInput::Value(defaults::WORKING_HOURS));
            let export_hours_per_day = hours_per_day
                .value()
                .filter(|h| !h.is_zero())
                .unwrap_or(defaults::WORKING_HOURS);
            let hours = round_hours(days, export_hours_per_day, commitment);
            let amount = period.map_or(Decimal::ZERO, |p| p.amount(&role.id));

            wtr.write_record([
                month.key.clone(),
                role.name.clone(),
                commitment.to_string(),
                rate.to_string(),
                hours_per_day.to_string(),
                hours.to_string(),
                amount.to_string(),
            ])
            .with_context(|| format!("Failed to write CSV row for {} / {}", month.key, role.name))?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Write export text to `path` as UTF-8.
pub(crate) fn write_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        bytes = text.len(),
        content_type = CONTENT_TYPE,
        "budget exported"
    );
    Ok(())
}

/// `budget_data.csv` in the user's download directory, falling back to the
/// home directory and then the working directory.
pub(crate) fn default_path() -> PathBuf {
    let dir = directories::UserDirs::new()
        .and_then(|d| {
            d.download_dir()
                .map(Path::to_path_buf)
                .or_else(|| Some(d.home_dir().to_path_buf()))
        })
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(FILE_NAME)
}

/// Expand a leading `~/` and point directories at `budget_data.csv` inside them.
pub(crate) fn resolve_path(arg: &str) -> PathBuf {
    let expanded = if let Some(rest) = arg.strip_prefix("~/") {
        directories::UserDirs::new()
            .map(|d| d.home_dir().join(rest))
            .unwrap_or_else(|| PathBuf::from(rest))
    } else {
        PathBuf::from(arg)
    };
    if expanded.is_dir() {
        expanded.join(FILE_NAME)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests;
