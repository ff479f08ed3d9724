use rust_decimal::Decimal;

pub(crate) const CURRENCY: &str = "SEK";

/// Format an amount with thousand separators and the currency suffix.
/// Whole amounts print without decimals; anything else gets two.
/// e.g. `1234567` → `"1,234,567 SEK"`, `99.5` → `"99.50 SEK"`
pub(crate) fn format_amount(val: Decimal) -> String {
    format!("{} {CURRENCY}", group_thousands(val))
}

/// Whole hours with thousand separators, e.g. `"1,008 h"`.
pub(crate) fn format_hours(val: Decimal) -> String {
    format!("{} h", group_thousands(val.trunc()))
}

fn group_thousands(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = if abs.fract().is_zero() {
        format!("{}", abs.trunc())
    } else {
        format!("{abs:.2}")
    };
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next();

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    match dec_part {
        Some(dec) => format!("{sign}{with_commas}.{dec}"),
        None => format!("{sign}{with_commas}"),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Text slider for a 0–100 percentage. Values above 100 draw as full.
pub(crate) fn commitment_bar(pct: u8, width: usize) -> String {
    let filled = (usize::from(pct.min(100)) * width + 50) / 100;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
