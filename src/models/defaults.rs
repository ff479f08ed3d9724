//! Values a fresh plan, role or month starts with.

use chrono::Month as CalendarMonth;
use rust_decimal::Decimal;

pub(crate) const COMMITMENT: u8 = 50;
pub(crate) const MAX_COMMITMENT: u8 = 100;
pub(crate) const WORKING_DAYS: u8 = 21;
pub(crate) const MAX_WORKING_DAYS: u8 = 31;
pub(crate) const WORKING_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);
pub(crate) const HOURLY_RATE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

pub(crate) const ROLE_NAMES: &[&str] = &["Systems Developer", "Project Manager", "Content Manager"];

/// `jan` through `dec`.
pub(crate) fn month_keys() -> Vec<String> {
    (1..=12u8)
        .filter_map(|n| CalendarMonth::try_from(n).ok())
        .map(|m| m.name()[..3].to_lowercase())
        .collect()
}
