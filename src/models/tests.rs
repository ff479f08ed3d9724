#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── NumericInput ──────────────────────────────────────────────

#[test]
fn test_parse_blank() {
    assert_eq!(NumericInput::parse(""), NumericInput::Blank);
    assert_eq!(NumericInput::parse("   "), NumericInput::Blank);
}

#[test]
fn test_parse_values() {
    assert_eq!(NumericInput::parse("1000"), NumericInput::Value(dec!(1000)));
    assert_eq!(NumericInput::parse(" 7.5 "), NumericInput::Value(dec!(7.5)));
    assert_eq!(NumericInput::parse("0"), NumericInput::Value(Decimal::ZERO));
}

#[test]
fn test_parse_garbage_is_zero() {
    assert_eq!(NumericInput::parse("abc"), NumericInput::Value(Decimal::ZERO));
    assert_eq!(NumericInput::parse("12abc"), NumericInput::Value(Decimal::ZERO));
}

#[test]
fn test_parse_negative_clamps_to_zero() {
    assert_eq!(NumericInput::parse("-5"), NumericInput::Value(Decimal::ZERO));
}

#[test]
fn test_parse_whole_truncates_and_caps() {
    assert_eq!(NumericInput::parse_whole("20.9", 31), NumericInput::Value(dec!(20)));
    assert_eq!(NumericInput::parse_whole("45", 31), NumericInput::Value(dec!(31)));
    assert_eq!(NumericInput::parse_whole("", 31), NumericInput::Blank);
}

#[test]
fn test_blank_computes_as_zero_but_displays_empty() {
    let blank = NumericInput::Blank;
    let zero = NumericInput::Value(Decimal::ZERO);
    assert_eq!(blank.or_zero(), zero.or_zero());
    assert_eq!(blank.to_string(), "");
    assert_eq!(zero.to_string(), "0");
    assert!(blank.is_blank());
    assert!(!zero.is_blank());
}

#[test]
fn test_display_keeps_entered_scale() {
    assert_eq!(NumericInput::parse("7.50").to_string(), "7.50");
}

// ── Month ─────────────────────────────────────────────────────

#[test]
fn test_month_key_is_lowercase() {
    let month = Month::new("  Sprint A ");
    assert_eq!(month.key, "sprint a");
    assert_eq!(month.label(), "Sprint a");
}

#[test]
fn test_month_label_empty() {
    let month = Month { key: String::new() };
    assert_eq!(month.label(), "");
}

#[test]
fn test_month_find_by_name_case_insensitive() {
    let months = vec![Month::new("jan"), Month::new("feb")];
    assert_eq!(Month::find_by_name(&months, "FEB").unwrap().key, "feb");
    assert!(Month::find_by_name(&months, "mar").is_none());
}

// ── Role ──────────────────────────────────────────────────────

#[test]
fn test_role_find_by_id() {
    let roles = vec![Role::new("1", "Dev"), Role::new("2", "PM")];
    assert_eq!(Role::find_by_id(&roles, "2").unwrap().name, "PM");
    assert!(Role::find_by_id(&roles, "3").is_none());
    assert_eq!(format!("{}", roles[0]), "Dev");
}

// ── Defaults ──────────────────────────────────────────────────

#[test]
fn test_default_month_keys() {
    let keys = defaults::month_keys();
    assert_eq!(keys.len(), 12);
    assert_eq!(keys.first().unwrap(), "jan");
    assert_eq!(keys[4], "may");
    assert_eq!(keys.last().unwrap(), "dec");
}

#[test]
fn test_default_numeric_constants() {
    assert_eq!(defaults::WORKING_HOURS, dec!(8));
    assert_eq!(defaults::HOURLY_RATE, dec!(1000));
}
