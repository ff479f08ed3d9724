#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Dev", 10), "Dev");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Systems Developer", 8), "Systems…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("Projektledare åäö", 14), "Projektledare…");
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_whole() {
    assert_eq!(format_amount(dec!(84000)), "84,000 SEK");
}

#[test]
fn test_format_amount_small() {
    assert_eq!(format_amount(dec!(999)), "999 SEK");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "0 SEK");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(3024000)), "3,024,000 SEK");
}

#[test]
fn test_format_amount_fraction() {
    assert_eq!(format_amount(dec!(7896.05)), "7,896.05 SEK");
    assert_eq!(format_amount(dec!(99.5)), "99.50 SEK");
}

#[test]
fn test_format_amount_trailing_zero_scale() {
    assert_eq!(format_amount(dec!(84000.00)), "84,000 SEK");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-1500)), "-1,500 SEK");
}

// ── format_hours ──────────────────────────────────────────────

#[test]
fn test_format_hours() {
    assert_eq!(format_hours(dec!(84)), "84 h");
    assert_eq!(format_hours(dec!(1008)), "1,008 h");
}

// ── commitment_bar ────────────────────────────────────────────

#[test]
fn test_commitment_bar() {
    assert_eq!(commitment_bar(0, 4), "[░░░░]");
    assert_eq!(commitment_bar(50, 4), "[██░░]");
    assert_eq!(commitment_bar(100, 4), "[████]");
    assert_eq!(commitment_bar(200, 4), "[████]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_moves_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom_and_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}
