#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;
use crate::models::TransactionType;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_empty() {
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    // Japanese characters are multi-byte UTF-8
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_truncate_emoji() {
    assert_eq!(truncate("🎉🎊🎈🎁", 3), "🎉🎊…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

#[test]
fn test_truncate_mixed_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

#[test]
fn test_truncate_two_chars() {
    assert_eq!(truncate("hello", 2), "h…");
}

#[test]
fn test_truncate_single_char_string() {
    assert_eq!(truncate("a", 1), "a");
    assert_eq!(truncate("a", 5), "a");
}

#[test]
fn test_truncate_max_one_with_long_string() {
    // max=1 should always produce "…" for strings longer than 1
    assert_eq!(truncate("ab", 1), "…");
    assert_eq!(truncate("abc", 1), "…");
}

// ── format_amount ──────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_no_commas() {
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(10000000.00)), "$10,000,000.00");
}

#[test]
fn test_format_amount_rounds_to_two_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
}

#[test]
fn test_format_amount_negative_large() {
    assert_eq!(format_amount(dec!(-99999.01)), "-$99,999.01");
}

#[test]
fn test_format_amount_single_digit() {
    assert_eq!(format_amount(dec!(5)), "$5.00");
}

// ── format_signed ─────────────────────────────────────────────

#[test]
fn test_format_signed_income() {
    assert_eq!(format_signed(TransactionType::Income, dec!(1500)), "+$1,500.00");
}

#[test]
fn test_format_signed_expense() {
    assert_eq!(format_signed(TransactionType::Expense, dec!(42.5)), "-$42.50");
}

// ── format_date ───────────────────────────────────────────────

#[test]
fn test_format_date_basic() {
    assert_eq!(format_date("2024-01-15"), "Jan 15, 2024");
}

#[test]
fn test_format_date_single_digit_day() {
    assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
}

#[test]
fn test_format_date_unparsable_passthrough() {
    assert_eq!(format_date("someday"), "someday");
}

// ── format_percent ────────────────────────────────────────────

#[test]
fn test_format_percent_whole() {
    assert_eq!(format_percent(dec!(80)), "80.0%");
}

#[test]
fn test_format_percent_rounds() {
    assert_eq!(format_percent(dec!(33.3333)), "33.3%");
    assert_eq!(format_percent(dec!(66.66)), "66.7%");
}

#[test]
fn test_format_percent_zero() {
    assert_eq!(format_percent(dec!(0)), "0.0%");
}

// ── bar_value ─────────────────────────────────────────────────

#[test]
fn test_bar_value() {
    assert_eq!(bar_value(dec!(12.6)), 13);
    assert_eq!(bar_value(dec!(-5)), 0);
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
}

#[test]
fn test_scroll_to_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
}

#[test]
fn test_clamp_cursor_after_shrink() {
    let (mut index, mut scroll) = (5, 4);
    clamp_cursor(&mut index, &mut scroll, 3);
    assert_eq!((index, scroll), (2, 2));

    clamp_cursor(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}

// ── theme ─────────────────────────────────────────────────────

#[test]
fn test_hex_color() {
    use super::theme::{hex_color, TEXT_DIM};
    use ratatui::style::Color;

    assert_eq!(hex_color("#10b981"), Color::Rgb(0x10, 0xb9, 0x81));
    assert_eq!(hex_color("#6b7280"), Color::Rgb(0x6b, 0x72, 0x80));
    assert_eq!(hex_color("10b981"), TEXT_DIM);
    assert_eq!(hex_color("#zzzzzz"), TEXT_DIM);
}
