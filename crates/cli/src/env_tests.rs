// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn parse_timeout_ms_defaults_to_thirty_seconds() {
    assert_eq!(parse_timeout_ms(None), Duration::from_secs(30));
}

#[test]
fn parse_timeout_ms_reads_milliseconds() {
    assert_eq!(parse_timeout_ms(Some("500")), Duration::from_millis(500));
}

#[test]
fn parse_timeout_ms_falls_back_on_garbage() {
    assert_eq!(parse_timeout_ms(Some("not-a-number")), Duration::from_secs(30));
}