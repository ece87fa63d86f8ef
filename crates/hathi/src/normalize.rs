//! Canonical forms of identifier values.
//!
//! The API documents the forms it matches against; these functions bring user input into those
//! forms. Nothing here is applied unless [`Query::normalize`](crate::Query::normalize) is set.

use crate::IdKind;

/// Canonicalizes `value` for the given identifier kind.
#[must_use]
pub fn normalize(kind: IdKind, value: &str) -> String {
    match kind {
        IdKind::Oclc => oclc(value),
        IdKind::Issn | IdKind::Isbn => digits_with_check(value),
        IdKind::Lccn => lccn(value),
        IdKind::Htid | IdKind::RecordNumber => value.trim().to_owned(),
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn oclc(value: &str) -> String {
    let number = digits(value);
    let trimmed = number.trim_start_matches('0');
    if trimmed.is_empty() && !number.is_empty() {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

// ISSN and ISBN-10 may end with an `X` check character.
fn digits_with_check(value: &str) -> String {
    let mut out = digits(value);
    if value.trim_end().ends_with(['x', 'X']) {
        out.push('X');
    }
    out
}

/// Library of Congress LCCN normalization.
///
/// Blanks are removed, anything from the first `/` on is dropped, and when a hyphen is present
/// the part after it is left padded with zeros to six digits and the hyphen removed.
#[must_use]
pub fn lccn(value: &str) -> String {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.split('/').next().unwrap_or_default();

    match compact.split_once('-') {
        Some((prefix, serial)) if serial.chars().all(|c| c.is_ascii_digit()) => {
            format!("{prefix}{serial:0>6}")
        }
        _ => compact.to_owned(),
    }
}

/// Derives the ISBN-13 for a valid ISBN-10, hyphens and spaces allowed.
///
/// Returns [`None`] when `isbn10` is not ten characters long once cleaned up, or when its check
/// digit is wrong.
#[must_use]
pub fn isbn10_to_isbn13(isbn10: &str) -> Option<String> {
    let cleaned = digits_with_check(isbn10);
    if cleaned.len() != 10 || !isbn10_is_valid(&cleaned) {
        return None;
    }

    let mut isbn13 = String::with_capacity(13);
    isbn13.push_str("978");
    isbn13.push_str(&cleaned[..9]);

    let sum: u32 = isbn13
        .bytes()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    let check = (10 - sum % 10) % 10;
    isbn13.push(char::from_digit(check, 10)?);

    Some(isbn13)
}

fn isbn10_is_valid(isbn10: &str) -> bool {
    let sum: u32 = isbn10
        .bytes()
        .zip((1..=10).rev())
        .map(|(b, weight)| {
            let value = if b == b'X' { 10 } else { u32::from(b - b'0') };
            value * weight
        })
        .sum();
    // `X` is only valid as the last character.
    !isbn10[..9].contains('X') && sum % 11 == 0
}
