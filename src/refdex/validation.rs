//! Input validation for index titles and submitted entries.
//!
//! Every mutating command runs its input through here before touching the
//! store, so a rejected request never leaves a partial write behind.
//!
//! Titles become folder names, so they must be a single path component:
//! - Not empty (after trimming)
//! - No `/`, `\`, or control characters
//! - Not `.`/`..` and not starting with `.` (hidden folders are not indexes)

use crate::model::{Category, Settings};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("index title cannot be empty")]
    EmptyTitle,

    #[error("index title {0:?} is not a valid folder name")]
    InvalidTitle(String),

    #[error("book count must be at least 1")]
    ZeroBooks,

    #[error("workbook count must be at least 1")]
    ZeroWorkbooks,

    #[error("term cannot be empty")]
    EmptyTerm,

    #[error("book {book} is out of range (index has {books} books)")]
    BookOutOfRange { book: u32, books: u32 },

    #[error("unknown category {0:?} (see `refdex categories`)")]
    UnknownCategory(String),
}

/// Returns the trimmed title if it can be used as an index folder name.
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let bad_char = title
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control());
    if bad_char || title.starts_with('.') {
        return Err(ValidationError::InvalidTitle(title.to_string()));
    }
    Ok(title.to_string())
}

pub fn validate_counts(books: u32, workbooks: u32) -> Result<(), ValidationError> {
    if books == 0 {
        return Err(ValidationError::ZeroBooks);
    }
    if workbooks == 0 {
        return Err(ValidationError::ZeroWorkbooks);
    }
    Ok(())
}

pub fn validate_term(term: &str) -> Result<String, ValidationError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(ValidationError::EmptyTerm);
    }
    Ok(term.to_string())
}

/// Book numbers start at 1. The upper bound is only checked when `enforce_range` is set.
pub fn validate_book(
    book: u32,
    settings: &Settings,
    enforce_range: bool,
) -> Result<(), ValidationError> {
    if book == 0 || (enforce_range && book > settings.books) {
        return Err(ValidationError::BookOutOfRange {
            book,
            books: settings.books,
        });
    }
    Ok(())
}

/// Maps user input to the canonical category label; blank means uncategorized.
pub fn normalize_category(input: Option<&str>) -> Result<String, ValidationError> {
    match input.map(str::trim) {
        None | Some("") => Ok(String::new()),
        Some(raw) => raw
            .parse::<Category>()
            .map(|c| c.label().to_string())
            .map_err(ValidationError::UnknownCategory),
    }
}
