use std::{num::NonZeroUsize, ops::Range, str::FromStr};

use thiserror::Error;

/// Number of records in every pagination window.
pub const WINDOW_SIZE: usize = 2;

/// A 1-based page number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page(NonZeroUsize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page number is required")]
    Missing,
    #[error("page number `{0}` is not an integer")]
    NotANumber(String),
    #[error("page numbers start at 1")]
    BelowFirst,
}

impl Page {
    pub const FIRST: Page = Page(NonZeroUsize::MIN);

    pub fn new(number: usize) -> Option<Self> {
        NonZeroUsize::new(number).map(Self)
    }

    pub fn number(self) -> usize {
        self.0.get()
    }

    /// Index range covered by this page, clamped to `len`.
    ///
    /// Page `N` starts at `2 * (N - 1)`; pages past the end yield a short or
    /// empty range.
    pub fn bounds(self, len: usize) -> Range<usize> {
        let start = (self.number() - 1).saturating_mul(WINDOW_SIZE).min(len);
        let end = start.saturating_add(WINDOW_SIZE).min(len);
        start..end
    }
}

/// Reads the leading integer the way query strings are usually read:
/// surrounding whitespace and trailing junk are ignored, so `"2abc"` is page 2
/// and `"1.5"` is page 1.
impl FromStr for Page {
    type Err = PageError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PageError::Missing);
        }
        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return Err(PageError::NotANumber(trimmed.to_string()));
        }
        if negative {
            return Err(PageError::BelowFirst);
        }
        match unsigned[..digits_len].parse::<usize>() {
            Ok(number) => Page::new(number).ok_or(PageError::BelowFirst),
            // Too large to index anything; still a valid, empty page.
            Err(_) => Ok(Page(NonZeroUsize::MAX)),
        }
    }
}
