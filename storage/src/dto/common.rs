use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{Result, StorageError};

/// Opaque position marker for cursor pagination.
///
/// Encodes the absolute rank offset of the next page. Clients must treat the
/// token as opaque and hand it back untouched; the format is private to the
/// server and may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    offset: u32,
}

const CURSOR_PREFIX: &str = "pos:";

impl PageCursor {
    pub fn start() -> Self {
        Self { offset: 0 }
    }

    pub fn at(offset: u32) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn encode(&self) -> String {
        format!("{}{}", CURSOR_PREFIX, self.offset)
    }

    pub fn decode(token: &str) -> Result<Self> {
        token
            .strip_prefix(CURSOR_PREFIX)
            .and_then(|rest| rest.parse().ok())
            .map(|offset| Self { offset })
            .ok_or_else(|| StorageError::ConstraintViolation("malformed cursor".to_string()))
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CursorParams {
    /// Token returned by the previous page, absent for the first page
    pub cursor: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    25
}

impl CursorParams {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.page_size < 1 || self.page_size > 100 {
            return Err("page_size must be between 1 and 100".to_string());
        }
        if let Some(ref token) = self.cursor
            && PageCursor::decode(token).is_err()
        {
            return Err("cursor is not a valid page token".to_string());
        }
        Ok(())
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
            .as_deref()
            .and_then(|t| PageCursor::decode(t).ok())
            .unwrap_or_else(PageCursor::start)
    }
}

/// One slice of a cursor-paginated listing.
///
/// `has_more` is inferred from page fullness: a page holding exactly
/// `page_size` rows is assumed to have a successor. No count query is issued.
#[derive(Debug, Serialize, ToSchema)]
pub struct CursorPage<T> {
    pub data: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    pub fn new(data: Vec<T>, cursor: PageCursor, page_size: u32, fetched: usize) -> Self {
        let has_more = fetched == page_size as usize;
        let next_cursor = has_more.then(|| PageCursor::at(cursor.offset() + page_size).encode());
        Self {
            data,
            next_cursor,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_round_trip() {
        let cursor = PageCursor::at(75);
        let decoded = PageCursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded.offset(), 75);
    }

    #[test]
    fn test_malformed_cursor_rejected() {
        assert!(PageCursor::decode("garbage").is_err());
        assert!(PageCursor::decode("pos:notanumber").is_err());
        assert!(PageCursor::decode("").is_err());
    }

    #[test]
    fn test_full_page_has_more() {
        let page = CursorPage::new(vec![1, 2, 3], PageCursor::start(), 3, 3);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("pos:3"));
    }

    #[test]
    fn test_short_page_ends_listing() {
        let page = CursorPage::new(vec![1, 2], PageCursor::start(), 3, 2);
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_page_size_bounds() {
        let params = CursorParams {
            cursor: None,
            page_size: 0,
        };
        assert!(params.validate().is_err());

        let params = CursorParams {
            cursor: Some("pos:50".to_string()),
            page_size: 25,
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.cursor().offset(), 50);
    }
}
