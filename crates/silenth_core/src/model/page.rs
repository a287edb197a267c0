//! Offset pagination envelopes.
//!
//! # Invariants
//! - A valid request has `page >= 0`, `size > 0` and an offset that fits `i64`.
//! - `Page` echoes the request and derives totals from `total_elements`.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Zero-based page index plus page size. Sort order is fixed by the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

/// Rejected pagination input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequestError {
    NegativePage(i64),
    NonPositiveSize(i64),
    OffsetOverflow { page: i64, size: i64 },
}

impl Display for PageRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativePage(page) => write!(f, "page index must be >= 0, got {page}"),
            Self::NonPositiveSize(size) => write!(f, "page size must be > 0, got {size}"),
            Self::OffsetOverflow { page, size } => {
                write!(f, "page {page} with size {size} overflows the row offset")
            }
        }
    }
}

impl Error for PageRequestError {}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    /// Checks bounds and returns the row offset for this page.
    pub fn offset(&self) -> Result<i64, PageRequestError> {
        if self.page < 0 {
            return Err(PageRequestError::NegativePage(self.page));
        }
        if self.size <= 0 {
            return Err(PageRequestError::NonPositiveSize(self.size));
        }
        self.page
            .checked_mul(self.size)
            .ok_or(PageRequestError::OffsetOverflow {
                page: self.page,
                size: self.size,
            })
    }

    /// Validates the request without computing anything else.
    pub fn validate(&self) -> Result<(), PageRequestError> {
        self.offset().map(|_| ())
    }
}

/// One page of results plus metadata for computing totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Echoed zero-based page index.
    pub page: i64,
    /// Echoed page size.
    pub size: i64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// Builds a page for an already validated request.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1) as u64;
        let total_pages = total_elements.div_ceil(size);
        let page_index = request.page.max(0) as u64;
        Self {
            number_of_elements: content.len(),
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            first: page_index == 0,
            last: page_index + 1 >= total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        !self.last
    }

    /// Maps page items while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
        }
    }
}
