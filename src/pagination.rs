//! Page requests and windowed results.

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Column a client page can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientSort {
    Id,
    Name,
    BirthDate,
    Income,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A zero-based page index, a page size and an optional ordering.
///
/// Without an explicit ordering the rows come back in identifier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: usize,
    size: usize,
    sort: Option<(ClientSort, SortDirection)>,
}

impl PageRequest {
    /// Creates a request for the `page`-th window of `size` rows.
    pub fn of(page: usize, size: usize) -> Result<Self, TypeConstraintError> {
        if size == 0 {
            return Err(TypeConstraintError::ZeroPageSize);
        }
        if page.checked_mul(size).is_none_or(|offset| i64::try_from(offset).is_err()) {
            return Err(TypeConstraintError::PageOutOfRange);
        }
        Ok(Self {
            page,
            size,
            sort: None,
        })
    }

    /// Orders the window by `column`, breaking ties by identifier.
    #[must_use]
    pub fn sorted(mut self, column: ClientSort, direction: SortDirection) -> Self {
        self.sort = Some((column, direction));
        self
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn sort(&self) -> Option<(ClientSort, SortDirection)> {
        self.sort
    }

    /// Number of rows preceding this window.
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Request for the following window with the same size and ordering.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
            sort: self.sort,
        }
    }
}

/// One window of a filtered result set together with the size of the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub page: usize,
    pub size: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        Self {
            content,
            total_elements,
            page: request.page(),
            size: request.size(),
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    /// Number of rows held by this window.
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Converts every row, keeping the pagination metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }
}
