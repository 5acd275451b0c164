// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Pagination controller

use crate::ValidationError;
use lvc_core::{CoalescerHandle, Paging};

/// First/previous/next/last page navigation
///
/// The host feeds back the total row count after each reload via
/// [`set_total`]; until then navigation is unbounded forward. Nothing is
/// registered at construction: the data source's initial window (offset 0)
/// stands until the user navigates.
///
/// When a [`PageSize`](crate::PageSize) selector shares the list view, the
/// host should forward size changes via [`set_page_size`] so both controls
/// agree on the page grid.
///
/// [`set_total`]: Pagination::set_total
/// [`set_page_size`]: Pagination::set_page_size
#[derive(Debug)]
pub struct Pagination {
    handle: CoalescerHandle,
    page_size: usize,
    page: usize,
    total: Option<usize>,
}

impl Pagination {
    /// Construct; fails on a zero page size
    pub fn new(handle: CoalescerHandle, page_size: usize) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::ZeroPageSize);
        }
        Ok(Pagination {
            handle,
            page_size,
            page: 0,
            total: None,
        })
    }

    /// Current page index (0-based)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages, if the total row count is known
    pub fn page_count(&self) -> Option<usize> {
        self.total
            .map(|total| total.div_ceil(self.page_size).max(1))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        match self.page_count() {
            Some(count) => self.page + 1 < count,
            None => true,
        }
    }

    /// Record the total row count reported by the last reload
    ///
    /// If the current page fell off the end (rows deleted, filter narrowed),
    /// navigates back to the last page.
    pub fn set_total(&mut self, total: usize) {
        self.total = Some(total);
        if let Some(count) = self.page_count()
            && self.page >= count
        {
            self.set_page(count - 1);
        }
    }

    /// Record a page size change made elsewhere (resets to the first page)
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 || page_size == self.page_size {
            return;
        }
        self.page_size = page_size;
        self.page = 0;
    }

    /// Navigate to page `page` (clamped to the known page count)
    pub fn set_page(&mut self, page: usize) {
        let page = match self.page_count() {
            Some(count) => page.min(count - 1),
            None => page,
        };
        if page == self.page {
            return;
        }
        self.page = page;
        self.handle.set_paging(Paging::page(page, self.page_size));
    }

    pub fn next_page(&mut self) {
        if self.has_next() {
            self.set_page(self.page + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.has_previous() {
            self.set_page(self.page - 1);
        }
    }

    pub fn first_page(&mut self) {
        self.set_page(0);
    }

    /// Navigate to the last page; no-op while the total is unknown
    pub fn last_page(&mut self) {
        if let Some(count) = self.page_count() {
            self.set_page(count - 1);
        }
    }
}
