// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Paging state

/// Paging window of a list view query
///
/// Unlike constraints, paging is a property of the list view itself, not of
/// any one widget: registering a new paging state replaces the old one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Paging {
    /// Index of the first row to load
    pub offset: usize,
    /// Rows per load; `None` leaves the data source's own limit in place
    pub page_size: Option<usize>,
}

impl Paging {
    pub fn new(offset: usize, page_size: impl Into<Option<usize>>) -> Self {
        Paging {
            offset,
            page_size: page_size.into(),
        }
    }

    /// Paging window for page `index` (0-based) of size `size`
    pub fn page(index: usize, size: usize) -> Self {
        Paging {
            offset: index * size,
            page_size: Some(size),
        }
    }
}
