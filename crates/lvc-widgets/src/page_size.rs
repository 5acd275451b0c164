// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Page-size selector controller

use crate::ValidationError;
use lvc_core::{CoalescerHandle, Paging};

/// A selector over a fixed list of page sizes
///
/// The default size is registered at construction. Changing the page size
/// resets the offset to zero: the old offset is meaningless against a new
/// page grid.
#[derive(Debug)]
pub struct PageSize {
    handle: CoalescerHandle,
    sizes: Vec<usize>,
    selected: usize,
}

impl PageSize {
    /// Construct and register the default size
    ///
    /// Fails if `sizes` is empty, contains zero, or `default` is out of
    /// range.
    pub fn new(
        handle: CoalescerHandle,
        sizes: Vec<usize>,
        default: usize,
    ) -> Result<Self, ValidationError> {
        if sizes.is_empty() {
            return Err(ValidationError::NoPageSizeOptions);
        }
        if sizes.contains(&0) {
            return Err(ValidationError::ZeroPageSize);
        }
        if default >= sizes.len() {
            return Err(ValidationError::DefaultOutOfRange {
                index: default,
                len: sizes.len(),
            });
        }
        let w = PageSize {
            handle,
            sizes,
            selected: default,
        };
        w.apply();
        Ok(w)
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// The selected page size
    pub fn selected_size(&self) -> usize {
        self.sizes[self.selected]
    }

    /// Select size option `index`, registering the new paging window
    pub fn select(&mut self, index: usize) {
        if index >= self.sizes.len() {
            log::warn!(
                target: "lvc_widgets::page_size",
                "select: index {index} out of range ({} options)",
                self.sizes.len()
            );
            return;
        }
        if index == self.selected {
            return;
        }
        self.selected = index;
        self.apply();
    }

    fn apply(&self) {
        self.handle.set_paging(Paging::page(0, self.selected_size()));
    }
}
