// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Drop-down sort controller

use crate::ValidationError;
use lvc_core::{CoalescerHandle, SortOrder, WidgetId};

/// One selectable option of a [`DropDownSort`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOption {
    pub caption: String,
    pub sort: SortOrder,
}

impl SortOption {
    pub fn new(caption: impl Into<String>, sort: SortOrder) -> Self {
        SortOption {
            caption: caption.into(),
            sort,
        }
    }
}

/// A single-select sort control over a fixed option list
///
/// Registering a sort order displaces whatever sort any other widget had
/// registered; only one sort order is active per list view. With no default
/// option, nothing is registered until the user selects.
#[derive(Debug)]
pub struct DropDownSort {
    widget: WidgetId,
    handle: CoalescerHandle,
    options: Vec<SortOption>,
    selected: Option<usize>,
}

impl DropDownSort {
    /// Construct; registers the default option's sort, if any
    pub fn new(
        handle: CoalescerHandle,
        widget: impl Into<WidgetId>,
        options: Vec<SortOption>,
        default: Option<usize>,
    ) -> Result<Self, ValidationError> {
        if options.is_empty() {
            return Err(ValidationError::NoSortOptions);
        }
        if let Some(index) = default
            && index >= options.len()
        {
            return Err(ValidationError::DefaultOutOfRange {
                index,
                len: options.len(),
            });
        }
        let w = DropDownSort {
            widget: widget.into(),
            handle,
            options,
            selected: default,
        };
        if w.selected.is_some() {
            w.apply();
        }
        Ok(w)
    }

    pub fn options(&self) -> &[SortOption] {
        &self.options
    }

    /// Index of the selected option, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select option `index`, registering its sort order
    pub fn select(&mut self, index: usize) {
        if index >= self.options.len() {
            log::warn!(
                target: "lvc_widgets::drop_down_sort",
                "select: index {index} out of range ({} options)",
                self.options.len()
            );
            return;
        }
        if self.selected == Some(index) {
            return;
        }
        self.selected = Some(index);
        self.apply();
    }

    fn apply(&self) {
        if let Some(index) = self.selected {
            self.handle
                .set_sorting(self.widget.clone(), self.options[index].sort.clone());
        }
    }
}
