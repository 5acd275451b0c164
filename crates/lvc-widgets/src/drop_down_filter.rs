// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Drop-down filter controller

use crate::{ValidationError, check_filter_mode};
use lvc_core::{CoalescerHandle, Filter, WidgetId};

/// One selectable option of a [`DropDownFilter`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOption {
    pub caption: String,
    pub filter: Filter,
}

impl FilterOption {
    pub fn new(caption: impl Into<String>, filter: Filter) -> Self {
        FilterOption {
            caption: caption.into(),
            filter,
        }
    }

    /// An option applying no constraint (commonly captioned "All")
    pub fn empty(caption: impl Into<String>) -> Self {
        Self::new(caption, Filter::None)
    }
}

/// A single-select filter over a fixed option list
///
/// The default option's filter is registered at construction. Selecting an
/// option replaces this widget's constraint with that option's filter.
#[derive(Debug)]
pub struct DropDownFilter {
    widget: WidgetId,
    handle: CoalescerHandle,
    options: Vec<FilterOption>,
    selected: usize,
}

impl DropDownFilter {
    /// Construct and register the default option's filter
    ///
    /// Fails if `options` is empty, `default` is out of range, or any
    /// option's filter cannot be evaluated by the data source's query mode.
    pub fn new(
        handle: CoalescerHandle,
        widget: impl Into<WidgetId>,
        options: Vec<FilterOption>,
        default: usize,
    ) -> Result<Self, ValidationError> {
        if options.is_empty() {
            return Err(ValidationError::NoFilterOptions);
        }
        if default >= options.len() {
            return Err(ValidationError::DefaultOutOfRange {
                index: default,
                len: options.len(),
            });
        }
        for option in &options {
            check_filter_mode(&handle, &option.filter)?;
        }
        let w = DropDownFilter {
            widget: widget.into(),
            handle,
            options,
            selected: default,
        };
        w.apply();
        Ok(w)
    }

    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Index of the selected option
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Select option `index`, registering its filter
    ///
    /// Out-of-range indices and re-selection of the current option are
    /// ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.options.len() {
            log::warn!(
                target: "lvc_widgets::drop_down_filter",
                "select: index {index} out of range ({} options)",
                self.options.len()
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
        self.handle
            .set_constraint(self.widget.clone(), self.options[self.selected].filter.clone());
    }
}
