// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Check-box filter controller

use crate::{ValidationError, check_filter_mode};
use lvc_core::{CoalescerHandle, Filter, WidgetId};

/// A two-state filter toggle
///
/// Carries one filter per state; either may be [`Filter::None`] (typically
/// the unchecked state applies no constraint). The filter for the default
/// state is registered at construction, so the list view's first load already
/// reflects it.
#[derive(Debug)]
pub struct CheckBoxFilter {
    widget: WidgetId,
    handle: CoalescerHandle,
    checked_filter: Filter,
    unchecked_filter: Filter,
    checked: bool,
}

impl CheckBoxFilter {
    /// Construct and register the default state's filter
    ///
    /// Fails if either filter cannot be evaluated by the data source's query
    /// mode.
    pub fn new(
        handle: CoalescerHandle,
        widget: impl Into<WidgetId>,
        checked_filter: Filter,
        unchecked_filter: Filter,
        default_checked: bool,
    ) -> Result<Self, ValidationError> {
        check_filter_mode(&handle, &checked_filter)?;
        check_filter_mode(&handle, &unchecked_filter)?;
        let w = CheckBoxFilter {
            widget: widget.into(),
            handle,
            checked_filter,
            unchecked_filter,
            checked: default_checked,
        };
        w.apply();
        Ok(w)
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Set the toggle state, registering the matching filter
    pub fn set_checked(&mut self, checked: bool) {
        if checked == self.checked {
            return;
        }
        self.checked = checked;
        self.apply();
    }

    /// Flip the toggle state
    pub fn toggle(&mut self) {
        self.set_checked(!self.checked);
    }

    fn apply(&self) {
        let filter = if self.checked {
            self.checked_filter.clone()
        } else {
            self.unchecked_filter.clone()
        };
        self.handle.set_constraint(self.widget.clone(), filter);
    }
}
