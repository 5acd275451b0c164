// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Header sort controller

use crate::ValidationError;
use lvc_core::{CoalescerHandle, SortDirection, SortOrder, WidgetId};
use smol_str::SmolStr;

/// A clickable column-header sort control for one attribute
///
/// The first activation sorts ascending; each further activation reverses the
/// direction. `direction()` reflects this control's own last registration;
/// when another sort widget takes over, the coalescer drops this control's
/// entry but the control is not notified; the host should clear stale
/// indicators when rendering.
#[derive(Debug)]
pub struct HeaderSort {
    widget: WidgetId,
    handle: CoalescerHandle,
    attribute: SmolStr,
    direction: Option<SortDirection>,
}

impl HeaderSort {
    /// Construct; fails on an empty attribute name
    pub fn new(
        handle: CoalescerHandle,
        widget: impl Into<WidgetId>,
        attribute: impl Into<SmolStr>,
    ) -> Result<Self, ValidationError> {
        let attribute = attribute.into();
        if attribute.is_empty() {
            return Err(ValidationError::EmptyAttribute);
        }
        Ok(HeaderSort {
            widget: widget.into(),
            handle,
            attribute,
            direction: None,
        })
    }

    /// The sorted attribute
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Direction of this control's last registration, if any
    pub fn direction(&self) -> Option<SortDirection> {
        self.direction
    }

    /// Activate (header click): first ascending, then alternating
    pub fn toggle(&mut self) -> SortDirection {
        let direction = match self.direction {
            None => SortDirection::Ascending,
            Some(d) => d.reversed(),
        };
        self.direction = Some(direction);
        self.handle.set_sorting(
            self.widget.clone(),
            SortOrder::new(self.attribute.clone(), direction),
        );
        direction
    }
}
