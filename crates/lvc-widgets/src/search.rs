// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text search controller

use crate::ValidationError;
use lvc_core::{AttributeFilter, CoalescerHandle, Filter, Operator, WidgetId};
use smol_str::SmolStr;

/// A free-text search box over one or more attributes
///
/// The query matches rows where any of the configured attributes contains the
/// entered text (case handling is the backend's concern). An empty query
/// clears this widget's constraint; constraints of other widgets are
/// unaffected either way.
#[derive(Debug)]
pub struct TextSearch {
    widget: WidgetId,
    handle: CoalescerHandle,
    attributes: Vec<SmolStr>,
    query: String,
}

impl TextSearch {
    /// Construct; fails if `attributes` is empty
    pub fn new(
        handle: CoalescerHandle,
        widget: impl Into<WidgetId>,
        attributes: Vec<SmolStr>,
    ) -> Result<Self, ValidationError> {
        if attributes.is_empty() {
            return Err(ValidationError::NoSearchAttributes);
        }
        Ok(TextSearch {
            widget: widget.into(),
            handle,
            attributes,
            query: String::new(),
        })
    }

    /// The current search text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the search text, registering the new constraint
    ///
    /// Unchanged text is a no-op (no registration, no reload).
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.query {
            return;
        }
        self.query = text;
        self.handle.set_constraint(self.widget.clone(), self.filter());
    }

    fn filter(&self) -> Filter {
        if self.query.is_empty() {
            return Filter::None;
        }
        Filter::Attributes(
            self.attributes
                .iter()
                .map(|attr| AttributeFilter::new(attr.clone(), Operator::Contains, self.query.clone()))
                .collect(),
        )
    }
}
