// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! List-view query widget controllers
//!
//! Each type here is the behavioral half of one list-view control: it
//! validates its configuration, holds the control's interaction state and
//! translates user interactions into registrations on the shared
//! [`CoalescerHandle`]. Rendering is the host's concern; these controllers
//! expose exactly the state a view layer needs.
//!
//! Construction validates configuration up front and fails with a
//! [`ValidationError`] whose `Display` form is the inline message to render
//! in place of the control. A misconfigured controller is never constructed,
//! so it can never reach the list view.

use lvc_core::CoalescerHandle;
use thiserror::Error;

mod check_box_filter;
pub use check_box_filter::CheckBoxFilter;

mod drop_down_filter;
pub use drop_down_filter::{DropDownFilter, FilterOption};

mod drop_down_sort;
pub use drop_down_sort::{DropDownSort, SortOption};

mod header_sort;
pub use header_sort::HeaderSort;

mod page_size;
pub use page_size::PageSize;

mod pagination;
pub use pagination::Pagination;

mod search;
pub use search::TextSearch;

/// Widget configuration error
///
/// The `Display` form is the user-visible inline message; the interactive
/// control is suppressed entirely until the configuration is corrected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one search attribute is required")]
    NoSearchAttributes,
    #[error("no filter options configured")]
    NoFilterOptions,
    #[error("no sort options configured")]
    NoSortOptions,
    #[error("no page size options configured")]
    NoPageSizeOptions,
    #[error("default option index {index} out of range ({len} options)")]
    DefaultOutOfRange { index: usize, len: usize },
    #[error("page size must be positive")]
    ZeroPageSize,
    #[error("sort attribute must not be empty")]
    EmptyAttribute,
    #[error("textual filter expressions cannot be used with an offline data source")]
    OfflineExpression,
}

/// Check a filter against the data source's query mode
///
/// Textual expressions cannot be evaluated offline; the mismatch is caught
/// here, at construction, not at update time.
fn check_filter_mode(
    handle: &CoalescerHandle,
    filter: &lvc_core::Filter,
) -> Result<(), ValidationError> {
    use lvc_core::{Filter, QueryMode};
    match (handle.query_mode(), filter) {
        (QueryMode::Offline, Filter::Expression(text)) if !text.is_empty() => {
            Err(ValidationError::OfflineExpression)
        }
        _ => Ok(()),
    }
}
