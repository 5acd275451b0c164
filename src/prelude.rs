// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Library prelude
//!
//! The commonly-used types of both member crates, in one import.

pub use crate::schedule::run_due;
pub use crate::{
    AcquireError, AttributeFilter, Capabilities, CoalescerHandle, CoalescerRegistry,
    CombinedFilter, Filter, ListView, OnComplete, Operator, Paging, Phase, QueryMode,
    SharedListView, SortDirection, SortOrder, WidgetId,
};
pub use crate::widgets::{
    CheckBoxFilter, DropDownFilter, DropDownSort, FilterOption, HeaderSort, PageSize, Pagination,
    SortOption, TextSearch, ValidationError,
};
