// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! List-view query coordination / core
//!
//! Multiple independent widgets (search boxes, filters, sort controls, pagers)
//! may be attached to one host list view, each mutating a shared query. This
//! crate provides the coordination layer between them:
//!
//! 1.  [`ListView`] is the narrow contract required of the host list view
//! 2.  [`CoalescerRegistry::acquire`] validates that contract and yields the
//!     per-list-view [`CoalescerHandle`] (one coalescer per list view, shared
//!     by all attached widgets)
//! 3.  Widgets register [`Filter`], [`SortOrder`] and [`Paging`] values
//!     through the handle; the coalescer debounces registration bursts,
//!     serializes reloads so at most one is in flight, and re-triggers itself
//!     once for anything registered mid-flight
//!
//! Everything runs on one cooperative thread; the host event loop drives
//! timers via [`schedule::run_due`].
//!
//! Widget controllers themselves live in the companion `lvc-widgets` crate.

mod coalescer;
pub use coalescer::{CoalescerHandle, DEFAULT_DELAY, Phase, WidgetId};

pub mod filter;
pub use filter::{AttributeFilter, CombinedFilter, Filter, Operator, QueryMode};

mod sort;
pub use sort::{ParseDirectionError, SortDirection, SortOrder};

mod paging;
pub use paging::Paging;

mod source;
pub use source::{Capabilities, ListView, OnComplete, SharedListView};

pub mod schedule;
pub use schedule::{Scheduler, TimerToken};

mod registry;
pub use registry::{AcquireError, CoalescerRegistry};
