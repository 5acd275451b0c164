// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! List-view query widgets
//!
//! This, the main LVC crate, is merely a wrapper over other crates:
//!
//! -   [`lvc_core`] provides the coordination layer: the list-view
//!     collaborator contract, per-list-view acquisition and the debouncing,
//!     reload-serializing update coalescer
//! -   [`lvc_widgets`] provides the widget controllers (text search, filters,
//!     sort controls, paging) that drive it
//!
//! All items from [`lvc_core`] are directly re-exported from this crate;
//! [`lvc_widgets`] is re-exported as the [`widgets`] sub-module.
//!
//! # Overview
//!
//! The host owns a list view and implements [`ListView`] for it. Widgets
//! acquire the shared per-list-view coalescer through a
//! [`CoalescerRegistry`], then register constraints, sorting and paging;
//! the coalescer batches registration bursts into single update cycles and
//! never has more than one reload in flight. The host event loop pumps
//! [`schedule::run_due`] to drive debounce timers and completions.

// public implementations:
pub mod prelude;

pub use lvc_core::*;

pub extern crate lvc_widgets as widgets;
