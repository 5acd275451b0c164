// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The list-view collaborator contract
//!
//! This crate does not render or own a list view; it coordinates queries
//! against one provided by the host. [`ListView`] is the narrow capability
//! surface the coordinator depends on, checked explicitly at acquisition time
//! (see [`CoalescerRegistry::acquire`](crate::CoalescerRegistry::acquire)).

use crate::filter::{CombinedFilter, QueryMode};
use crate::paging::Paging;
use crate::sort::SortOrder;
use std::cell::RefCell;
use std::rc::Rc;

bitflags::bitflags! {
    /// Capabilities a list view must declare before acquisition succeeds
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// A data source is bound
        const DATA_SOURCE = 1 << 0;
        /// The data source supports setting a paging offset
        const SET_OFFSET = 1 << 1;
        /// The data source supports programmatic reload
        const RELOAD = 1 << 2;
    }
}

impl Capabilities {
    /// The full set required by [`CoalescerRegistry::acquire`]
    ///
    /// [`CoalescerRegistry::acquire`]: crate::CoalescerRegistry::acquire
    pub const REQUIRED: Self = Self::all();
}

/// Completion callback passed to [`ListView::reload`]
pub type OnComplete = Box<dyn FnOnce()>;

/// The narrow contract required of a host list view
///
/// Implementations are shared between widgets via [`SharedListView`]; the
/// coordinator itself holds only a weak reference and stops issuing
/// operations once the list view is dropped.
pub trait ListView {
    /// Declared capability set; checked once at acquisition
    fn capabilities(&self) -> Capabilities;

    /// Name of the entity presented by the data source
    fn entity(&self) -> &str;

    /// Query execution mode; decides constraint composition policy
    fn query_mode(&self) -> QueryMode;

    /// Assign the combined query state to the data source
    ///
    /// This is a synchronous assignment; no reload is implied.
    fn apply_query(
        &mut self,
        filter: &CombinedFilter,
        sort: Option<&SortOrder>,
        paging: Option<&Paging>,
    );

    /// Trigger a reload of the data source
    ///
    /// `on_complete` must be invoked exactly once when the reload finishes,
    /// synchronously or asynchronously. It must be invoked even on internal
    /// failure: a dropped callback leaves the coordinator waiting for a
    /// completion that never comes and the attached widgets unresponsive.
    /// There is no timeout-based recovery.
    fn reload(&mut self, on_complete: OnComplete);

    /// Show or hide the rendered content node
    ///
    /// Used to suppress flicker while the first load is in progress.
    fn set_content_visible(&mut self, visible: bool);

    /// Show or hide a lightweight loading indicator
    ///
    /// Used for updates after the first load, where hiding content outright
    /// would be more disruptive than helpful.
    fn set_loading(&mut self, loading: bool);
}

/// Shared handle to a [`ListView`]
///
/// All widgets attached to one list view share this handle; its lifetime is
/// managed by the host.
pub type SharedListView = Rc<RefCell<dyn ListView>>;
