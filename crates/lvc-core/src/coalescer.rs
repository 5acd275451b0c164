// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Update coalescing for shared list views
//!
//! Any number of independent widgets may register constraints, sorting and
//! paging against one list view, from the same event-processing turn or from
//! unrelated callbacks. The coalescer batches these registrations into a
//! single update cycle per debounce window and guarantees the list view never
//! has more than one reload in flight:
//!
//! -   a registration while idle arms a short debounce timer; further
//!     registrations within the window re-arm it
//! -   when the timer fires, the combined query is computed, assigned and a
//!     reload issued
//! -   registrations arriving while a reload is in flight are captured by a
//!     single `requires_update` flag; completion of the current reload then
//!     triggers exactly one follow-up cycle (with no fresh debounce delay),
//!     reflecting everything registered in the meantime
//!
//! Reload completion is processed on the next scheduler tick, so list views
//! which invoke the completion callback synchronously from within
//! [`ListView::reload`] are handled without re-entrant borrows.
//!
//! [`ListView::reload`]: crate::ListView::reload

use crate::filter::{Filter, QueryMode, combine};
use crate::paging::Paging;
use crate::schedule::{Scheduler, TimerToken};
use crate::sort::SortOrder;
use crate::source::{ListView, SharedListView};
use linear_map::LinearMap;
use smol_str::SmolStr;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Identifies which widget registered a constraint or sort entry
pub type WidgetId = SmolStr;

/// Default debounce delay between a registration and the update it triggers
pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

/// Observable coalescer state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No update pending or in flight
    Idle,
    /// A debounce timer is armed; registrations re-arm it
    Debouncing,
    /// A reload is in flight; registrations are deferred to one follow-up
    Updating,
}

pub(crate) struct Coalescer {
    source: Weak<RefCell<dyn ListView>>,
    scheduler: Rc<RefCell<Scheduler>>,
    mode: QueryMode,
    delay: Duration,
    constraints: LinearMap<WidgetId, Filter>,
    sorting: LinearMap<WidgetId, SortOrder>,
    paging: Option<Paging>,
    pending: Option<TimerToken>,
    update_in_progress: bool,
    requires_update: bool,
    initial_load: bool,
}

impl Coalescer {
    pub(crate) fn new(
        source: &SharedListView,
        scheduler: Rc<RefCell<Scheduler>>,
        delay: Duration,
    ) -> Self {
        let mode = source.borrow().query_mode();
        // Content stays hidden from acquisition until the first load completes
        source.borrow_mut().set_content_visible(false);
        Coalescer {
            source: Rc::downgrade(source),
            scheduler,
            mode,
            delay,
            constraints: LinearMap::new(),
            sorting: LinearMap::new(),
            paging: None,
            pending: None,
            update_in_progress: false,
            requires_update: false,
            initial_load: true,
        }
    }

    /// Treat the next update as an initial load again
    ///
    /// Called when a widget re-acquires this coalescer (e.g. on remount);
    /// registered constraint and sort entries are retained. Content is hidden
    /// again until that load completes.
    pub(crate) fn reset_initial_load(&mut self) {
        self.initial_load = true;
        if let Some(source) = self.source.upgrade() {
            source.borrow_mut().set_content_visible(false);
        }
    }

    fn phase(&self) -> Phase {
        if self.update_in_progress {
            Phase::Updating
        } else if self.pending.is_some() {
            Phase::Debouncing
        } else {
            Phase::Idle
        }
    }
}

/// Handle used by widgets to register constraints, sorting and paging
///
/// All widgets attached to one list view share a coalescer; clones of this
/// handle refer to the same instance. Registration methods return
/// immediately; their effect is observed via the next update cycle.
#[derive(Clone)]
pub struct CoalescerHandle {
    inner: Rc<RefCell<Coalescer>>,
}

impl CoalescerHandle {
    pub(crate) fn from_rc(inner: Rc<RefCell<Coalescer>>) -> Self {
        CoalescerHandle { inner }
    }

    /// Register widget `widget`'s constraint, replacing its previous entry
    ///
    /// Entries of distinct widgets are merged at update time (see
    /// [`combine`]); a widget clears its contribution by registering
    /// [`Filter::None`].
    pub fn set_constraint(&self, widget: impl Into<WidgetId>, filter: Filter) {
        let widget = widget.into();
        log::trace!(target: "lvc_core::coalescer", "set_constraint: {widget}: {filter:?}");
        self.inner.borrow_mut().constraints.insert(widget, filter);
        self.schedule();
    }

    /// Register a sort order, clearing all previous sort entries
    ///
    /// Sort widgets are mutually exclusive within a list view: whichever
    /// widget registered last wins, alone.
    pub fn set_sorting(&self, widget: impl Into<WidgetId>, sort: SortOrder) {
        let widget = widget.into();
        log::trace!(target: "lvc_core::coalescer", "set_sorting: {widget}: {sort}");
        {
            let mut c = self.inner.borrow_mut();
            c.sorting.clear();
            c.sorting.insert(widget, sort);
        }
        self.schedule();
    }

    /// Register a paging window, replacing the previous one
    pub fn set_paging(&self, paging: Paging) {
        log::trace!(target: "lvc_core::coalescer", "set_paging: {paging:?}");
        self.inner.borrow_mut().paging = Some(paging);
        self.schedule();
    }

    /// Observable state, mainly useful for hosts and tests
    pub fn phase(&self) -> Phase {
        self.inner.borrow().phase()
    }

    /// Whether the first update cycle has yet to complete
    pub fn initial_load(&self) -> bool {
        self.inner.borrow().initial_load
    }

    /// Query mode of the underlying data source
    pub fn query_mode(&self) -> QueryMode {
        self.inner.borrow().mode
    }

    /// Whether two handles refer to the same coalescer
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn schedule(&self) {
        let mut c = self.inner.borrow_mut();
        if c.update_in_progress {
            // The in-flight update's completion picks this up; repeated
            // registrations mid-flight still queue only one follow-up.
            c.requires_update = true;
            return;
        }

        // Re-arm the debounce window
        if let Some(token) = c.pending.take() {
            c.scheduler.borrow_mut().cancel(token);
        }
        let weak = Rc::downgrade(&self.inner);
        let delay = c.delay;
        let token = c.scheduler.borrow_mut().schedule(delay, move || {
            if let Some(inner) = weak.upgrade() {
                run_update(&inner);
            }
        });
        c.pending = Some(token);
    }
}

impl std::fmt::Debug for CoalescerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = self.inner.borrow();
        f.debug_struct("CoalescerHandle")
            .field("phase", &c.phase())
            .field("constraints", &c.constraints.len())
            .field("initial_load", &c.initial_load)
            .finish()
    }
}

/// Compute the combined query, assign it and issue a reload
fn run_update(this: &Rc<RefCell<Coalescer>>) {
    let mut c = this.borrow_mut();
    c.pending = None;
    let Some(source) = c.source.upgrade() else {
        log::trace!(target: "lvc_core::coalescer", "run_update: list view dropped; going idle");
        c.update_in_progress = false;
        c.requires_update = false;
        return;
    };
    c.update_in_progress = true;

    let filter = combine(c.mode, c.constraints.values());
    // set_sorting guarantees at most one entry
    let sort = c.sorting.values().next().cloned();
    let paging = c.paging;
    let scheduler = c.scheduler.clone();
    let initial = c.initial_load;
    drop(c);

    log::debug!(
        target: "lvc_core::coalescer",
        "run_update: filter = {filter:?}, sort = {sort:?}, paging = {paging:?}"
    );

    {
        let mut view = source.borrow_mut();
        if initial {
            view.set_content_visible(false);
        } else {
            view.set_loading(true);
        }
        view.apply_query(&filter, sort.as_ref(), paging.as_ref());
    }

    let weak = Rc::downgrade(this);
    source.borrow_mut().reload(Box::new(move || {
        // Deferred one tick: the callback may be invoked from within reload,
        // while the list view is still mutably borrowed.
        scheduler.borrow_mut().schedule(Duration::ZERO, move || {
            if let Some(inner) = weak.upgrade() {
                finish_update(&inner);
            }
        });
    }));
}

/// Handle reload completion: update visibility, then re-run or go idle
fn finish_update(this: &Rc<RefCell<Coalescer>>) {
    let mut c = this.borrow_mut();
    let initial = c.initial_load;
    c.initial_load = false;
    let rerun = c.requires_update;
    c.requires_update = false;
    if !rerun {
        c.update_in_progress = false;
    }
    let source = c.source.upgrade();
    drop(c);

    if let Some(source) = source {
        let mut view = source.borrow_mut();
        if initial {
            view.set_content_visible(true);
        } else {
            view.set_loading(false);
        }
    }

    if rerun {
        log::trace!(
            target: "lvc_core::coalescer",
            "finish_update: re-running for registrations made mid-flight"
        );
        run_update(this);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AttributeFilter, CombinedFilter, Operator};
    use crate::schedule::run_due;
    use crate::source::{Capabilities, OnComplete};
    use std::time::Instant;

    #[derive(Default)]
    struct Mock {
        mode: Option<QueryMode>,
        applied: Vec<(CombinedFilter, Option<SortOrder>, Option<Paging>)>,
        reloads: usize,
        held: Vec<OnComplete>,
        auto_complete: bool,
        content_visible: Vec<bool>,
        loading: Vec<bool>,
    }

    impl ListView for Mock {
        fn capabilities(&self) -> Capabilities {
            Capabilities::REQUIRED
        }
        fn entity(&self) -> &str {
            "Country"
        }
        fn query_mode(&self) -> QueryMode {
            self.mode.unwrap_or(QueryMode::Online)
        }
        fn apply_query(
            &mut self,
            filter: &CombinedFilter,
            sort: Option<&SortOrder>,
            paging: Option<&Paging>,
        ) {
            self.applied
                .push((filter.clone(), sort.cloned(), paging.copied()));
        }
        fn reload(&mut self, on_complete: OnComplete) {
            self.reloads += 1;
            if self.auto_complete {
                on_complete();
            } else {
                self.held.push(on_complete);
            }
        }
        fn set_content_visible(&mut self, visible: bool) {
            self.content_visible.push(visible);
        }
        fn set_loading(&mut self, loading: bool) {
            self.loading.push(loading);
        }
    }

    struct Fixture {
        mock: Rc<RefCell<Mock>>,
        shared: SharedListView,
        scheduler: Rc<RefCell<Scheduler>>,
        handle: CoalescerHandle,
    }

    fn fixture(mock: Mock) -> Fixture {
        let mock = Rc::new(RefCell::new(mock));
        let shared: SharedListView = mock.clone();
        let scheduler = Rc::new(RefCell::new(Scheduler::new()));
        let coalescer = Coalescer::new(&shared, scheduler.clone(), DEFAULT_DELAY);
        let handle = CoalescerHandle::from_rc(Rc::new(RefCell::new(coalescer)));
        Fixture {
            mock,
            shared,
            scheduler,
            handle,
        }
    }

    impl Fixture {
        /// Run everything due up to one second from now
        fn pump(&self) -> usize {
            run_due(&self.scheduler, Instant::now() + Duration::from_secs(1))
        }

        /// Invoke completion callbacks held by the mock
        fn complete_reloads(&self) {
            let held: Vec<OnComplete> = self.mock.borrow_mut().held.drain(..).collect();
            for cb in held {
                cb();
            }
        }
    }

    fn contains(attribute: &str, value: &str) -> Filter {
        Filter::attribute(AttributeFilter::new(attribute, Operator::Contains, value))
    }

    #[test]
    fn burst_coalesces_to_one_reload() {
        let f = fixture(Mock {
            auto_complete: true,
            ..Default::default()
        });

        f.handle.set_constraint("search", Filter::expression("[x = 1]"));
        f.handle.set_constraint("check", Filter::expression("[y = 2]"));
        // Last write per widget id wins
        f.handle.set_constraint("search", Filter::expression("[x = 3]"));
        assert_eq!(f.handle.phase(), Phase::Debouncing);

        f.pump();
        let mock = f.mock.borrow();
        assert_eq!(mock.reloads, 1);
        assert_eq!(mock.applied.len(), 1);
        assert_eq!(
            mock.applied[0].0,
            CombinedFilter::Expression("[x = 3][y = 2]".to_string())
        );
        assert_eq!(f.handle.phase(), Phase::Idle);
    }

    #[test]
    fn idempotent_re_registration() {
        let f = fixture(Mock {
            auto_complete: true,
            ..Default::default()
        });

        f.handle.set_constraint("search", Filter::expression("[x = 1]"));
        f.handle.set_constraint("search", Filter::expression("[x = 1]"));
        f.pump();

        let mock = f.mock.borrow();
        assert_eq!(mock.reloads, 1);
        assert_eq!(
            mock.applied[0].0,
            CombinedFilter::Expression("[x = 1]".to_string())
        );
    }

    #[test]
    fn mid_flight_registrations_trigger_one_follow_up() {
        let f = fixture(Mock::default());

        f.handle.set_constraint("a", Filter::expression("[a = 1]"));
        f.pump();
        assert_eq!(f.mock.borrow().reloads, 1);
        assert_eq!(f.handle.phase(), Phase::Updating);

        // Multiple registrations while the reload is in flight
        f.handle.set_constraint("b", Filter::expression("[b = 1]"));
        f.handle.set_constraint("c", Filter::expression("[c = 1]"));
        f.handle.set_constraint("b", Filter::expression("[b = 2]"));
        assert_eq!(f.handle.phase(), Phase::Updating);
        assert_eq!(f.mock.borrow().reloads, 1);

        // Completion triggers exactly one follow-up, reflecting all of them
        f.complete_reloads();
        f.pump();
        assert_eq!(f.mock.borrow().reloads, 2);
        assert_eq!(
            f.mock.borrow().applied[1].0,
            CombinedFilter::Expression("[a = 1][b = 2][c = 1]".to_string())
        );
        assert_eq!(f.handle.phase(), Phase::Updating);

        // No further requirement queued: completing settles to idle
        f.complete_reloads();
        f.pump();
        assert_eq!(f.mock.borrow().reloads, 2);
        assert_eq!(f.handle.phase(), Phase::Idle);
    }

    #[test]
    fn sort_replaces_not_merges() {
        let f = fixture(Mock {
            auto_complete: true,
            ..Default::default()
        });

        f.handle.set_constraint("a", Filter::expression("[a = 1]"));
        f.handle.set_sorting("a", SortOrder::ascending("Name"));
        f.handle.set_sorting("b", SortOrder::descending("Year"));
        f.pump();

        let mock = f.mock.borrow();
        assert_eq!(mock.reloads, 1);
        // b's sort wins alone; a's constraint remains registered
        assert_eq!(mock.applied[0].1, Some(SortOrder::descending("Year")));
        assert_eq!(
            mock.applied[0].0,
            CombinedFilter::Expression("[a = 1]".to_string())
        );
    }

    #[test]
    fn offline_composition_is_or_grouped() {
        let f = fixture(Mock {
            mode: Some(QueryMode::Offline),
            auto_complete: true,
            ..Default::default()
        });

        f.handle.set_constraint("a", contains("Name", "an"));
        f.handle.set_constraint("b", contains("Code", "7"));
        f.pump();

        let mock = f.mock.borrow();
        assert_eq!(
            mock.applied[0].0,
            CombinedFilter::Group(vec![
                AttributeFilter::new("Name", Operator::Contains, "an"),
                AttributeFilter::new("Code", Operator::Contains, "7"),
            ])
        );
    }

    #[test]
    fn paging_replace_semantics() {
        let f = fixture(Mock {
            auto_complete: true,
            ..Default::default()
        });

        f.handle.set_paging(Paging::page(2, 10));
        f.handle.set_paging(Paging::page(5, 10));
        f.pump();

        let mock = f.mock.borrow();
        assert_eq!(mock.reloads, 1);
        assert_eq!(mock.applied[0].2, Some(Paging::page(5, 10)));
    }

    #[test]
    fn initial_load_visibility() {
        let f = fixture(Mock::default());
        assert!(f.handle.initial_load());
        // Content is hidden from acquisition, before any registration
        assert_eq!(f.mock.borrow().content_visible, vec![false]);

        f.handle.set_constraint("a", Filter::expression("[a = 1]"));
        f.pump();
        // Still hidden while the first load is in flight
        assert_eq!(f.mock.borrow().content_visible, vec![false, false]);
        assert!(f.mock.borrow().loading.is_empty());

        f.complete_reloads();
        f.pump();
        assert_eq!(f.mock.borrow().content_visible, vec![false, false, true]);
        assert!(!f.handle.initial_load());

        // Subsequent updates use the loading indicator instead
        f.handle.set_constraint("a", Filter::expression("[a = 2]"));
        f.pump();
        assert_eq!(f.mock.borrow().loading, vec![true]);
        f.complete_reloads();
        f.pump();
        assert_eq!(f.mock.borrow().loading, vec![true, false]);
        assert_eq!(f.mock.borrow().content_visible, vec![false, false, true]);
    }

    #[test]
    fn reset_initial_load_hides_content() {
        let f = fixture(Mock {
            auto_complete: true,
            ..Default::default()
        });
        f.handle.set_constraint("a", Filter::expression("[a = 1]"));
        f.pump();
        assert_eq!(f.mock.borrow().content_visible, vec![false, false, true]);

        // Re-acquisition treats the next update as an initial load again
        f.handle.inner.borrow_mut().reset_initial_load();
        assert!(f.handle.initial_load());
        assert_eq!(
            f.mock.borrow().content_visible,
            vec![false, false, true, false]
        );
    }

    #[test]
    fn list_view_dropped_before_timer_fires() {
        let f = fixture(Mock::default());
        f.handle.set_constraint("a", Filter::expression("[a = 1]"));

        let Fixture {
            mock,
            shared,
            scheduler,
            handle,
        } = f;
        drop(shared);
        drop(mock);

        // Timer fires against a dropped list view: no panic, back to idle
        run_due(&scheduler, Instant::now() + Duration::from_secs(1));
        assert_eq!(handle.phase(), Phase::Idle);
    }

    #[test]
    fn coalescer_dropped_mid_flight() {
        let f = fixture(Mock::default());
        f.handle.set_constraint("a", Filter::expression("[a = 1]"));
        f.pump();
        assert_eq!(f.mock.borrow().reloads, 1);

        let Fixture {
            mock,
            shared: _shared,
            scheduler,
            handle,
        } = f;
        drop(handle);

        // Completion arrives after the coalescer is gone
        let held: Vec<OnComplete> = mock.borrow_mut().held.drain(..).collect();
        for cb in held {
            cb();
        }
        run_due(&scheduler, Instant::now() + Duration::from_secs(1));
        // Reached if nothing panicked; the list view saw exactly one reload
        assert_eq!(mock.borrow().reloads, 1);
    }
}
