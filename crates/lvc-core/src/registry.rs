// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Coalescer acquisition
//!
//! One coalescer exists per list view, shared by every widget attached to it.
//! Rather than attaching private state onto the host's list-view object, a
//! [`CoalescerRegistry`] keeps an explicit side table from list-view identity
//! to a weakly-referenced coalescer: entries die with their list view (or the
//! last widget handle) and are pruned on the next acquisition.

use crate::coalescer::{Coalescer, CoalescerHandle, DEFAULT_DELAY};
use crate::schedule::Scheduler;
use crate::source::{Capabilities, ListView, SharedListView};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use thiserror::Error;

/// Error acquiring a coalescer for a list view
///
/// Raised synchronously at acquisition, before any coalescer state is
/// created. The `Display` form is suitable as an inline configuration-error
/// message at the widget's render location.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AcquireError {
    #[error("list view has no compatible data source")]
    NoDataSource,
    /// A required capability is absent; the payload names it
    #[error("list view data source does not support {0}")]
    MissingCapability(&'static str),
    /// The list view presents a different entity than the widget expects
    #[error("entity mismatch: widget expects `{expected}`, list view presents `{found}`")]
    EntityMismatch { expected: String, found: String },
}

struct Entry {
    source: Weak<RefCell<dyn ListView>>,
    coalescer: Weak<RefCell<Coalescer>>,
}

/// Registry of per-list-view coalescers
///
/// Owned by whichever host module manages list-view lifecycle. Also owns the
/// [`Scheduler`] all its coalescers share; the host event loop must pump it
/// (see [`run_due`](crate::schedule::run_due)).
pub struct CoalescerRegistry {
    scheduler: Rc<RefCell<Scheduler>>,
    delay: Duration,
    entries: Vec<Entry>,
}

impl Default for CoalescerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CoalescerRegistry {
    /// Construct with the default debounce delay ([`DEFAULT_DELAY`])
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY)
    }

    /// Construct with a custom debounce delay
    pub fn with_delay(delay: Duration) -> Self {
        CoalescerRegistry {
            scheduler: Rc::new(RefCell::new(Scheduler::new())),
            delay,
            entries: Vec::new(),
        }
    }

    /// The shared scheduler, for the host event loop to pump
    pub fn scheduler(&self) -> &Rc<RefCell<Scheduler>> {
        &self.scheduler
    }

    /// Number of live coalescers
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.coalescer.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Acquire the coalescer for `source`, creating it if needed
    ///
    /// Fails fast if `source` lacks a required capability or, when
    /// `expected_entity` is given, presents a different entity. On failure no
    /// coalescer state is created.
    ///
    /// Re-acquiring a list view which already has a live coalescer (e.g. on
    /// widget remount) returns the existing instance with its registered
    /// entries intact, but treats the next update as an initial load again.
    pub fn acquire(
        &mut self,
        source: &SharedListView,
        expected_entity: Option<&str>,
    ) -> Result<CoalescerHandle, AcquireError> {
        {
            let view = source.borrow();
            let caps = view.capabilities();
            if !caps.contains(Capabilities::DATA_SOURCE) {
                return Err(AcquireError::NoDataSource);
            }
            if !caps.contains(Capabilities::RELOAD) {
                return Err(AcquireError::MissingCapability("reload"));
            }
            if !caps.contains(Capabilities::SET_OFFSET) {
                return Err(AcquireError::MissingCapability("paging offset"));
            }
            if let Some(expected) = expected_entity {
                let found = view.entity();
                if found != expected {
                    return Err(AcquireError::EntityMismatch {
                        expected: expected.to_string(),
                        found: found.to_string(),
                    });
                }
            }
        }

        self.entries
            .retain(|e| e.source.strong_count() > 0 && e.coalescer.strong_count() > 0);

        let source_ptr = Rc::as_ptr(source) as *const ();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.source.as_ptr() as *const () == source_ptr)
            && let Some(coalescer) = entry.coalescer.upgrade()
        {
            log::trace!(target: "lvc_core::registry", "acquire: re-using live coalescer");
            coalescer.borrow_mut().reset_initial_load();
            return Ok(CoalescerHandle::from_rc(coalescer));
        }

        log::debug!(
            target: "lvc_core::registry",
            "acquire: new coalescer for entity `{}`",
            source.borrow().entity()
        );
        let coalescer = Rc::new(RefCell::new(Coalescer::new(
            source,
            self.scheduler.clone(),
            self.delay,
        )));
        self.entries.push(Entry {
            source: Rc::downgrade(source),
            coalescer: Rc::downgrade(&coalescer),
        });
        Ok(CoalescerHandle::from_rc(coalescer))
    }
}
