//! Document-wide pointer-release listeners with scoped registration.
//!
//! A drag must end when the pointer is released anywhere, not only over a grid
//! cell. [`ReleaseScope`] models the host document: selectors subscribe while
//! mounted and the returned [`ReleaseGuard`] removes the listener when dropped,
//! so mounting the same selector repeatedly never accumulates listeners.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::selector::{CommitSink, GridSelector};

pub type SharedSelector<S> = Rc<RefCell<GridSelector<S>>>;

type Listener = Rc<RefCell<dyn FnMut()>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Single-threaded registry of release listeners.
#[derive(Clone, Default)]
pub struct ReleaseScope {
    inner: Rc<RefCell<Registry>>,
}

impl ReleaseScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it stays registered until the guard is dropped.
    #[must_use = "dropping the guard immediately deregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> ReleaseGuard
    where
        F: FnMut() + 'static,
    {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .listeners
            .insert(id, Rc::new(RefCell::new(listener)));
        debug!(id, live = registry.listeners.len(), "release listener added");
        ReleaseGuard {
            scope: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Notify every live listener of a pointer release.
    pub fn dispatch_release(&self) {
        // Listeners may subscribe or unsubscribe while running.
        let listeners: Vec<Listener> = self.inner.borrow().listeners.values().cloned().collect();
        for listener in listeners {
            let mut listener = listener.borrow_mut();
            (*listener)();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Deregisters its listener on drop.
pub struct ReleaseGuard {
    scope: Weak<RefCell<Registry>>,
    id: u64,
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        if let Some(scope) = self.scope.upgrade() {
            scope.borrow_mut().listeners.remove(&self.id);
            debug!(id = self.id, "release listener removed");
        }
    }
}

/// Wire `selector` to releases dispatched on `scope` for the guard's lifetime.
///
/// The listener calls [`GridSelector::pointer_up`](crate::GridSelector::pointer_up)
/// while holding `selector.borrow_mut()`, so the commit sink runs inside that
/// borrow. A sink must read the matrix it is handed and must not borrow the
/// shared selector itself; doing so panics with a `BorrowMutError`. Defer any
/// follow-up work on the selector until `dispatch_release` returns.
#[must_use = "dropping the guard immediately unmounts the selector"]
pub fn mount<S>(scope: &ReleaseScope, selector: &SharedSelector<S>) -> ReleaseGuard
where
    S: CommitSink + 'static,
{
    let selector = Rc::downgrade(selector);
    scope.subscribe(move || {
        if let Some(selector) = selector.upgrade() {
            selector.borrow_mut().pointer_up();
        }
    })
}
