// Shared slot for a self-rescheduling frame callback. The callback keeps a
// clone of its own slot so it can re-request itself, which is a reference
// cycle until the slot is emptied. Pure so it can be exercised by host-side
// tests.

use std::cell::RefCell;
use std::rc::Rc;

pub struct TickSlot<C> {
    inner: Rc<RefCell<Option<C>>>,
}

impl<C> Clone for TickSlot<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C> Default for TickSlot<C> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(None)),
        }
    }
}

impl<C> TickSlot<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, callback: C) {
        *self.inner.borrow_mut() = Some(callback);
    }

    pub fn is_installed(&self) -> bool {
        self.inner.borrow().is_some()
    }

    /// Run `f` against the installed callback, if any.
    pub fn with<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        self.inner.borrow().as_ref().map(f)
    }

    /// Request the first frame. On failure the callback is dropped so the
    /// cycle through its captured slot is broken.
    pub fn arm<T, E>(
        &self,
        request: impl FnOnce(&C) -> Result<T, E>,
        missing: impl FnOnce() -> E,
    ) -> Result<T, E> {
        let requested = self.with(request).unwrap_or_else(|| Err(missing()));
        if requested.is_err() {
            self.release();
        }
        requested
    }

    /// Drop the callback (and everything it captured). Idempotent.
    pub fn release(&self) {
        let callback = self.inner.borrow_mut().take();
        drop(callback);
    }

    /// Number of live handles to this slot, the callback's own included.
    pub fn handles(&self) -> usize {
        Rc::strong_count(&self.inner)
    }
}
