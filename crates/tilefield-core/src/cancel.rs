use std::cell::Cell;
use std::rc::Rc;

/// Single-threaded cancellation flag shared by everything one animation
/// session owns. Clones observe the same flag; cancelling is one-way.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only for the call that actually flipped the flag.
    pub fn cancel(&self) -> bool {
        !self.cancelled.replace(true)
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
