#![forbid(unsafe_code)]

//! RAII subscription guards.

/// Unsubscribes its subscriber when dropped.
///
/// Obtained from [`Broadcaster::guard`](crate::Broadcaster::guard). The guard
/// holds only a weak reference to the broadcaster, so it never extends the
/// broadcaster's lifetime; dropping a guard whose broadcaster is already gone
/// does nothing.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Release the guard without unsubscribing.
    ///
    /// The subscriber stays registered until removed explicitly.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}
