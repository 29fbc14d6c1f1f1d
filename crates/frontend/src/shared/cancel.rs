//! Cancellation of in-flight requests when a component goes away.

use leptos::prelude::*;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use web_sys::{AbortController, AbortSignal};

/// Shared cancellation flag with an optional browser `AbortController`.
///
/// Stores check [`CancelToken::is_cancelled`] after every await point and
/// skip committing state once it is set.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    controller: Option<Rc<AbortController>>,
}

impl CancelToken {
    /// Flag-only token (no abort signal attached to requests)
    pub fn new() -> Self {
        Self::default()
    }

    /// Token whose cancellation also aborts the underlying `fetch`
    pub fn with_abort() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            controller: AbortController::new().ok().map(Rc::new),
        }
    }

    /// Token cancelled when the current reactive owner is cleaned up
    /// (the component unmounts)
    pub fn scoped() -> Self {
        let token = Self::with_abort();
        let flag = token.cancelled.clone();
        let controller = StoredValue::new_local(token.controller.clone());
        on_cleanup(move || {
            flag.store(true, Ordering::Relaxed);
            controller.try_with_value(|c| {
                if let Some(c) = c {
                    c.abort();
                }
            });
        });
        token
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn signal(&self) -> Option<AbortSignal> {
        self.controller.as_ref().map(|c| c.signal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        assert!(clone.signal().is_none());
    }
}
