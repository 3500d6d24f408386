#![forbid(unsafe_code)]

//! Cooperative cancellation for background reloads.
//!
//! The foreground keeps the [`CancelTrigger`]; the worker job gets the
//! [`CancelToken`] and polls it once per item.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Read side of a cancellation pair.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new token and its trigger.
    pub fn new() -> (Self, CancelTrigger) {
        let cancelled = Arc::new(AtomicBool::new(false));
        let token = Self {
            cancelled: Arc::clone(&cancelled),
        };
        (token, CancelTrigger { cancelled })
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Write side of a cancellation pair.
#[derive(Debug)]
pub struct CancelTrigger {
    cancelled: Arc<AtomicBool>,
}

impl CancelTrigger {
    /// Cancel the paired token. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_starts_live() {
        let (token, trigger) = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(!trigger.is_cancelled());
    }

    #[test]
    fn cancel_is_visible_to_every_clone() {
        let (token, trigger) = CancelToken::new();
        let clone = token.clone();
        trigger.cancel();
        trigger.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn cancel_crosses_threads() {
        let (token, trigger) = CancelToken::new();
        let handle = std::thread::spawn(move || {
            while !token.is_cancelled() {
                std::thread::yield_now();
            }
            true
        });
        trigger.cancel();
        assert!(handle.join().unwrap());
    }
}
