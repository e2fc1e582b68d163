//! Guard predicates for controlling state transitions.
//!
//! Guards are boolean functions over the machine's context that decide
//! whether a transition may complete. They run as the innermost step of
//! the interceptor pipeline.

use std::fmt;
use std::sync::Arc;

/// Predicate over the context that must hold for a transition to proceed.
///
/// Guards are cheap to clone; clones share the same predicate.
///
/// # Example
///
/// ```rust
/// use turnstile::core::Guard;
///
/// struct Door {
///     degree_of_opening: u32,
/// }
///
/// let nearly_shut = Guard::new(|door: &Door| door.degree_of_opening <= 1);
///
/// assert!(nearly_shut.check(&Door { degree_of_opening: 1 }));
/// assert!(!nearly_shut.check(&Door { degree_of_opening: 99 }));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate function.
    ///
    /// The predicate should be deterministic and must be thread-safe
    /// (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// A guard that always passes. Equivalent to having no guard at all.
    pub fn always() -> Self
    where
        C: 'static,
    {
        Guard::new(|_: &C| true)
    }

    /// Check if the guard allows the transition for this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
