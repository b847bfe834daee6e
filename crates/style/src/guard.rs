//! Recursion guard
//!
//! Bounds re-entrant walks such as alias resolution, initial values that
//! refer to another property's initial value, and `var()` substitution.
//! A guard belongs to one resolution chain and is never shared.

use crate::error::{StyleError, StyleResult};

/// Depth counter for one resolution chain
#[derive(Debug, Clone, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    /// Depth at which `increment` starts failing
    pub const MAX_DEPTH: usize = 512;
    /// Amount taken off the counter when the limit is hit
    pub const MARGIN: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Enter one level. Returns false when the limit is reached, after
    /// lowering the counter by `MARGIN` so a few bounded follow-up steps
    /// can still run.
    pub fn increment(&mut self) -> bool {
        self.depth += 1;
        if self.depth >= Self::MAX_DEPTH {
            self.depth -= Self::MARGIN;
            return false;
        }
        true
    }

    /// Leave one level
    pub fn decrement(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// `increment` as a `Result`, for `?` in recursive walks
    pub fn enter(&mut self) -> StyleResult<()> {
        if self.increment() {
            Ok(())
        } else {
            log::debug!("Recursion guard tripped at depth {}", Self::MAX_DEPTH);
            Err(StyleError::ResourceLimitExceeded { limit: Self::MAX_DEPTH })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fails_on_512th_increment() {
        let mut guard = RecursionGuard::new();
        for _ in 0..511 {
            assert!(guard.increment());
        }
        assert!(!guard.increment());
    }

    #[test]
    fn test_failure_subtracts_margin() {
        let mut guard = RecursionGuard::new();
        for _ in 0..511 {
            guard.increment();
        }
        assert!(!guard.increment());
        assert_eq!(guard.depth(), 504);

        for _ in 0..7 {
            assert!(guard.increment());
        }
        assert!(!guard.increment());
    }

    #[test]
    fn test_decrement_balances() {
        let mut guard = RecursionGuard::new();
        guard.increment();
        guard.increment();
        guard.decrement();
        assert_eq!(guard.depth(), 1);
        guard.decrement();
        guard.decrement();
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn test_enter_reports_limit() {
        let mut guard = RecursionGuard::new();
        let result = (0..RecursionGuard::MAX_DEPTH).try_for_each(|_| guard.enter());
        assert_eq!(result, Err(StyleError::ResourceLimitExceeded { limit: 512 }));
    }
}
