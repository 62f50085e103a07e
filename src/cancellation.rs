//! Resettable cancellation lifecycle.
//!
//! A [`ResettableCancellationScope`] owns exactly one live
//! [`CancellationToken`] at a time. Producers use it to interrupt delayed
//! send loops and the consumer bridge uses it to tie a receive session to
//! the transport, so that a session can be restarted without tearing down
//! the owning object.

use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors returned by cancellation scope operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// The scope was disposed and no longer hands out tokens.
    #[error("cancellation scope has already been disposed")]
    Disposed,
}

/// Result type for cancellation scope operations.
pub type ScopeResult<T> = Result<T, ScopeError>;

/// Owner of one current cancellation signal per logical session.
///
/// Dropping the scope cancels the current token.
///
/// # Examples
///
/// ```
/// use courier::cancellation::ResettableCancellationScope;
///
/// let scope = ResettableCancellationScope::new();
/// let first = scope.token().expect("scope is live");
/// let second = scope.reset().expect("scope is live");
/// assert!(first.is_cancelled());
/// assert!(!second.is_cancelled());
/// ```
#[derive(Debug, Default)]
pub struct ResettableCancellationScope {
    state: Mutex<ScopeState>,
}

#[derive(Debug, Default)]
struct ScopeState {
    current: CancellationToken,
    disposed: bool,
}

impl ScopeState {
    fn ensure_live(&self) -> ScopeResult<()> {
        if self.disposed {
            Err(ScopeError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl ResettableCancellationScope {
    /// Creates a scope with a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation leaves the state consistent, so a poisoned lock is
    // still safe to reuse.
    fn lock(&self) -> MutexGuard<'_, ScopeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a handle to the active token.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Disposed`] after [`Self::dispose`].
    pub fn token(&self) -> ScopeResult<CancellationToken> {
        let state = self.lock();
        state.ensure_live()?;
        Ok(state.current.clone())
    }

    /// Cancels the active token and installs a fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Disposed`] after [`Self::dispose`].
    pub fn reset(&self) -> ScopeResult<CancellationToken> {
        self.replace_with(CancellationToken::new())
    }

    /// Cancels the active token and installs a child of `parent`.
    ///
    /// The new token is cancelled either through this scope or when
    /// `parent` is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Disposed`] after [`Self::dispose`].
    pub fn reset_linked(&self, parent: &CancellationToken) -> ScopeResult<CancellationToken> {
        self.replace_with(parent.child_token())
    }

    fn replace_with(&self, fresh: CancellationToken) -> ScopeResult<CancellationToken> {
        let mut state = self.lock();
        state.ensure_live()?;
        let previous = std::mem::replace(&mut state.current, fresh);
        previous.cancel();
        Ok(state.current.clone())
    }

    /// Cancels the active token without replacing it.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Disposed`] after [`Self::dispose`].
    pub fn cancel(&self) -> ScopeResult<()> {
        let state = self.lock();
        state.ensure_live()?;
        state.current.cancel();
        Ok(())
    }

    /// Returns whether [`Self::dispose`] has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    /// Cancels the active token and retires the scope.
    ///
    /// Calling this more than once has no further effect.
    pub fn dispose(&self) {
        let mut state = self.lock();
        if state.disposed {
            return;
        }
        state.current.cancel();
        state.disposed = true;
    }
}

impl Drop for ResettableCancellationScope {
    fn drop(&mut self) {
        self.lock().current.cancel();
    }
}
