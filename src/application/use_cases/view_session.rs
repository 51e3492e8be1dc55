// ============================================================
// VIEW SESSION
// ============================================================
// Last-request-wins bookkeeping for views that load asynchronously

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};

/// Issued when a view starts loading; presented again to commit the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    view: String,
    generation: u64,
}

impl RequestToken {
    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Generation counter per view key. Only the most recently issued token
/// of a view can commit; older ones are stale.
#[derive(Debug, Default)]
pub struct ViewSession {
    generations: Mutex<HashMap<String, u64>>,
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn generations(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        // counters stay consistent even if a holder panicked
        self.generations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a request for `view`, superseding any in-flight one
    pub fn begin(&self, view: &str) -> RequestToken {
        let mut generations = self.generations();
        let generation = generations.entry(view.to_string()).or_insert(0);
        *generation += 1;

        debug!(view, generation = *generation, "View request started");
        RequestToken {
            view: view.to_string(),
            generation: *generation,
        }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.generations().get(&token.view) == Some(&token.generation)
    }

    /// Hand back `result` if `token` is still the latest request of its
    /// view, otherwise `AppError::Stale`. Errors of a stale request are
    /// replaced by `Stale` as well.
    pub fn commit<T>(&self, token: &RequestToken, result: Result<T>) -> Result<T> {
        if self.is_current(token) {
            return result;
        }

        let latest = self.generations().get(&token.view).copied().unwrap_or(0);
        warn!(
            view = %token.view,
            generation = token.generation,
            latest,
            "Discarding stale view result"
        );
        Err(AppError::Stale(format!(
            "{} request #{} superseded by #{}",
            token.view, token.generation, latest
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_request_commits() {
        let session = ViewSession::new();
        let token = session.begin("viewer");

        assert_eq!(token.generation(), 1);
        assert_eq!(session.commit(&token, Ok(42)), Ok(42));
    }

    #[test]
    fn test_superseded_request_is_stale() {
        let session = ViewSession::new();
        let first = session.begin("viewer");
        let second = session.begin("viewer");

        let stale = session.commit(&first, Ok("campagnes"));
        assert!(stale.unwrap_err().is_stale());
        assert_eq!(session.commit(&second, Ok("appareils")), Ok("appareils"));
    }

    #[test]
    fn test_stale_error_is_replaced() {
        let session = ViewSession::new();
        let first = session.begin("viewer");
        session.begin("viewer");

        let result: Result<()> = session.commit(&first, Err(AppError::NotFound("/x.csv".into())));
        assert!(result.unwrap_err().is_stale());
    }

    #[test]
    fn test_views_are_independent() {
        let session = ViewSession::new();
        let left = session.begin("left");
        session.begin("right");
        session.begin("right");

        assert!(session.is_current(&left));
        assert_eq!(left.view(), "left");
    }
}
