//! Session history: the active route and where navigation can go from it.

use std::sync::Arc;

use crate::routing::router::{NavigationError, NavigationTarget, ResolvedRoute, Router};

/// Navigation session over a shared router.
///
/// The router stays immutable; only the entry list and position change.
#[derive(Debug)]
pub struct Navigator {
    router: Arc<Router>,
    entries: Vec<ResolvedRoute>,
    position: usize,
}

impl Navigator {
    /// Start a session at `initial` (a router-internal path).
    pub fn new(router: Arc<Router>, initial: &str) -> Result<Self, NavigationError> {
        let first = router.resolve_path(initial)?;
        Ok(Self {
            router,
            entries: vec![first],
            position: 0,
        })
    }

    /// The shared router this session resolves against.
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// The active route.
    pub fn current(&self) -> &ResolvedRoute {
        &self.entries[self.position]
    }

    /// Number of entries in the session history.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a session starts with one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when an earlier entry exists.
    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    /// True when a later entry exists.
    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    /// Navigate to `target`, discarding any forward entries.
    pub fn push(&mut self, target: &NavigationTarget) -> Result<&ResolvedRoute, NavigationError> {
        let to = self.prepare(target)?;
        tracing::debug!(from = %self.current().full_path, to = %to.full_path, "push");

        self.entries.truncate(self.position + 1);
        self.entries.push(to);
        self.position += 1;
        Ok(self.current())
    }

    /// Navigate to `target` in place of the active entry.
    pub fn replace(&mut self, target: &NavigationTarget) -> Result<&ResolvedRoute, NavigationError> {
        let to = self.prepare(target)?;
        tracing::debug!(from = %self.current().full_path, to = %to.full_path, "replace");

        self.entries[self.position] = to;
        Ok(self.current())
    }

    /// Move `delta` entries through history; `None` when out of range.
    pub fn go(&mut self, delta: isize) -> Option<&ResolvedRoute> {
        let target = self.position.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.position = target;
        Some(self.current())
    }

    /// Step one entry back.
    pub fn back(&mut self) -> Option<&ResolvedRoute> {
        self.go(-1)
    }

    /// Step one entry forward.
    pub fn forward(&mut self) -> Option<&ResolvedRoute> {
        self.go(1)
    }

    fn prepare(&self, target: &NavigationTarget) -> Result<ResolvedRoute, NavigationError> {
        let to = self.router.resolve(target)?;
        if to.full_path == self.current().full_path {
            return Err(NavigationError::Duplicated(to.full_path));
        }
        Ok(to)
    }
}
