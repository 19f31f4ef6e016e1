//! Route resolution and the process-wide router.
//!
//! # Responsibilities
//! - Bind the route table to a history mode
//! - Resolve navigation targets (by path or by name) to routes
//! - Hold the single router installed at startup
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Path resolution falls back to the catch-all; no catch-all is an explicit NoMatch
//! - Named resolution re-matches the built path so params come back normalized

use std::sync::{Arc, OnceLock};

use serde::Serialize;
use thiserror::Error;

use crate::routing::history::{HistoryMode, Location, Query};
use crate::routing::pattern::{BuildError, MatchOptions, ParamValue, Params};
use crate::routing::route::{Route, View};
use crate::routing::table::{RouteTable, TableError};

static GLOBAL: OnceLock<Arc<Router>> = OnceLock::new();

/// Error raised when a navigation target cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no route named `{0}`")]
    UnknownRoute(String),
    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: String, param: String },
    #[error("route `{route}` takes a single value for parameter `{param}`")]
    RepeatedParam { route: String, param: String },
    #[error("no route matches `{0}`")]
    NoMatch(String),
    #[error("already at `{0}`")]
    Duplicated(String),
    #[error("a global router is already installed")]
    AlreadyInstalled,
}

/// Router construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterOptions {
    pub history: HistoryMode,
    pub matching: MatchOptions,
}

/// Where to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A literal path, optionally with query and fragment.
    Path(String),
    /// A route name with parameters.
    Named {
        name: String,
        params: Params,
        query: Query,
        hash: String,
    },
}

impl NavigationTarget {
    /// Target a literal path.
    pub fn path(path: impl Into<String>) -> Self {
        NavigationTarget::Path(path.into())
    }

    /// Target a route by name, with no parameters yet.
    pub fn named(name: impl Into<String>) -> Self {
        NavigationTarget::Named {
            name: name.into(),
            params: Params::new(),
            query: Vec::new(),
            hash: String::new(),
        }
    }

    /// Add a parameter to a named target. No-op for path targets.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        if let NavigationTarget::Named { params, .. } = &mut self {
            params.insert(key.into(), value.into());
        }
        self
    }

    /// Add a query pair to a named target. No-op for path targets.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let NavigationTarget::Named { query, .. } = &mut self {
            query.push((key.into(), Some(value.into())));
        }
        self
    }

    /// Add a bare query key (`?flag`) to a named target. No-op for path targets.
    pub fn with_query_flag(mut self, key: impl Into<String>) -> Self {
        if let NavigationTarget::Named { query, .. } = &mut self {
            query.push((key.into(), None));
        }
        self
    }

    /// Set the fragment of a named target. No-op for path targets.
    pub fn with_hash(mut self, fragment: &str) -> Self {
        if let NavigationTarget::Named { hash, .. } = &mut self {
            *hash = if fragment.is_empty() || fragment.starts_with('#') {
                fragment.to_string()
            } else {
                format!("#{}", fragment)
            };
        }
        self
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        NavigationTarget::Path(path.to_string())
    }
}

/// Outcome of resolving a navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub name: String,
    pub path: String,
    pub full_path: String,
    pub view: View,
    pub params: Params,
    pub query: Query,
    pub hash: String,
    pub href: String,
    /// True when only the catch-all matched.
    pub catch_all: bool,
}

/// Route table bound to a history mode.
#[derive(Debug, Clone)]
pub struct Router {
    options: RouterOptions,
    table: RouteTable,
}

impl Router {
    /// Bind `table` to the given history and matching options.
    pub fn new(options: RouterOptions, table: RouteTable) -> Self {
        tracing::debug!(
            routes = table.len(),
            base = %options.history.base(),
            hash_mode = options.history.is_hash(),
            "Router created"
        );
        Self { options, table }
    }

    /// Router over the portal's route table.
    pub fn portal(options: RouterOptions) -> Result<Self, TableError> {
        Ok(Self::new(options, RouteTable::portal()?))
    }

    /// The route table this router resolves against.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// History mode used to build hrefs.
    pub fn history(&self) -> &HistoryMode {
        &self.options.history
    }

    /// Options the router was built with.
    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Resolve a navigation target to a route.
    pub fn resolve(&self, target: &NavigationTarget) -> Result<ResolvedRoute, NavigationError> {
        match target {
            NavigationTarget::Path(path) => self.resolve_path(path),
            NavigationTarget::Named {
                name,
                params,
                query,
                hash,
            } => self.resolve_named(name, params, query.clone(), hash.clone()),
        }
    }

    /// Resolve a router-internal path such as `/login/promo?x=1#top`.
    pub fn resolve_path(&self, full_path: &str) -> Result<ResolvedRoute, NavigationError> {
        let location = Location::parse(full_path);
        let (route, params) = self
            .table
            .match_path(&location.path, &self.options.matching)
            .ok_or_else(|| NavigationError::NoMatch(location.path.clone()))?;

        if route.is_catch_all() {
            tracing::debug!(path = %location.path, route = %route.name, "Falling back to catch-all");
        }
        Ok(self.finish(route, params, location))
    }

    /// Resolve a route by name, filling in its parameters.
    pub fn resolve_named(
        &self,
        name: &str,
        params: &Params,
        query: Query,
        hash: String,
    ) -> Result<ResolvedRoute, NavigationError> {
        let route = self
            .table
            .get(name)
            .ok_or_else(|| NavigationError::UnknownRoute(name.to_string()))?;

        let path = route.path.build(params).map_err(|e| match e {
            BuildError::MissingParam(param) => NavigationError::MissingParam {
                route: route.name.clone(),
                param,
            },
            BuildError::RepeatedParam(param) => NavigationError::RepeatedParam {
                route: route.name.clone(),
                param,
            },
        })?;

        let params = route
            .path
            .matches(&path, &self.options.matching)
            .unwrap_or_else(|| params.clone());
        let location = Location { path, query, hash };
        Ok(self.finish(route, params, location))
    }

    /// URL a link to `target` should carry.
    pub fn href(&self, target: &NavigationTarget) -> Result<String, NavigationError> {
        self.resolve(target).map(|resolved| resolved.href)
    }

    fn finish(&self, route: &Route, params: Params, location: Location) -> ResolvedRoute {
        let full_path = location.full_path();
        ResolvedRoute {
            name: route.name.clone(),
            href: self.options.history.href(&full_path),
            full_path,
            path: location.path,
            view: route.view,
            params,
            query: location.query,
            hash: location.hash,
            catch_all: route.is_catch_all(),
        }
    }
}

/// Install the process-wide router. Only the first call succeeds.
pub fn install(router: Router) -> Result<Arc<Router>, NavigationError> {
    let router = Arc::new(router);
    GLOBAL
        .set(router.clone())
        .map_err(|_| NavigationError::AlreadyInstalled)?;
    tracing::info!(routes = router.table().len(), "Global router installed");
    Ok(router)
}

/// The router installed at startup, if any.
pub fn global() -> Option<Arc<Router>> {
    GLOBAL.get().cloned()
}
