//! The ordered route table.
//!
//! # Responsibilities
//! - Hold routes in declaration order
//! - Enforce table invariants at construction
//! - Look up the first route matching a path
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - First match wins; the catch-all is only reachable last
//! - O(n) scan (the portal table has fifteen entries)

use std::collections::HashSet;

use thiserror::Error;

use crate::routing::pattern::{MatchOptions, Params, PatternError};
use crate::routing::route::{Route, View};

/// Error raised when a route table violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("route name `{0}` is declared more than once")]
    DuplicateName(String),
    #[error("catch-all route `{0}` must be the last entry")]
    CatchAllNotLast(String),
}

/// Portal routes in declaration order: (path, name, view).
pub const PORTAL_ROUTES: &[(&str, &str, View)] = &[
    ("/", "home", View::Home),
    ("/about", "about", View::About),
    ("/courses", "courses", View::Courses),
    ("/schedule", "schedule", View::Schedule),
    ("/progress", "progress", View::Progress),
    ("/login", "login", View::Login),
    ("/login/:tag", "logintag", View::Login),
    ("/signup", "signup", View::Signup),
    ("/myaccount", "myaccount", View::MyAccount),
    ("/dashboard", "dashboard", View::Dashboard),
    ("/changepassword", "changepassword", View::ChangePassword),
    ("/admin-dashboard", "admindashboard", View::AdminDashboard),
    ("/instructor-dashboard", "instructordashboard", View::InstructorDashboard),
    ("/registration-confirm", "registration-confirm", View::RegistrationConfirm),
    ("/:catchAll(.*)*", "NotFound", View::NotFound),
];

/// Validated, ordered collection of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, checking name uniqueness and catch-all placement.
    pub fn new(routes: Vec<Route>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(routes.len());
        for (index, route) in routes.iter().enumerate() {
            if !seen.insert(route.name.as_str()) {
                return Err(TableError::DuplicateName(route.name.clone()));
            }
            if route.is_catch_all() && index + 1 != routes.len() {
                return Err(TableError::CatchAllNotLast(route.name.clone()));
            }
        }

        Ok(Self { routes })
    }

    /// Build a table from `(path, name, view)` definitions.
    pub fn from_definitions(definitions: &[(&str, &str, View)]) -> Result<Self, TableError> {
        let routes = definitions
            .iter()
            .map(|(path, name, view)| Route::new(path, *name, *view))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(routes)
    }

    /// The portal's route table.
    pub fn portal() -> Result<Self, TableError> {
        Self::from_definitions(PORTAL_ROUTES)
    }

    /// Routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when the table declares no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.name.as_str())
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// The catch-all route, if the table declares one.
    pub fn catch_all(&self) -> Option<&Route> {
        self.routes.last().filter(|r| r.is_catch_all())
    }

    /// Find the first route matching `path`.
    pub fn match_path(&self, path: &str, options: &MatchOptions) -> Option<(&Route, Params)> {
        self.routes
            .iter()
            .find_map(|route| route.path.matches(path, options).map(|params| (route, params)))
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
