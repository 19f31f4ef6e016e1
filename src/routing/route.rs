//! Route records and the page views they point at.

use std::fmt;

use serde::Serialize;

use crate::routing::pattern::{PathPattern, PatternError};

/// Page views of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Home,
    About,
    Courses,
    Schedule,
    Progress,
    Login,
    Signup,
    MyAccount,
    Dashboard,
    ChangePassword,
    AdminDashboard,
    InstructorDashboard,
    RegistrationConfirm,
    NotFound,
}

impl View {
    /// Name of the component that renders this view.
    pub fn component_name(&self) -> &'static str {
        match self {
            View::Home => "HomeView",
            View::About => "AboutView",
            View::Courses => "CoursesView",
            View::Schedule => "ScheduleView",
            View::Progress => "ProgressView",
            View::Login => "LoginView",
            View::Signup => "SignupView",
            View::MyAccount => "MyAccountView",
            View::Dashboard => "DashboardView",
            View::ChangePassword => "ChangePasswordView",
            View::AdminDashboard => "AdminDashboardView",
            View::InstructorDashboard => "InstructorDashboardView",
            View::RegistrationConfirm => "RegistrationConfirmView",
            View::NotFound => "NotFoundView",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

/// A binding from a path pattern to a named view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Unique identifier used for programmatic navigation.
    pub name: String,

    /// Path pattern this route answers to.
    pub path: PathPattern,

    /// View rendered when the route is active.
    pub view: View,
}

impl Route {
    /// Create a route, compiling its path pattern.
    pub fn new(path: &str, name: impl Into<String>, view: View) -> Result<Self, PatternError> {
        Ok(Self {
            name: name.into(),
            path: PathPattern::parse(path)?,
            view,
        })
    }

    /// True for the catch-all route.
    pub fn is_catch_all(&self) -> bool {
        self.path.is_catch_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_serializes_pattern_as_string() {
        let route = Route::new("/login/:tag", "logintag", View::Login).unwrap();
        let json = serde_json::to_value(&route).unwrap();

        assert_eq!(json["name"], "logintag");
        assert_eq!(json["path"], "/login/:tag");
        assert_eq!(json["view"], "Login");
    }

    #[test]
    fn test_component_name() {
        assert_eq!(View::MyAccount.component_name(), "MyAccountView");
        assert_eq!(View::NotFound.to_string(), "NotFoundView");
    }
}
