//! Client-side route table and the navigation seam.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::resource::ResourceKind;

/// Every screen the console can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Departments,
    Employees,
    Courses,
    Students,
    Login,
}

impl Route {
    /// Screen shown after a successful login.
    pub const DEFAULT: Self = Self::Departments;

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Departments => "/departments",
            Self::Employees => "/employees",
            Self::Courses => "/courses",
            Self::Students => "/students",
            Self::Login => "/login",
        }
    }

    /// The resource a route lists, or `None` for the login screen.
    #[must_use]
    pub const fn resource(self) -> Option<ResourceKind> {
        match self {
            Self::Departments => Some(ResourceKind::Departments),
            Self::Employees => Some(ResourceKind::Employees),
            Self::Courses => Some(ResourceKind::Courses),
            Self::Students => Some(ResourceKind::Students),
            Self::Login => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.trim_matches('/').eq_ignore_ascii_case("login") {
            return Ok(Self::Login);
        }
        trimmed
            .parse::<ResourceKind>()
            .map(ResourceKind::route)
            .map_err(|_| CoreError::UnknownRoute(trimmed.to_string()))
    }
}

/// Moves the whole application to another route.
///
/// Resource clients call this with [`Route::Login`] when the API answers 403;
/// the login screen calls it with [`Route::DEFAULT`] after authenticating.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/departments", Route::Departments)]
    #[case("employees", Route::Employees)]
    #[case("/courses/", Route::Courses)]
    #[case("/students", Route::Students)]
    #[case("/login", Route::Login)]
    #[case("LOGIN", Route::Login)]
    fn parses_paths(#[case] input: &str, #[case] expected: Route) {
        assert_eq!(input.parse::<Route>().unwrap(), expected);
    }

    #[test]
    fn path_roundtrips_through_parse() {
        for route in [
            Route::Departments,
            Route::Employees,
            Route::Courses,
            Route::Students,
            Route::Login,
        ] {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn unknown_path_is_rejected() {
        assert!(matches!(
            "/reports".parse::<Route>(),
            Err(CoreError::UnknownRoute(path)) if path == "/reports"
        ));
    }

    #[test]
    fn login_has_no_resource() {
        assert!(Route::Login.resource().is_none());
        assert_eq!(Route::DEFAULT.resource(), Some(ResourceKind::Departments));
    }
}
