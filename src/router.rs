//! Matching of parsed requests against a static route table.
//!
//! A route is a method, a path template and a handler.  Templates are split into `/`
//! separated segments; a segment starting with `:` is a named parameter matching exactly one
//! non empty path segment, every other segment must match literally.
//!
//! | template         | path            | matches |
//! |------------------|-----------------|---------|
//! | `/users/:id`     | `/users/42`     | yes     |
//! | `/users/:id`     | `/users`        | no      |
//! | `/users/:id`     | `/users/`       | no      |
//! | `/users`         | `/users/42`     | no      |
//!
//! Routes are tried in table order and the first match wins; there is no backtracking.

use crate::ascii::{SLASH, equal_until};
use crate::request::Request;
use crate::response::{Response, StatusCode};

/// An entry in the route table
#[derive(Debug, Clone, Copy)]
pub struct Route<'r, H> {
    /// Method compared exactly against the request method, e.g. `GET`
    pub method: &'r str,
    /// Path template, e.g. `/users/:id`
    pub path: &'r str,
    /// Handler invoked for a matching request
    pub handler: H,
}

impl<'r, H> Route<'r, H> {
    /// Create a route.  Usable in `static` route tables.
    pub const fn new(method: &'r str, path: &'r str, handler: H) -> Self {
        Self {
            method,
            path,
            handler,
        }
    }

    /// True when this route accepts `req`
    pub fn matches(&self, req: &Request<'_>) -> bool {
        !req.failed() && self.method == req.method() && url_match(self.path, req.url())
    }
}

/// True when `path` fits `template`.  Both are walked segment by segment; the match fails at
/// the first literal segment that differs and when one side has segments left over.
///
/// ```
/// use restlite::router::url_match;
///
/// assert!(url_match("/users/:id", "/users/42"));
/// assert!(!url_match("/users/:id", "/users"));
/// assert!(!url_match("/users", "/users/42"));
/// ```
pub fn url_match(template: &str, path: &str) -> bool {
    let mut template = template.split('/');
    let mut path = path.split('/');

    loop {
        match (template.next(), path.next()) {
            (Some(t), Some(p)) => {
                let wildcard = t.starts_with(':') && !p.is_empty();
                if !wildcard && !equal_until(t, p, SLASH) {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Linear first match router over a borrowed route table
#[derive(Debug, Clone, Copy)]
pub struct Router<'r, H> {
    routes: &'r [Route<'r, H>],
}

impl<'r, H> Router<'r, H> {
    /// Create a router over `routes`
    pub const fn new(routes: &'r [Route<'r, H>]) -> Self {
        Self { routes }
    }

    /// Find the first route accepting `req`.  On a match the response status becomes
    /// `200 OK` and the request remembers the route's template so
    /// [`Request::parameter`] can resolve named segments.  Without a match neither is
    /// touched.
    pub fn route<'a, const N: usize>(
        &self,
        req: &mut Request<'a>,
        resp: &mut Response<'_, N>,
    ) -> Option<&'r Route<'r, H>>
    where
        'r: 'a,
    {
        let route = self.routes.iter().find(|route| route.matches(req))?;

        resp.set_status(StatusCode::OK);
        req.set_matched_route(route.path);

        Some(route)
    }
}
