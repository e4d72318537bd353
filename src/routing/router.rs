//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the ordered route table
//! - Look up the endpoint for a (method, path) pair
//! - Return an explicit NotFound rather than a silent default

use super::matcher::{AndMatcher, ExactPathMatcher, Matcher, MethodMatcher, PathPrefixMatcher};
use crate::http::Method;

/// What a request is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    StaticPage,
    ListPlayers,
    CreatePlayer,
    NotFound,
}

impl Endpoint {
    /// Label used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::StaticPage => "static_page",
            Endpoint::ListPlayers => "list_players",
            Endpoint::CreatePlayer => "create_player",
            Endpoint::NotFound => "not_found",
        }
    }
}

/// A compiled route entry.
#[derive(Debug)]
pub struct Route {
    pub matcher: AndMatcher,
    pub endpoint: Endpoint,
}

impl Route {
    pub fn new(matcher: AndMatcher, endpoint: Endpoint) -> Self {
        Self { matcher, endpoint }
    }
}

/// Ordered route table. First match wins.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The player server's table:
    ///
    /// | method | path               | endpoint     |
    /// |--------|--------------------|--------------|
    /// | GET    | `/` exactly        | StaticPage   |
    /// | GET    | prefix `/players`  | ListPlayers  |
    /// | POST   | `/players` exactly | CreatePlayer |
    pub fn players() -> Self {
        Self::new(vec![
            Route::new(
                AndMatcher::new(vec![
                    Box::new(MethodMatcher::new(Method::Get)),
                    Box::new(ExactPathMatcher::new("/")),
                ]),
                Endpoint::StaticPage,
            ),
            Route::new(
                AndMatcher::new(vec![
                    Box::new(MethodMatcher::new(Method::Get)),
                    Box::new(PathPrefixMatcher::new("/players")),
                ]),
                Endpoint::ListPlayers,
            ),
            Route::new(
                AndMatcher::new(vec![
                    Box::new(MethodMatcher::new(Method::Post)),
                    Box::new(ExactPathMatcher::new("/players")),
                ]),
                Endpoint::CreatePlayer,
            ),
        ])
    }

    pub fn lookup(&self, method: &Method, path: &str) -> Endpoint {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(method, path))
            .map(|route| route.endpoint)
            .unwrap_or(Endpoint::NotFound)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::players()
    }
}
