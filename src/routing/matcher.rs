//! Route matching logic.
//!
//! # Responsibilities
//! - Match request method (exact)
//! - Match path exactly or by prefix (case-sensitive)
//! - Combine conditions with AND semantics

use crate::http::Method;

/// Trait for matching a request head against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, method: &Method, path: &str) -> bool;
}

/// Matches a single request method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: Method,
}

impl MethodMatcher {
    pub fn new(method: Method) -> Self {
        Self { method }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, method: &Method, _path: &str) -> bool {
        *method == self.method
    }
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, _method: &Method, path: &str) -> bool {
        path == self.path
    }
}

/// Matches the path prefix. The prefix itself matches too.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, _method: &Method, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, method: &Method, path: &str) -> bool {
        self.matchers.iter().all(|m| m.matches(method, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_path_matcher() {
        let matcher = ExactPathMatcher::new("/players");
        assert!(matcher.matches(&Method::Post, "/players"));
        assert!(!matcher.matches(&Method::Post, "/players/"));
        assert!(!matcher.matches(&Method::Post, "/Players"));
    }

    #[test]
    fn test_path_prefix_matcher() {
        let matcher = PathPrefixMatcher::new("/players");
        assert!(matcher.matches(&Method::Get, "/players"));
        assert!(matcher.matches(&Method::Get, "/players/7"));
        assert!(matcher.matches(&Method::Get, "/players?sort=name"));
        assert!(!matcher.matches(&Method::Get, "/api/players"));
    }

    #[test]
    fn test_and_matcher() {
        let matcher = AndMatcher::new(vec![
            Box::new(MethodMatcher::new(Method::Get)),
            Box::new(ExactPathMatcher::new("/")),
        ]);
        assert!(matcher.matches(&Method::Get, "/"));
        assert!(!matcher.matches(&Method::Post, "/"));
        assert!(!matcher.matches(&Method::Get, "/index.html"));
    }
}
