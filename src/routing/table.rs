//! Route table
//!
//! Built once at startup and shared read-only with every connection.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::matcher::match_subtree;
use crate::config::RouteConfig;
use crate::error::ServerError;
use crate::handler::{self, Handler};
use crate::logger;

/// Outcome of a route lookup
#[derive(Debug)]
pub enum RouteMatch<'a> {
    /// A registration matched; `pattern` is the registered path
    Found {
        pattern: &'a str,
        handler: &'a dyn Handler,
    },
    /// Only the subtree `location` is registered; redirect to it
    Redirect { location: String },
    NotFound,
}

/// Immutable mapping from registered paths to handlers
pub struct RouteTable {
    exact: HashMap<String, Arc<dyn Handler>>,
    /// Registrations ending in `/`, longest first
    subtrees: Vec<(String, Arc<dyn Handler>)>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Build the table from configured registrations, in order
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, ServerError> {
        routes
            .iter()
            .try_fold(Self::builder(), |builder, route| {
                builder.route(&route.path, handler::from_config(&route.handler))
            })
            .map(RouteTableBuilder::build)
    }

    /// Find the handler for `path`
    ///
    /// Precedence: exact registration, then the trailing-slash redirect,
    /// then the longest matching subtree.
    pub fn lookup(&self, path: &str) -> RouteMatch<'_> {
        if let Some((pattern, handler)) = self.exact.get_key_value(path) {
            return RouteMatch::Found {
                pattern,
                handler: handler.as_ref(),
            };
        }

        if !path.ends_with('/') {
            let with_slash = format!("{path}/");
            if self.exact.contains_key(&with_slash) {
                return RouteMatch::Redirect {
                    location: with_slash,
                };
            }
        }

        self.subtrees
            .iter()
            .find(|(pattern, _)| match_subtree(pattern, path))
            .map_or(RouteMatch::NotFound, |(pattern, handler)| RouteMatch::Found {
                pattern,
                handler: handler.as_ref(),
            })
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&String> = self.exact.keys().collect();
        paths.sort();
        f.debug_struct("RouteTable").field("paths", &paths).finish()
    }
}

/// Collects registrations; a later registration for the same path wins
#[derive(Default)]
pub struct RouteTableBuilder {
    routes: HashMap<String, Arc<dyn Handler>>,
}

impl RouteTableBuilder {
    pub fn route(mut self, path: &str, handler: Arc<dyn Handler>) -> Result<Self, ServerError> {
        if !path.starts_with('/') {
            return Err(ServerError::InvalidRoute {
                path: path.to_string(),
            });
        }
        if self.routes.insert(path.to_string(), handler).is_some() {
            logger::log_warning(&format!(
                "Route {path} registered more than once, keeping the last registration"
            ));
        }
        Ok(self)
    }

    pub fn build(self) -> RouteTable {
        let mut subtrees: Vec<(String, Arc<dyn Handler>)> = self
            .routes
            .iter()
            .filter(|(path, _)| path.ends_with('/'))
            .map(|(path, handler)| (path.clone(), Arc::clone(handler)))
            .collect();
        subtrees.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));

        RouteTable {
            exact: self.routes,
            subtrees,
        }
    }
}
