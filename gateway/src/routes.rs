//! Prefix routing table
//!
//! Built once from [`Config`]. A route matches a path when the path
//! equals its prefix or continues it at a `/` boundary, so `/api/menu`
//! matches `/api/menu/42` but never `/api/menux`. The longest matching
//! prefix wins.

use std::fmt;

use http::Uri;

use crate::config::Config;

/// Logical upstream service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    Menu,
    Order,
    Reservation,
    Contact,
}

impl Upstream {
    pub const fn name(&self) -> &'static str {
        match self {
            Upstream::Menu => "menu-service",
            Upstream::Order => "order-service",
            Upstream::Reservation => "reservation-service",
            Upstream::Contact => "contact-service",
        }
    }

    fn base_url<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            Upstream::Menu => &config.menu_service_url,
            Upstream::Order => &config.order_service_url,
            Upstream::Reservation => &config.reservation_service_url,
            Upstream::Contact => &config.contact_service_url,
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One prefix → upstream mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub prefix: String,
    /// Replaces `prefix` in the forwarded path
    pub rewrite: String,
    pub upstream: Upstream,
    /// Base URL without a trailing slash
    pub base_url: String,
}

impl Route {
    pub fn new(prefix: &str, rewrite: &str, upstream: Upstream, base_url: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            rewrite: rewrite.to_string(),
            upstream,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Remainder of `path` after the prefix, when it matches on a
    /// segment boundary
    fn strip<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }
}

/// Where a request goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub route: &'a Route,
    /// Absolute upstream URL including the query string
    pub url: String,
}

/// Ordered set of routes, longest prefix first
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(mut routes: Vec<Route>) -> Self {
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { routes }
    }

    /// The platform's routes with identity rewrites
    pub fn from_config(config: &Config) -> Self {
        let entries = [
            ("/uploads", Upstream::Menu),
            ("/api/menu", Upstream::Menu),
            ("/api/orders", Upstream::Order),
            ("/api/reservation", Upstream::Reservation),
            ("/api/contact", Upstream::Contact),
        ];
        Self::new(
            entries
                .into_iter()
                .map(|(prefix, upstream)| {
                    Route::new(prefix, prefix, upstream, upstream.base_url(config))
                })
                .collect(),
        )
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Match `uri` and build the upstream URL, keeping the query string
    pub fn resolve(&self, uri: &Uri) -> Option<ResolvedRoute<'_>> {
        let path = uri.path();
        self.routes.iter().find_map(|route| {
            let rest = route.strip(path)?;
            let mut forwarded = format!("{}{}", route.rewrite, rest);
            if forwarded.is_empty() {
                forwarded.push('/');
            }
            let url = match uri.query() {
                Some(query) => format!("{}{}?{}", route.base_url, forwarded, query),
                None => format!("{}{}", route.base_url, forwarded),
            };
            Some(ResolvedRoute { route, url })
        })
    }
}
