//! Fixed-text handlers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::{Handler, RequestContext};

/// Answers "Hello World"
#[derive(Debug, Clone, Copy, Default)]
pub struct Greeting;

impl Handler for Greeting {
    fn handle(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
        ctx.text("Hello World")
    }
}

/// Answers "Hello " followed by the `name` query parameter
#[derive(Debug, Clone, Copy, Default)]
pub struct NameGreeting;

impl Handler for NameGreeting {
    fn handle(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
        let name = ctx.query.get("name").unwrap_or_default();
        ctx.text(format!("Hello {name}"))
    }
}

/// Answers a body fixed at registration time
#[derive(Debug, Clone)]
pub struct Literal {
    body: Bytes,
}

impl Literal {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }
}

impl Handler for Literal {
    fn handle(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
        ctx.text(self.body.clone())
    }
}
