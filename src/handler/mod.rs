//! Request handler module
//!
//! Every route resolves to a [`Handler`]: one method taking the parsed
//! request and returning the response. The dispatch entry point lives in
//! [`router`].

mod greeting;
mod params;
pub mod router;
mod sum;

use std::fmt;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

use crate::config::RouteHandler;
use crate::http::{self, QueryParams};

pub use greeting::{Greeting, Literal, NameGreeting};
pub use params::ParamDump;
pub use router::handle_request;
pub use sum::Sum;

/// Parsed request handed to a handler
#[derive(Debug)]
pub struct RequestContext<'a> {
    pub query: QueryParams,
    pub is_head: bool,
    /// Content type for text responses
    pub content_type: &'a str,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &Method, query: Option<&str>, content_type: &'a str) -> Self {
        Self {
            query: QueryParams::parse(query),
            is_head: *method == Method::HEAD,
            content_type,
        }
    }

    /// 200 response carrying `body`
    pub fn text(&self, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
        http::build_text_response(body, self.content_type, self.is_head)
    }
}

/// A request handler
pub trait Handler: Send + Sync + fmt::Debug {
    fn handle(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>>;
}

/// Build the handler a route registration names
pub fn from_config(handler: &RouteHandler) -> Arc<dyn Handler> {
    match handler {
        RouteHandler::Greeting => Arc::new(Greeting),
        RouteHandler::NameGreeting => Arc::new(NameGreeting),
        RouteHandler::Params => Arc::new(ParamDump),
        RouteHandler::Sum => Arc::new(Sum),
        RouteHandler::Literal { body } => Arc::new(Literal::new(body.clone())),
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use http_body_util::BodyExt;

    pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

    /// Run `handler` for a GET of `path_and_query` and return the body
    pub async fn get_body(handler: &dyn Handler, path_and_query: &str) -> String {
        let query = path_and_query.split_once('?').map(|(_, q)| q);
        let ctx = RequestContext::new(&Method::GET, query, TEXT_PLAIN);
        body_string(handler.handle(&ctx)).await
    }

    pub async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}
