//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! canonicalisation, route lookup and dispatch, access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response};

use super::RequestContext;
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{clean_path, RouteMatch};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (response, route) = dispatch_with_route(&req, &state);

    if state.config.logging.access_log {
        let mut entry = access_log_entry(&req, &response, peer_addr, started);
        entry.route = route.map(ToString::to_string);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce the response for `req` and the registered path that served it
fn dispatch_with_route<'s, B>(
    req: &Request<B>,
    state: &'s AppState,
) -> (Response<Full<Bytes>>, Option<&'s str>) {
    let (mut response, route) = route_request(req, state);
    set_server_header(&mut response, &state.config.http.server_name);
    (response, route)
}

fn route_request<'s, B>(
    req: &Request<B>,
    state: &'s AppState,
) -> (Response<Full<Bytes>>, Option<&'s str>) {
    let method = req.method();
    if let Some(resp) = check_http_method(method) {
        return (resp, None);
    }

    let uri = req.uri();
    let path = uri.path();

    let cleaned = clean_path(path);
    if cleaned != path {
        return (
            http::build_moved_response(&with_query(&cleaned, uri.query())),
            None,
        );
    }

    match state.routes.lookup(path) {
        RouteMatch::Found { pattern, handler } => {
            let ctx = RequestContext::new(
                method,
                uri.query(),
                &state.config.http.default_content_type,
            );
            (handler.handle(&ctx), Some(pattern))
        }
        RouteMatch::Redirect { location } => (
            http::build_moved_response(&with_query(&location, uri.query())),
            None,
        ),
        RouteMatch::NotFound => (http::build_404_response(), None),
    }
}

/// Return a response for anything other than GET/HEAD
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path.to_string(),
    }
}

fn set_server_header(response: &mut Response<Full<Bytes>>, server_name: &str) {
    if server_name.is_empty() {
        return;
    }
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => logger::log_warning(&format!("Invalid server_name '{server_name}': {e}")),
    }
}

fn access_log_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or_default();
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, RouteConfig, RouteHandler};
    use crate::handler::test_util::body_string;
    use hyper::StatusCode;

    fn state_with(routes: Vec<RouteConfig>) -> AppState {
        let mut config = Config::load_from("does-not-exist/hello_web").unwrap();
        config.routes = routes;
        AppState::new(config).unwrap()
    }

    fn default_state() -> AppState {
        let config = Config::load_from("does-not-exist/hello_web").unwrap();
        AppState::new(config).unwrap()
    }

    fn dispatch<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
        dispatch_with_route(req, state).0
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    async fn get(state: &AppState, uri: &str) -> (StatusCode, String) {
        let resp = dispatch(&request(Method::GET, uri), state);
        (resp.status(), body_string(resp).await)
    }

    #[tokio::test]
    async fn test_static_greeting() {
        let state = state_with(vec![RouteConfig::new("/", RouteHandler::Greeting)]);
        assert_eq!(get(&state, "/").await, (StatusCode::OK, "Hello World".to_string()));
    }

    #[tokio::test]
    async fn test_default_routes() {
        let state = default_state();
        assert_eq!(get(&state, "/").await.1, "Hello World");
        assert_eq!(get(&state, "/hello?name=X").await.1, "Hello X");
        assert_eq!(get(&state, "/hello").await.1, "Hello ");
        assert_eq!(get(&state, "/sum?a=3&b=4").await.1, "7");
        assert_eq!(get(&state, "/sum?a=foo").await.1, "0");

        let params = get(&state, "/params?x=1&y=2").await.1;
        assert!(params.lines().any(|l| l == "x:1"));
        assert!(params.lines().any(|l| l == "y:2"));
    }

    #[tokio::test]
    async fn test_exact_path_precedence() {
        let state = default_state();
        assert_eq!(get(&state, "/sum/hello").await.1, "Hello");
        assert_eq!(get(&state, "/sum?a=1&b=2").await.1, "3");
        assert_eq!(get(&state, "/sum/").await.1, "sum");
        assert_eq!(get(&state, "/sum/anything").await.1, "sum");
    }

    #[tokio::test]
    async fn test_root_catches_unregistered_paths() {
        let state = default_state();
        assert_eq!(get(&state, "/nope").await, (StatusCode::OK, "Hello World".to_string()));
    }

    #[tokio::test]
    async fn test_not_found() {
        let state = state_with(vec![RouteConfig::new("/hello", RouteHandler::NameGreeting)]);
        let (status, body) = get(&state, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "404 page not found");
    }

    #[test]
    fn test_trailing_slash_redirect_keeps_query() {
        let state = state_with(vec![RouteConfig::new(
            "/docs/",
            RouteHandler::Literal {
                body: "docs".to_string(),
            },
        )]);
        let resp = dispatch(&request(Method::GET, "/docs?page=2"), &state);
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/docs/?page=2");
    }

    #[test]
    fn test_unclean_path_redirect() {
        let state = default_state();
        let resp = dispatch(&request(Method::GET, "/sum/../hello?name=x"), &state);
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/hello?name=x");

        let resp = dispatch(&request(Method::GET, "//sum"), &state);
        assert_eq!(resp.headers()["location"], "/sum");
    }

    #[test]
    fn test_method_not_allowed() {
        let state = default_state();
        let resp = dispatch(&request(Method::POST, "/sum?a=1"), &state);
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_options() {
        let state = default_state();
        let resp = dispatch(&request(Method::OPTIONS, "/"), &state);
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_head_has_length_but_no_body() {
        let state = default_state();
        let resp = dispatch(&request(Method::HEAD, "/"), &state);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-length"], "11");
        assert_eq!(body_string(resp).await, "");
    }

    #[test]
    fn test_response_headers() {
        let state = default_state();
        let resp = dispatch(&request(Method::GET, "/"), &state);
        assert_eq!(resp.headers()["server"], "hello_web/0.1");
        assert_eq!(resp.headers()["content-type"], "text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn test_handle_request_is_infallible() {
        let state = Arc::new(default_state());
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        let resp = handle_request(request(Method::GET, "/sum?a=2&b=2"), state, peer)
            .await
            .unwrap();
        assert_eq!(body_string(resp).await, "4");
    }

    #[test]
    fn test_access_log_entry() {
        let req = Request::builder()
            .uri("/sum?a=3&b=4")
            .header("user-agent", "curl/8.0")
            .body(())
            .unwrap();
        let state = default_state();
        let resp = dispatch(&req, &state);
        let peer: SocketAddr = "10.0.0.1:1234".parse().unwrap();

        let entry = access_log_entry(&req, &resp, peer, Instant::now());
        assert_eq!(entry.remote_addr, "10.0.0.1");
        assert_eq!(entry.path, "/sum");
        assert_eq!(entry.query.as_deref(), Some("a=3&b=4"));
        assert_eq!(entry.http_version, "1.1");
        assert_eq!(entry.status, 200);
        assert_eq!(entry.body_bytes, 1);
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.0"));
        assert!(entry.referer.is_none());
    }

    #[test]
    fn test_dispatch_reports_matched_route() {
        let state = default_state();
        let route = |uri: &str| dispatch_with_route(&request(Method::GET, uri), &state).1;
        assert_eq!(route("/sum/anything"), Some("/sum/"));
        assert_eq!(route("/sum/hello"), Some("/sum/hello"));
        assert_eq!(route("/nope"), Some("/"));
        assert_eq!(route("//sum"), None);

        let resp = dispatch_with_route(&request(Method::POST, "/sum"), &state);
        assert_eq!(resp.1, None);
    }
}
