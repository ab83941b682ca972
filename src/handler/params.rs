//! Query parameter dump

use std::fmt::Write;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::{Handler, RequestContext};

/// Answers one `key:value` line per query parameter, using each key's first value
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamDump;

impl Handler for ParamDump {
    fn handle(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
        let body = ctx
            .query
            .first_values()
            .fold(String::new(), |mut out, (key, value)| {
                let _ = writeln!(out, "{key}:{value}");
                out
            });
        ctx.text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test_util::get_body;

    #[tokio::test]
    async fn test_dump_lines() {
        let body = get_body(&ParamDump, "/params?x=1&y=2").await;
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.contains(&"x:1"));
        assert!(lines.contains(&"y:2"));
        assert!(body.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_dump_first_value_only() {
        let body = get_body(&ParamDump, "/params?x=1&x=2").await;
        assert_eq!(body, "x:1\n");
    }

    #[tokio::test]
    async fn test_dump_empty_query() {
        assert_eq!(get_body(&ParamDump, "/params").await, "");
    }
}
