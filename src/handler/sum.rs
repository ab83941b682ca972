//! Sum of numeric query parameters

use std::num::IntErrorKind;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::{Handler, RequestContext};

/// Answers the decimal sum of each key's first value
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl Handler for Sum {
    fn handle(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
        let total = ctx
            .query
            .first_values()
            .map(|(_, value)| parse_lenient(value))
            .fold(0_i64, i64::saturating_add);
        ctx.text(total.to_string())
    }
}

/// Parse a decimal integer; non-numeric input counts as zero and
/// out-of-range input clamps to the nearest bound.
pub fn parse_lenient(value: &str) -> i64 {
    match value.parse::<i64>() {
        Ok(n) => n,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test_util::get_body;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("42"), 42);
        assert_eq!(parse_lenient("-7"), -7);
        assert_eq!(parse_lenient("+5"), 5);
        assert_eq!(parse_lenient("foo"), 0);
        assert_eq!(parse_lenient(""), 0);
        assert_eq!(parse_lenient(" 1"), 0);
        assert_eq!(parse_lenient("1.5"), 0);
        assert_eq!(parse_lenient("99999999999999999999"), i64::MAX);
        assert_eq!(parse_lenient("-99999999999999999999"), i64::MIN);
    }

    #[tokio::test]
    async fn test_sum() {
        assert_eq!(get_body(&Sum, "/sum?a=3&b=4").await, "7");
        assert_eq!(get_body(&Sum, "/sum?a=10&b=-15").await, "-5");
    }

    #[tokio::test]
    async fn test_sum_non_numeric_is_zero() {
        assert_eq!(get_body(&Sum, "/sum?a=foo").await, "0");
        assert_eq!(get_body(&Sum, "/sum?a=foo&b=2").await, "2");
    }

    #[tokio::test]
    async fn test_sum_empty() {
        assert_eq!(get_body(&Sum, "/sum").await, "0");
    }

    #[tokio::test]
    async fn test_sum_first_value_per_key() {
        assert_eq!(get_body(&Sum, "/sum?a=1&a=100&b=2").await, "3");
    }

    #[tokio::test]
    async fn test_sum_saturates() {
        let body = get_body(&Sum, "/sum?a=9223372036854775807&b=1").await;
        assert_eq!(body, i64::MAX.to_string());
    }
}
