//! Query string parsing
//!
//! Decodes `application/x-www-form-urlencoded` query strings into a
//! multi-valued parameter set.

use crate::logger;

/// Query parameters: each key holds every value it was given, in order.
///
/// Keys keep the order of their first appearance in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`)
    ///
    /// Pairs containing `;` or a malformed `%` escape are dropped. A query
    /// that still cannot be decoded yields an empty set.
    pub fn parse(query: Option<&str>) -> Self {
        let Some(query) = query.filter(|q| !q.is_empty()) else {
            return Self::default();
        };

        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| {
                let valid = !pair.contains(';') && has_valid_escapes(pair);
                if !valid {
                    logger::log_warning(&format!("Ignoring malformed query pair '{pair}'"));
                }
                valid
            })
            .collect();

        match serde_urlencoded::from_str::<Vec<(String, String)>>(&kept.join("&")) {
            Ok(pairs) => pairs.into_iter().collect(),
            Err(e) => {
                logger::log_warning(&format!("Ignoring undecodable query '{query}': {e}"));
                Self::default()
            }
        }
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// First value given for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterate over `(key, first value)` pairs
    pub fn first_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(k, values)| {
            values.first().map(|v| (k.as_str(), v.as_str()))
        })
    }
}

/// Every `%` must start a two-digit hex escape
fn has_valid_escapes(pair: &str) -> bool {
    let bytes = pair.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    })
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::default();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
