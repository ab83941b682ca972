//! Path matching helpers

/// Whether `path` falls under the subtree registered as `pattern`
///
/// Only patterns ending in `/` register a subtree; any other pattern
/// matches nothing here.
pub fn match_subtree(pattern: &str, path: &str) -> bool {
    pattern.ends_with('/') && path.starts_with(pattern)
}

/// Canonical form of a request path
///
/// Resolves `.` and `..` segments, collapses repeated slashes, and ensures a
/// leading slash. A trailing slash on the input is kept.
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut cleaned = format!("/{}", segments.join("/"));
    if path.ends_with('/') && cleaned != "/" {
        cleaned.push('/');
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_subtree() {
        assert!(match_subtree("/sum/", "/sum/"));
        assert!(match_subtree("/sum/", "/sum/anything/deeper"));
        assert!(!match_subtree("/sum/", "/sum"));
        assert!(!match_subtree("/sum", "/sum/x"));
        assert!(match_subtree("/", "/whatever"));
    }

    #[test]
    fn test_clean_path_unchanged() {
        for p in ["/", "/sum", "/sum/", "/sum/hello"] {
            assert_eq!(clean_path(p), p);
        }
    }

    #[test]
    fn test_clean_path_dots() {
        assert_eq!(clean_path("/sum/../hello"), "/hello");
        assert_eq!(clean_path("/./sum"), "/sum");
        assert_eq!(clean_path("/.."), "/");
        assert_eq!(clean_path("/a/b/.."), "/a");
        assert_eq!(clean_path("/a/./"), "/a/");
    }

    #[test]
    fn test_clean_path_slashes() {
        assert_eq!(clean_path("//sum"), "/sum");
        assert_eq!(clean_path("/sum//hello/"), "/sum/hello/");
        assert_eq!(clean_path(""), "/");
        assert_eq!(clean_path("sum"), "/sum");
    }
}
