//! Path normalization.
//!
//! # Responsibilities
//! - Canonicalize raw path strings before any comparison
//! - Provide the segment-boundary prefix test shared by matching and links
//!
//! # Design Decisions
//! - Only slashes are touched: no case folding, no percent-decoding
//! - A leading slash is never added; relative input stays relative
//! - Total and idempotent: `normalize(normalize(p)) == normalize(p)`

/// Canonicalizes a raw path.
///
/// Runs of `/` collapse into one and a single trailing `/` is stripped.
/// Empty input, and input that strips down to nothing, becomes `"/"`.
pub fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len().max(1));
    for ch in path.chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }

    if normalized.ends_with('/') {
        normalized.pop();
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Resolves `segment` relative to `base`.
pub fn join(base: &str, segment: &str) -> String {
    normalize(&format!("{}/{}", base, segment))
}

/// Returns true if `path` lies strictly below `prefix`.
///
/// Equivalent to `path.starts_with(prefix + "/")`, so the boundary always
/// lands on a separator: `/admin2` is not within `/admin`.
pub fn is_within(path: &str, prefix: &str) -> bool {
    path.len() > prefix.len()
        && path.starts_with(prefix)
        && path.as_bytes()[prefix.len()] == b'/'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_slashes_become_root() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("///"), "/");
    }

    #[test]
    fn test_collapse_and_strip() {
        assert_eq!(normalize("//admin///products/"), "/admin/products");
        assert_eq!(normalize("/shop/"), "/shop");
        // Only one trailing slash exists after collapsing
        assert_eq!(normalize("/shop//"), "/shop");
    }

    #[test]
    fn test_no_other_canonicalization() {
        assert_eq!(normalize("/Admin/%20x"), "/Admin/%20x");
        assert_eq!(normalize("shop"), "shop");
    }

    #[test]
    fn test_idempotent() {
        let samples = ["", "/", "//a//b//", "a/", "/a/b", "x//", "/%2F/", "///a"];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "a"), "/a");
        assert_eq!(join("/a", "b/"), "/a/b");
        assert_eq!(join("/a", ""), "/a");
    }

    #[test]
    fn test_is_within_respects_boundary() {
        assert!(is_within("/admin/products", "/admin"));
        assert!(!is_within("/admin2", "/admin"));
        assert!(!is_within("/admin", "/admin"));
        // Root never acts as a prefix: "//" cannot appear in normalized paths
        assert!(!is_within("/admin", "/"));
    }
}
