//! Path rewriting.

/// Strip one leading `/<prefix>` from `path`, leaving a path that still
/// begins with `/`. A path consisting of the mount point alone rewrites to
/// `/`.
///
/// Callers must only pass paths that start with `/<prefix>`; the dispatcher
/// guarantees this by matching on the prefix first.
pub fn rewrite_path(path: &str, prefix: &str) -> String {
    debug_assert!(
        path.starts_with('/') && path[1..].starts_with(prefix),
        "dispatch must match the prefix before rewriting"
    );

    let remainder = &path[prefix.len() + 1..];
    if remainder.is_empty() {
        "/".to_string()
    } else if remainder.starts_with('/') {
        remainder.to_string()
    } else {
        format!("/{remainder}")
    }
}
