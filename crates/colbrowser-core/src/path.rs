//! Path rules for repository collections.
//!
//! Paths are absolute, slash-separated strings such as `/db/apps/test`.
//! The normalized form has a leading slash, no trailing slash (except for
//! the bare root `/`), no empty segments and no `.` or `..` segments.

/// Normalize a path: ensure a leading slash, collapse empty and `.`
/// segments, resolve `..` against the preceding segment, strip trailing
/// slashes. `..` never climbs above `/`.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.trim().split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Check whether `path` equals `root` or lies below it.
///
/// The comparison is segment-aware: `/db/apps/testing` is not inside
/// `/db/apps/test`.
pub fn is_within_root(path: &str, root: &str) -> bool {
    let path = normalize_path(path);
    let root = normalize_path(root);
    if root == "/" {
        return true;
    }
    match path.strip_prefix(&root) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Parent collection of a path. The parent of `/` is `/`.
pub fn parent_path(path: &str) -> String {
    let path = normalize_path(path);
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// Last non-empty segment of a path, or `None` for `/` and empty input.
pub fn last_segment(path: &str) -> Option<&str> {
    path.split('/').rfind(|s| !s.is_empty())
}

/// Join a collection path and a child name. The result is normalized.
pub fn join_path(collection: &str, name: &str) -> String {
    normalize_path(&format!("{}/{}", collection, name))
}

/// Segments of `path` below `root`, in order.
///
/// Returns an empty vector when `path` is the root itself or is outside it.
pub fn segments_below_root(path: &str, root: &str) -> Vec<String> {
    if !is_within_root(path, root) {
        return Vec::new();
    }
    let path = normalize_path(path);
    let root = normalize_path(root);
    let skip = root.split('/').filter(|s| !s.is_empty()).count();
    path.split('/')
        .filter(|s| !s.is_empty())
        .skip(skip)
        .map(String::from)
        .collect()
}
