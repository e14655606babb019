//! Slash-separated path helpers for Vault logical paths.
//!
//! Vault paths are always `/`-separated regardless of host OS, so these work
//! on strings rather than `std::path`.

/// Lexically normalizes a slash-separated path.
///
/// Collapses repeated separators, drops `.` segments, resolves `..` against
/// the preceding segment and removes any trailing separator. An empty input
/// becomes `"."`.
#[must_use]
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `/..` is `/`
                _ if rooted => {}
                _ => segments.push(".."),
            },
            s => segments.push(s),
        }
    }

    let body = segments.join("/");
    if rooted {
        format!("/{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

/// Joins path elements with `/` and cleans the result.
///
/// Empty elements are ignored; if every element is empty the result is the
/// empty string.
///
/// ```
/// use piper_vault_client::join_path;
///
/// assert_eq!(join_path(&["secret/data/team", "ci"]), "secret/data/team/ci");
/// assert_eq!(join_path(&["secret/team/", ""]), "secret/team");
/// ```
#[must_use]
pub fn join_path(elements: &[&str]) -> String {
    let parts: Vec<&str> = elements.iter().copied().filter(|e| !e.is_empty()).collect();
    if parts.is_empty() {
        return String::new();
    }
    clean_path(&parts.join("/"))
}

/// Trims whitespace and leading/trailing separators from a secret path.
#[must_use]
pub fn sanitize_path(path: &str) -> String {
    let path = path.trim();
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    path.to_string()
}

/// Inserts an API prefix (`data`, `metadata`) after the mount of a KV v2 path.
///
/// `secret/team/ci` on mount `secret/` with prefix `data` becomes
/// `secret/data/team/ci`.
#[must_use]
pub fn add_prefix_to_kv_path(path: &str, mount_path: &str, api_prefix: &str) -> String {
    let bare_mount = mount_path.strip_suffix('/').unwrap_or(mount_path);
    if path == mount_path || path == bare_mount {
        return join_path(&[mount_path, api_prefix]);
    }
    let rest = path.strip_prefix(mount_path).unwrap_or(path);
    join_path(&[mount_path, api_prefix, rest])
}
