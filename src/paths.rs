//! Vault-relative path helpers.
//!
//! Vault paths use `/` as separator and carry no leading slash. The vault
//! root itself is the sentinel [`ROOT_PATH`].

/// Sentinel path of the vault root.
pub const ROOT_PATH: &str = "/";

/// Returns true for the vault root sentinel (or an empty path).
pub fn is_root(path: &str) -> bool {
    path.is_empty() || path == ROOT_PATH
}

/// Joins a child name onto a folder path.
///
/// Children of the root have no leading separator: `join("/", "a.md")` is
/// `"a.md"`, `join("Notes", "a.md")` is `"Notes/a.md"`.
pub fn join(parent: &str, name: &str) -> String {
    if is_root(parent) {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Returns the parent folder path, or [`ROOT_PATH`] for top-level entries.
pub fn parent_of(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) if idx > 0 => path[..idx].to_string(),
        _ => ROOT_PATH.to_string(),
    }
}

/// Final path component.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Splits a file name into base name and extension.
///
/// A leading dot does not start an extension (`.gitignore` has none).
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// True when `path` is `ancestor` itself or lies somewhere beneath it.
///
/// Containment is by path prefix plus separator, so `Notes2` is not inside
/// `Notes`. Every path is inside the root.
pub fn is_same_or_descendant(path: &str, ancestor: &str) -> bool {
    if is_root(ancestor) {
        return true;
    }
    path == ancestor
        || (path.len() > ancestor.len()
            && path.starts_with(ancestor)
            && path.as_bytes()[ancestor.len()] == b'/')
}

/// Rewrites `path` after `from` was renamed to `to`.
///
/// Returns `None` when `path` is unaffected by the rename.
pub fn rebase(path: &str, from: &str, to: &str) -> Option<String> {
    if path == from {
        Some(to.to_string())
    } else if is_same_or_descendant(path, from) && !is_root(from) {
        Some(format!("{}{}", to, &path[from.len()..]))
    } else {
        None
    }
}
