// Path helpers that work on path *strings* rather than `std::path::Path`.
// Build logs routinely carry Windows paths that must be handled the same way
// on every host, so both `/` and `\` are treated as separators here.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Separator used when rebuilding a path: backslash for Windows-style input.
fn preferred_separator(path: &str) -> char {
    if path.contains('\\') || has_drive_prefix(path) {
        '\\'
    } else {
        '/'
    }
}

/// Directory part of a file path, splitting on the last `/` or `\`.
///
/// Returns an empty string for a bare file name. The root of a path is kept
/// (`C:\a.vcxproj` -> `C:\`, `/a.vcxproj` -> `/`).
pub fn parent_directory(path: &str) -> &str {
    match path.rfind(is_separator) {
        None => "",
        Some(0) => &path[..1],
        Some(idx) if idx == 2 && has_drive_prefix(path) => &path[..=idx],
        Some(idx) => &path[..idx],
    }
}

/// Whether the path is rooted (`/x`, `\x`, `C:\x` or a UNC share).
pub fn is_absolute_path(path: &str) -> bool {
    if path.starts_with(is_separator) {
        return true;
    }
    has_drive_prefix(path) && path[2..].starts_with(is_separator)
}

/// Split a path into its root (kept verbatim, separator normalised) and the rest.
fn split_root(path: &str, sep: char) -> (String, &str) {
    if path.starts_with("\\\\") || path.starts_with("//") {
        return (format!("{sep}{sep}"), &path[2..]);
    }
    if has_drive_prefix(path) {
        let drive = &path[..2];
        return match path[2..].strip_prefix(is_separator) {
            Some(rest) => (format!("{drive}{sep}"), rest),
            None => (drive.to_string(), &path[2..]),
        };
    }
    match path.strip_prefix(is_separator) {
        Some(rest) => (sep.to_string(), rest),
        None => (String::new(), path),
    }
}

/// Resolve `.` and `..` segments without touching the filesystem.
///
/// `..` above the root is dropped; for relative paths a leading `..` is kept.
pub fn normalize_lexical(path: &str) -> String {
    normalize_with(path, preferred_separator(path))
}

fn normalize_with(path: &str, sep: char) -> String {
    let (root, rest) = split_root(path, sep);

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if root.is_empty() {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let body = parts.join(&sep.to_string());
    if root.is_empty() && body.is_empty() {
        ".".to_string()
    } else {
        format!("{root}{body}")
    }
}

/// Absolute, normalised form of `path`, resolving relative input against `base`.
///
/// An empty `base` leaves relative paths relative (only normalised).
pub fn absolute_lexical_path(path: &str, base: &str) -> String {
    if is_absolute_path(path) || base.is_empty() {
        return normalize_lexical(path);
    }

    // The base decides the separator style of the joined path.
    let sep = preferred_separator(base);
    let base = base.trim_end_matches(is_separator);
    normalize_with(&format!("{base}{sep}{path}"), sep)
}
