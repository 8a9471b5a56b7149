//! Path normalization for `/`-separated remote paths.
//!
//! Remote storage paths are never touched on the local filesystem, so this
//! works on strings rather than `std::path::Path` (which would follow the
//! host's separator rules).

/// Canonicalize a path: collapse repeated separators, drop `.` segments and
/// resolve `..` against the preceding segment.
///
/// Absolute paths stay absolute and cannot climb above the root; relative
/// paths keep any leading `..`.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join `relative` onto `directory` and normalize the result.
pub fn join(directory: &str, relative: &str) -> String {
    normalize(&format!("{}/{}", directory, relative))
}

/// Split a path at its last separator into `(dirname, basename)`.
///
/// `"/docs/a.png"` gives `("/docs", "a.png")`, `"/a.png"` gives `("", "a.png")`.
pub fn split_basename(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

/// Text after the last `/`, or the whole input when there is none.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
