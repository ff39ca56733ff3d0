/*
 * Responsibility
 * - route の複合 ID ({program}-{project}) → ResourcePath への変換
 * - ネストしたディレクトリ参照に使う POSIX サブパスの検証 (fs には触れない)
 */
use std::fmt;

use serde::Serialize;
use thiserror::Error;

const PROGRAMS_PREFIX: &str = "/programs/";
const PROJECTS_INFIX: &str = "/projects/";

/// Canonical hierarchical resource path, e.g. `/programs/p1/projects/proj2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Wraps an already-canonical path (fixed paths such as `/programs`).
    pub fn from_static(path: &'static str) -> Self {
        Self(path.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed project identifier: {input}")]
pub struct MalformedIdentifier {
    pub input: String,
}

/// `{program}-{project}` → `/programs/{program}/projects/{project}`.
///
/// Exactly one hyphen is required. Empty segments are accepted as-is
/// (`"-x"` yields `/programs//projects/x`).
pub fn derive_project_path(composite_id: &str) -> Result<ResourcePath, MalformedIdentifier> {
    let segments: Vec<&str> = composite_id.split('-').collect();
    let [program, project] = segments.as_slice() else {
        return Err(MalformedIdentifier {
            input: composite_id.to_string(),
        });
    };

    Ok(ResourcePath(format!(
        "{PROGRAMS_PREFIX}{program}{PROJECTS_INFIX}{project}"
    )))
}

/// Lexically cleans a slash-separated path: collapses repeated slashes,
/// drops `.` segments and resolves `..` against the preceding segment.
/// A rooted path can never climb above `/`.
pub fn clean_posix_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match stack.last() {
                Some(&last) if last != ".." => {
                    stack.pop();
                }
                _ if rooted => {}
                _ => stack.push(".."),
            },
            other => stack.push(other),
        }
    }

    let joined = stack.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Accepts absolute, traversal-free sub-paths that are safe to turn into a
/// graph traversal.
pub fn validate_posix_sub_path(path: &str) -> bool {
    if path.contains('\0') || path.contains('\\') {
        return false;
    }
    if !path.starts_with('/') {
        return false;
    }

    let cleaned = clean_posix_path(path);
    !(cleaned.is_empty() || cleaned == "." || cleaned == ".." || cleaned.starts_with("/.."))
}

/// Non-empty segments of an already validated sub-path.
pub fn sub_path_segments(path: &str) -> Vec<String> {
    clean_posix_path(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
