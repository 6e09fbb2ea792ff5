//! Argument validation and string-level path helpers.
//!
//! Every backend runs its arguments through [`validate_path`] / [`validate_pattern`] before
//! touching any storage, so all of them reject the same inputs with the same error kinds.
//! The remaining helpers work on plain strings with an explicit separator, which lets
//! `MemoryFS` emulate a host path convention that differs from the one it runs on.

use std::path::Path;

use crate::core::error::{Error, Result};

/// Checks a path argument and returns it as `&str`.
///
/// * A path that is not valid Unicode is unusable for keying and case folding:
///   [`Error::InvalidArgument`].
/// * An empty or all-whitespace path: [`Error::OutOfRange`].
pub fn validate_path<'a>(path: &'a Path, name: &'static str) -> Result<&'a str> {
    let Some(text) = path.to_str() else {
        return Err(Error::invalid_argument(
            name,
            format!("{:?} is not valid unicode", path),
        ));
    };
    if text.trim().is_empty() {
        return Err(Error::out_of_range(name, "must not be empty or whitespace"));
    }
    Ok(text)
}

/// Checks a search pattern argument. Same rules as [`validate_path`].
pub fn validate_pattern(pattern: &str) -> Result<&str> {
    if pattern.trim().is_empty() {
        return Err(Error::out_of_range(
            "pattern",
            "must not be empty or whitespace",
        ));
    }
    Ok(pattern)
}

/// Strips trailing separators, keeping a bare root (`/`, `C:\`) intact.
pub fn trim_trailing_separators(path: &str, sep: char) -> &str {
    let trimmed = path.trim_end_matches(sep);
    if trimmed.len() == path.len() {
        return path;
    }
    if trimmed.is_empty() || trimmed.ends_with(':') {
        return &path[..trimmed.len() + sep.len_utf8()];
    }
    trimmed
}

/// Returns the parent directory of `path`, or `None` if it has none
/// (a bare file name, or a root).
pub fn parent_of(path: &str, sep: char) -> Option<&str> {
    let path = trim_trailing_separators(path, sep);
    let idx = path.rfind(sep)?;
    let parent = &path[..idx];
    if parent.is_empty() || parent.ends_with(':') {
        let root = &path[..idx + sep.len_utf8()];
        if root == path {
            return None;
        }
        return Some(root);
    }
    Some(parent)
}

/// Returns the last component of `path`.
pub fn file_name_of(path: &str, sep: char) -> &str {
    match path.rfind(sep) {
        Some(idx) => &path[idx + sep.len_utf8()..],
        None => path,
    }
}

/// If `candidate` lies below `dir`, returns the part after `dir` and its separator.
pub fn strip_dir_prefix<'a>(candidate: &'a str, dir: &str, sep: char) -> Option<&'a str> {
    let rest = candidate.strip_prefix(dir)?;
    if dir.ends_with(sep) {
        return (!rest.is_empty()).then_some(rest);
    }
    rest.strip_prefix(sep).filter(|rest| !rest.is_empty())
}

/// Returns the extension of the file name in `path`, including the leading dot,
/// or `""` if there is none.
///
/// Both `/` and `\` end a directory component, so the result does not depend on which
/// backend produced the path. A trailing dot counts as no extension.
pub fn extension_of(path: &str) -> &str {
    let name = match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    };
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}
