//! Lenient semantic version parsing and comparison for tag names.
//!
//! Tags such as `v1.2`, `1.2.3.rc.1` or `v2.0.0-beta+build.5` are normalized
//! to a strict `MAJOR.MINOR.PATCH[-PRE][+META]` form before being handed to
//! [`semver`]. A missing minor or patch component defaults to zero and a dot
//! may stand in for the hyphen before a pre-release.
use regex::Regex;
use semver::Version;
use std::{cmp::Ordering, sync::LazyLock};

use crate::error::{ChangelogError, Result};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^v?([0-9]+)(\.[0-9]+)?(\.[0-9]+)?",
        r"((?:-|\.)([0-9A-Za-z\-]+(\.[0-9A-Za-z\-]+)*))?",
        r"(\+([0-9A-Za-z\-]+(\.[0-9A-Za-z\-]+)*))?$",
    ))
    .unwrap()
});

/// Returns true if `value` can be read as a semantic version.
pub fn is_valid(value: &str) -> bool {
    normalize(value).is_ok()
}

/// Parses a tag name into a [`Version`], accepting the lenient forms above.
pub fn normalize(value: &str) -> Result<Version> {
    let invalid = || ChangelogError::InvalidVersion(value.to_string());

    let caps = VERSION_REGEX.captures(value.trim()).ok_or_else(invalid)?;

    let major = parse_component(caps.get(1).map(|m| m.as_str()))
        .ok_or_else(invalid)?;
    let minor =
        parse_component(caps.get(2).map(|m| m.as_str().trim_start_matches('.')))
            .ok_or_else(invalid)?;
    let patch =
        parse_component(caps.get(3).map(|m| m.as_str().trim_start_matches('.')))
            .ok_or_else(invalid)?;

    let mut normalized = format!("{major}.{minor}.{patch}");

    if let Some(pre) = caps.get(5) {
        if !valid_prerelease(pre.as_str()) {
            return Err(invalid());
        }
        normalized.push('-');
        normalized.push_str(pre.as_str());
    }

    if let Some(meta) = caps.get(8) {
        normalized.push('+');
        normalized.push_str(meta.as_str());
    }

    Version::parse(&normalized).map_err(|_| invalid())
}

/// Returns true if `a` is a strictly greater version than `b`.
///
/// Either side failing to parse yields false. Build metadata does not take
/// part in the comparison.
pub fn is_greater(a: &str, b: &str) -> bool {
    compare(a, b) == Some(Ordering::Greater)
}

/// Compares two version strings by semantic precedence.
pub fn compare(a: &str, b: &str) -> Option<Ordering> {
    let a = normalize(a).ok()?;
    let b = normalize(b).ok()?;
    Some(a.cmp_precedence(&b))
}

/// Missing components default to zero.
fn parse_component(value: Option<&str>) -> Option<u64> {
    match value {
        None => Some(0),
        Some(v) => v.parse().ok(),
    }
}

/// Numeric pre-release identifiers must not carry leading zeros.
fn valid_prerelease(pre: &str) -> bool {
    pre.split('.').all(|ident| {
        !ident.is_empty()
            && (ident.len() == 1
                || !ident.starts_with('0')
                || !ident.chars().all(|c| c.is_ascii_digit()))
    })
}
