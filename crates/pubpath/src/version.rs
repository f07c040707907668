//! Ordering over dotted numeric version strings.

use std::cmp::Ordering;

/// Version of an item that has no publication lineage.
pub const NA_VERSION: &str = "N/A";

/// Version given to a published chat or prompt when none is supplied.
pub const DEFAULT_VERSION: &str = "0.0.1";

/// Canonical digits of one component: leading zeros stripped, `"0"` for
/// anything that is not a run of ASCII digits.
fn component(part: &str) -> &str {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return "0";
    }
    match part.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    }
}

/// Numeric order of two canonical digit strings, without width limits.
fn cmp_component(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Descending comparator over version strings, suitable for `sort_by`.
///
/// Returns [`Ordering::Less`] when `a` is the *higher* version, so sorting
/// with it puts the latest version first. Components are compared
/// numerically at any width (`"10.0"` ranks above `"9.0"`); missing
/// trailing components and components that are not non-negative integers
/// count as `0`.
/// [`NA_VERSION`] ranks below every numbered version.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use pubpath::v1::{compare_versions, NA_VERSION};
///
/// assert_eq!(compare_versions("2.0", "1.9.9"), Ordering::Less);
/// assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
/// assert_eq!(compare_versions(NA_VERSION, "0.0.1"), Ordering::Greater);
///
/// let mut versions = vec!["9.0", "10.0", "1.2.3"];
/// versions.sort_by(|a, b| compare_versions(a, b));
/// assert_eq!(versions, vec!["10.0", "9.0", "1.2.3"]);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (a == NA_VERSION, b == NA_VERSION) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let a: Vec<&str> = a.split('.').map(component).collect();
    let b: Vec<&str> = b.split('.').map(component).collect();
    for i in 0..a.len().max(b.len()) {
        let left = a.get(i).copied().unwrap_or("0");
        let right = b.get(i).copied().unwrap_or("0");
        match cmp_component(right, left) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// The highest version in `versions`, ignoring [`NA_VERSION`].
///
/// Returns [`NA_VERSION`] when nothing numbered remains. Among versions that
/// compare equal the earliest one wins.
pub fn find_latest_version<'a, I>(versions: I) -> &'a str
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .filter(|v| *v != NA_VERSION)
        .min_by(|a, b| compare_versions(a, b))
        .unwrap_or(NA_VERSION)
}

/// Whether `version` is a non-empty, dot-separated run of integers.
pub fn is_valid_version(version: &str) -> bool {
    !version.is_empty()
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}
