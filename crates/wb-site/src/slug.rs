//! URL-safe slug generation.
//!
//! [`normalize`] turns a free-text title into a lower-case, hyphen-separated
//! token. [`make_unique`] resolves collisions against the slugs already taken
//! by appending `-1`, `-2`, ... until a free candidate is found.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Slug used when a title normalizes to nothing (e.g., `"@@@"`).
pub const FALLBACK_SLUG: &str = "website";

/// Anything that is not an ASCII word character, whitespace, or hyphen.
static SPECIAL_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static HYPHENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Normalize a title into a URL-safe token.
///
/// Lower-cases, trims, drops special characters, turns whitespace runs into a
/// single hyphen, collapses hyphen runs, and strips hyphens at either end.
/// The result may be empty; see [`make_unique`] for the fallback.
///
/// ```
/// assert_eq!(wb_site::slug::normalize("  My Shop!! "), "my-shop");
/// assert_eq!(wb_site::slug::normalize("@@@"), "");
/// ```
pub fn normalize(title: &str) -> String {
    let lower = title.to_lowercase();
    let cleaned = SPECIAL_CHARS_RE.replace_all(lower.trim(), "");
    let hyphenated = WHITESPACE_RE.replace_all(&cleaned, "-");
    let collapsed = HYPHENS_RE.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_owned()
}

/// Generate a slug for `title` that is not a member of `existing`.
///
/// Empty normalizations fall back to [`FALLBACK_SLUG`]. Deterministic for the
/// same inputs and always terminates, since `existing` is finite.
///
/// ```
/// use std::collections::HashSet;
///
/// let existing = HashSet::from(["my-shop", "my-shop-1"]);
/// assert_eq!(wb_site::slug::make_unique("My Shop", &existing), "my-shop-2");
/// ```
pub fn make_unique(title: &str, existing: &HashSet<&str>) -> String {
    let mut base = normalize(title);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_owned();
    }

    if !existing.contains(base.as_str()) {
        return base;
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{base}-{counter}");
        if !existing.contains(candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}
