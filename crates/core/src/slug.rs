//! URL slugs for catalog entities, pages, news and services.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// First path segments owned by fixed routes; a category may not use them.
pub const RESERVED_SLUGS: &[&str] = &[
    "about",
    "catalog",
    "services",
    "price",
    "documentation",
    "contacts",
    "news",
    "static",
    "admin",
    "login",
    "logout",
    "sitemap.xml",
    "robots.txt",
    "api",
    "lead",
    "wm",
];

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid regex"));

fn transliterate(c: char) -> Option<&'static str> {
    let mapped = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' | 'ы' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ю' => "yu",
        'я' => "ya",
        ' ' | '-' | '/' | '_' => "_",
        _ => return None,
    };
    Some(mapped)
}

/// Generate a slug from free text.
///
/// Lower-cases, transliterates Cyrillic, turns spaces, dashes and slashes
/// into `_`, drops everything else that is not alphanumeric, then collapses
/// and trims underscores.
pub fn generate_slug(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut raw = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        match transliterate(c) {
            Some(s) => raw.push_str(s),
            None if c.is_ascii_alphanumeric() => raw.push(c),
            None => {}
        }
    }

    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '_' && slug.ends_with('_') {
            continue;
        }
        slug.push(c);
    }
    slug.trim_matches('_').to_string()
}

/// Check that a slug only uses `a-z`, `0-9`, `_` and `-`.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if !SLUG_PATTERN.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Slug '{slug}' may only contain latin letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

/// `true` if `slug` collides with a fixed route segment.
pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(slug))
}

/// Append `_1`, `_2`, ... until the slug is not in `existing`.
pub fn make_unique_slug(base: &str, existing: &HashSet<String>) -> String {
    if !existing.contains(base) {
        return base.to_string();
    }
    (1u32..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !existing.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
