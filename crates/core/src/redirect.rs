//! URL redirect resolution and redirect-rule authoring checks.
//!
//! [`resolve`] runs once per inbound request, before route dispatch. It walks
//! an ordered rule table (exact rules first, then wildcard rules in table
//! order) and finally applies the trailing-slash canonicalization policy.
//! The first match wins; nothing here ever fails, a rule that cannot match
//! is simply skipped.

use serde::Serialize;

use crate::error::CoreError;

/// Path prefixes that are never redirected (static assets).
pub const ALWAYS_EXEMPT_PREFIXES: &[&str] = &["/static/", "/admin/static/"];

// ---------------------------------------------------------------------------
// Rule types
// ---------------------------------------------------------------------------

/// HTTP status used for a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RedirectStatus {
    /// 301 Moved Permanently.
    MovedPermanently,
    /// 302 Found.
    Found,
}

impl RedirectStatus {
    /// Numeric HTTP status code.
    pub fn code(self) -> u16 {
        match self {
            Self::MovedPermanently => 301,
            Self::Found => 302,
        }
    }

    /// Map a stored status code to a redirect status. Only 301 and 302 are valid.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            301 => Some(Self::MovedPermanently),
            302 => Some(Self::Found),
            _ => None,
        }
    }
}

/// Source pattern, target pattern and status shared by both rule kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePaths {
    pub from: String,
    pub to: String,
    pub status: RedirectStatus,
    pub active: bool,
}

/// A single row of the redirect table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectRule {
    /// `from` is compared against the request path verbatim.
    Exact(RulePaths),
    /// `from` contains exactly one `*`; the matched text replaces the `*` in `to`.
    Wildcard(RulePaths),
}

impl RedirectRule {
    /// Build a rule from its stored columns.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        status: RedirectStatus,
        active: bool,
        is_wildcard: bool,
    ) -> Self {
        let paths = RulePaths {
            from: from.into(),
            to: to.into(),
            status,
            active,
        };
        if is_wildcard {
            Self::Wildcard(paths)
        } else {
            Self::Exact(paths)
        }
    }

    pub fn paths(&self) -> &RulePaths {
        match self {
            Self::Exact(p) | Self::Wildcard(p) => p,
        }
    }
}

/// A redirect decision: send the client to `target` with `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub target: String,
    pub status: RedirectStatus,
}

/// Extra knobs for [`resolve_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions<'a> {
    /// Additional prefixes (besides [`ALWAYS_EXEMPT_PREFIXES`]) that bypass
    /// every rule, including the trailing-slash policy.
    pub exempt_prefixes: &'a [&'a str],
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a request path against the rule table with default options.
pub fn resolve(path: &str, rules: &[RedirectRule]) -> Option<Redirect> {
    resolve_with(path, rules, ResolveOptions::default())
}

/// Resolve a request path against the rule table.
///
/// Order of evaluation:
/// 1. exempt prefixes are never redirected;
/// 2. exact rule on the raw path;
/// 3. exact rule on the path with a trailing slash appended;
/// 4. wildcard rules in table order (raw path, then slash-appended path);
/// 5. trailing-slash policy (301 to `path + "/"`).
pub fn resolve_with(
    path: &str,
    rules: &[RedirectRule],
    options: ResolveOptions<'_>,
) -> Option<Redirect> {
    if is_exempt(path, options.exempt_prefixes) {
        return None;
    }

    let slashed = (!path.ends_with('/')).then(|| format!("{path}/"));

    if let Some(hit) = find_exact(path, rules) {
        return Some(hit);
    }
    if let Some(hit) = slashed.as_deref().and_then(|p| find_exact(p, rules)) {
        return Some(hit);
    }

    for rule in rules {
        let RedirectRule::Wildcard(paths) = rule else {
            continue;
        };
        if !paths.active {
            continue;
        }
        let Some(pattern) = WildcardPattern::compile(&paths.from) else {
            continue;
        };
        let captured = pattern
            .capture(path)
            .or_else(|| slashed.as_deref().and_then(|p| pattern.capture(p)));
        if let Some(captured) = captured {
            let target = substitute_wildcard(&paths.to, captured);
            return Some(Redirect {
                target: ensure_trailing_slash(target),
                status: paths.status,
            });
        }
    }

    if needs_trailing_slash(path) {
        return Some(Redirect {
            target: format!("{path}/"),
            status: RedirectStatus::MovedPermanently,
        });
    }

    None
}

/// `true` when `path` is under a prefix that redirects never apply to.
pub fn is_exempt(path: &str, extra: &[&str]) -> bool {
    ALWAYS_EXEMPT_PREFIXES
        .iter()
        .chain(extra.iter())
        .any(|prefix| path.starts_with(prefix))
}

fn find_exact(path: &str, rules: &[RedirectRule]) -> Option<Redirect> {
    rules.iter().find_map(|rule| match rule {
        RedirectRule::Exact(p) if p.active && p.from == path => Some(Redirect {
            target: p.to.clone(),
            status: p.status,
        }),
        _ => None,
    })
}

/// `true` for a non-root path without a trailing slash whose last segment has no dot.
pub fn needs_trailing_slash(path: &str) -> bool {
    path != "/" && !path.ends_with('/') && !last_segment(path).contains('.')
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn ensure_trailing_slash(target: String) -> String {
    if target.ends_with('/') || last_segment(&target).contains('.') {
        target
    } else {
        format!("{target}/")
    }
}

fn substitute_wildcard(to: &str, captured: &str) -> String {
    match to.split_once('*') {
        Some((head, tail)) => format!("{head}{captured}{tail}"),
        None => to.to_string(),
    }
}

/// A compiled `prefix*suffix` pattern. The `*` captures one or more characters.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WildcardPattern<'a> {
    prefix: &'a str,
    suffix: &'a str,
}

impl<'a> WildcardPattern<'a> {
    /// Compile a pattern; `None` unless it contains exactly one `*`.
    fn compile(pattern: &'a str) -> Option<Self> {
        if pattern.matches('*').count() != 1 {
            return None;
        }
        let (prefix, suffix) = pattern.split_once('*')?;
        Some(Self { prefix, suffix })
    }

    fn capture<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.strip_prefix(self.prefix)?;
        let captured = rest.strip_suffix(self.suffix)?;
        (!captured.is_empty()).then_some(captured)
    }
}

// ---------------------------------------------------------------------------
// Authoring
// ---------------------------------------------------------------------------

/// Normalize user-entered rule paths.
///
/// Both paths get a leading slash (absolute `http(s)://` targets are left
/// alone). An exact `from` also gets a trailing slash so it lines up with the
/// canonical form produced by the trailing-slash policy.
pub fn normalize_rule_paths(from: &str, to: &str, is_wildcard: bool) -> (String, String) {
    let mut from = from.trim().to_string();
    if !from.starts_with('/') {
        from.insert(0, '/');
    }
    if !is_wildcard && !from.ends_with('/') {
        from.push('/');
    }

    let mut to = to.trim().to_string();
    let absolute = to.starts_with("http://") || to.starts_with("https://");
    if !absolute && !to.starts_with('/') {
        to.insert(0, '/');
    }

    (from, to)
}

/// Validate a normalized rule and return its status.
pub fn validate_rule(
    from: &str,
    to: &str,
    code: i32,
    is_wildcard: bool,
) -> Result<RedirectStatus, CoreError> {
    let status = RedirectStatus::from_code(code).ok_or_else(|| {
        CoreError::Validation(format!("Redirect code must be 301 or 302, got {code}"))
    })?;

    if from == "/" || from.is_empty() {
        return Err(CoreError::Validation(
            "Redirect source path must not be empty".into(),
        ));
    }
    if from == to {
        return Err(CoreError::Validation(
            "Redirect source and target must differ".into(),
        ));
    }

    let from_stars = from.matches('*').count();
    if is_wildcard {
        if from_stars != 1 {
            return Err(CoreError::Validation(
                "Wildcard source must contain exactly one '*'".into(),
            ));
        }
        if to.matches('*').count() > 1 {
            return Err(CoreError::Validation(
                "Wildcard target may contain at most one '*'".into(),
            ));
        }
    } else if from_stars > 0 {
        return Err(CoreError::Validation(
            "Source contains '*'; mark the rule as a wildcard rule".into(),
        ));
    }

    Ok(status)
}

/// `true` when `(from, to)` is the exact inverse of an existing `(from, to)` pair.
pub fn is_inverse_pair<'a, I>(from: &str, to: &str, existing: I) -> bool
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    existing
        .into_iter()
        .any(|(ef, et)| ef == to && et == from)
}

/// Reject a new rule that would form a two-step loop with an existing one.
///
/// Only the direct inverse is caught; longer chains are not followed.
pub fn check_redirect_cycle<'a, I>(from: &str, to: &str, existing: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    if is_inverse_pair(from, to, existing) {
        return Err(CoreError::Conflict("Redirect loop detected".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn exact(from: &str, to: &str, code: i32) -> RedirectRule {
        RedirectRule::new(from, to, RedirectStatus::from_code(code).unwrap(), true, false)
    }

    fn wildcard(from: &str, to: &str) -> RedirectRule {
        RedirectRule::new(from, to, RedirectStatus::MovedPermanently, true, true)
    }

    fn target(r: Option<Redirect>) -> Option<(String, u16)> {
        r.map(|r| (r.target, r.status.code()))
    }

    #[test]
    fn appends_trailing_slash_without_rules() {
        assert_eq!(
            target(resolve("/about", &[])),
            Some(("/about/".to_string(), 301))
        );
        assert_eq!(
            target(resolve("/a/b/c", &[])),
            Some(("/a/b/c/".to_string(), 301))
        );
    }

    #[test]
    fn leaves_canonical_and_asset_paths_alone() {
        assert_eq!(resolve("/", &[]), None);
        assert_eq!(resolve("/about/", &[]), None);
        assert_eq!(resolve("/sitemap.xml", &[]), None);
        assert_eq!(resolve("/docs/price.pdf", &[]), None);
    }

    #[test]
    fn static_prefixes_are_exempt() {
        let rules = vec![exact("/static/x", "/y/", 301), wildcard("/static/*", "/*")];
        assert_eq!(resolve("/static/x", &rules), None);
        assert_eq!(resolve("/static/img/logo", &rules), None);
        assert_eq!(resolve("/admin/static/app", &rules), None);
    }

    #[test]
    fn extra_exempt_prefixes() {
        let options = ResolveOptions {
            exempt_prefixes: &["/api/"],
        };
        assert_eq!(resolve_with("/api/v1/admin/pages", &[], options), None);
        assert!(resolve_with("/apis", &[], options).is_some());
    }

    #[test]
    fn exact_rule_on_raw_path() {
        let rules = vec![exact("/old-page/", "/new-page/", 302)];
        assert_eq!(
            target(resolve("/old-page/", &rules)),
            Some(("/new-page/".to_string(), 302))
        );
    }

    #[test]
    fn exact_rule_matches_slash_variant() {
        let rules = vec![exact("/old-page/", "/new-page/", 301)];
        assert_eq!(
            target(resolve("/old-page", &rules)),
            Some(("/new-page/".to_string(), 301))
        );
    }

    #[test]
    fn exact_rule_without_slash_matches_raw_path() {
        let rules = vec![exact("/legacy.php", "/catalog/", 301)];
        assert_eq!(
            target(resolve("/legacy.php", &rules)),
            Some(("/catalog/".to_string(), 301))
        );
    }

    #[test]
    fn exact_rule_wins_over_wildcard() {
        let rules = vec![
            wildcard("/catalog/*", "/*"),
            exact("/catalog/pipes/", "/special/", 302),
        ];
        assert_eq!(
            target(resolve("/catalog/pipes/", &rules)),
            Some(("/special/".to_string(), 302))
        );
    }

    #[test]
    fn inactive_rules_are_ignored() {
        let rules = vec![RedirectRule::new(
            "/old/",
            "/new/",
            RedirectStatus::Found,
            false,
            false,
        )];
        assert_eq!(resolve("/old/", &rules), None);
    }

    #[test]
    fn wildcard_round_trip() {
        let rules = vec![wildcard("/catalog/*", "/*")];
        assert_eq!(
            target(resolve("/catalog/pipes/", &rules)),
            Some(("/pipes/".to_string(), 301))
        );
    }

    #[test]
    fn wildcard_forces_trailing_slash_on_target() {
        let rules = vec![wildcard("/catalog/*", "/*")];
        assert_eq!(
            target(resolve("/catalog/pipes/pe-100", &rules)),
            Some(("/pipes/pe-100/".to_string(), 301))
        );
    }

    #[test]
    fn wildcard_keeps_asset_targets() {
        let rules = vec![wildcard("/files/*", "/static/uploads/*")];
        assert_eq!(
            target(resolve("/files/price.pdf", &rules)),
            Some(("/static/uploads/price.pdf".to_string(), 301))
        );
    }

    #[test]
    fn wildcard_requires_non_empty_capture() {
        let rules = vec![wildcard("/catalog/*", "/*")];
        assert_eq!(resolve("/catalog/", &rules), None);
        assert_eq!(
            target(resolve("/catalog", &rules)),
            Some(("/catalog/".to_string(), 301))
        );
    }

    #[test]
    fn wildcard_uses_table_order() {
        let rules = vec![wildcard("/a/*", "/first/*"), wildcard("/a/*", "/second/*")];
        assert_eq!(
            target(resolve("/a/x/", &rules)),
            Some(("/first/x/".to_string(), 301))
        );
    }

    #[test]
    fn wildcard_matches_slash_appended_path() {
        let rules = vec![wildcard("/old/*/", "/*")];
        assert_eq!(
            target(resolve("/old/x", &rules)),
            Some(("/x/".to_string(), 301))
        );
    }

    #[test]
    fn wildcard_with_suffix() {
        let rules = vec![wildcard("/news/*.html", "/news/*/")];
        assert_eq!(
            target(resolve("/news/launch.html", &rules)),
            Some(("/news/launch/".to_string(), 301))
        );
    }

    #[test]
    fn wildcard_target_without_star_is_used_verbatim() {
        let rules = vec![wildcard("/promo/*", "/sale/")];
        assert_eq!(
            target(resolve("/promo/summer/", &rules)),
            Some(("/sale/".to_string(), 301))
        );
    }

    #[test]
    fn malformed_wildcard_never_matches() {
        let rules = vec![wildcard("/no-star/", "/x/"), wildcard("/a/*/b/*", "/*")];
        assert_eq!(resolve("/no-star/", &rules), None);
        assert_eq!(resolve("/a/1/b/2/", &rules), None);
    }

    #[test]
    fn normalize_paths() {
        assert_eq!(
            normalize_rule_paths(" old ", "new/", false),
            ("/old/".to_string(), "/new/".to_string())
        );
        assert_eq!(
            normalize_rule_paths("catalog/*", "/*", true),
            ("/catalog/*".to_string(), "/*".to_string())
        );
        assert_eq!(
            normalize_rule_paths("/x/", "https://example.com/", false).1,
            "https://example.com/"
        );
    }

    #[test]
    fn validate_rejects_bad_codes_and_patterns() {
        assert_matches!(validate_rule("/a/", "/b/", 307, false), Err(CoreError::Validation(_)));
        assert_matches!(validate_rule("/a/", "/a/", 301, false), Err(CoreError::Validation(_)));
        assert_matches!(validate_rule("/a/*", "/b/", 301, false), Err(CoreError::Validation(_)));
        assert_matches!(validate_rule("/a/", "/b/", 301, true), Err(CoreError::Validation(_)));
        assert_matches!(validate_rule("/a/*", "/*/*", 301, true), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_rule("/a/*", "/*", 302, true),
            Ok(RedirectStatus::Found)
        );
    }

    #[test]
    fn inverse_pair_is_rejected() {
        let existing = [("/a/", "/b/"), ("/c/", "/d/")];
        assert!(is_inverse_pair("/b/", "/a/", existing));
        assert_matches!(
            check_redirect_cycle("/b/", "/a/", existing),
            Err(CoreError::Conflict(_))
        );
        assert!(check_redirect_cycle("/b/", "/c/", existing).is_ok());
    }

    #[test]
    fn longer_chains_are_not_detected() {
        let existing = [("/a/", "/b/"), ("/b/", "/c/")];
        assert!(check_redirect_cycle("/c/", "/a/", existing).is_ok());
    }
}
