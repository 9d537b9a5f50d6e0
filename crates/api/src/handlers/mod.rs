//! HTTP handlers, one module per resource.

pub mod accessory_blocks;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod documents;
pub mod gallery;
pub mod import;
pub mod leads;
pub mod menu;
pub mod news;
pub mod pages;
pub mod product_lines;
pub mod public;
pub mod redirects;
pub mod sections;
pub mod seo_files;
pub mod services;
pub mod settings;
pub mod size_items;
pub mod uploads;
pub mod watermark;

use glavtrub_core::error::CoreError;
use glavtrub_core::sanitize::sanitize_html;
use glavtrub_core::slug::{generate_slug, validate_slug};

use crate::error::AppResult;

/// Use the explicit slug when one is given, otherwise derive it from `source`.
pub(crate) fn resolve_slug(explicit: Option<&str>, source: &str) -> AppResult<String> {
    let slug = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => generate_slug(source),
    };
    if slug.is_empty() {
        return Err(CoreError::Validation(
            "Cannot derive a slug; provide one explicitly".into(),
        )
        .into());
    }
    validate_slug(&slug)?;
    Ok(slug)
}

/// Sanitize an optional rich-text field from an admin form.
pub(crate) fn clean_html(field: &mut Option<String>) {
    if let Some(html) = field.as_mut() {
        *html = sanitize_html(html);
    }
}

pub(crate) fn require_non_empty(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::AppError;

    #[test]
    fn slug_from_name_when_missing() {
        assert_eq!(resolve_slug(None, "Трубы ПНД").unwrap(), "truby_pnd");
        assert_eq!(resolve_slug(Some("  "), "pe100").unwrap(), "pe100");
    }

    #[test]
    fn explicit_slug_is_validated() {
        assert_eq!(resolve_slug(Some("pnd-40"), "ignored").unwrap(), "pnd-40");
        assert_matches!(
            resolve_slug(Some("Плохой"), "x"),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[test]
    fn underivable_slug_is_rejected() {
        assert_matches!(
            resolve_slug(None, "!!!"),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[test]
    fn clean_html_strips_scripts() {
        let mut field = Some("<p>ok</p><script>alert(1)</script>".to_string());
        clean_html(&mut field);
        assert_eq!(field.as_deref(), Some("<p>ok</p>"));

        let mut empty: Option<String> = None;
        clean_html(&mut empty);
        assert!(empty.is_none());
    }
}
