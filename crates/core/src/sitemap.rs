//! `sitemap.xml` and `robots.txt` rendering.

use std::borrow::Cow;

use chrono::NaiveDate;

use crate::seo::SiteInfo;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute canonical URL.
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub priority: f32,
}

impl SitemapEntry {
    pub fn new(loc: impl Into<String>, priority: f32) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            priority,
        }
    }

    pub fn with_lastmod(mut self, lastmod: Option<NaiveDate>) -> Self {
        self.lastmod = lastmod;
        self
    }
}

/// Render entries as a sitemap document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 128);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.loc));
        xml.push_str("</loc>\n");
        if let Some(lastmod) = entry.lastmod {
            xml.push_str("    <lastmod>");
            xml.push_str(&lastmod.format("%Y-%m-%d").to_string());
            xml.push_str("</lastmod>\n");
        }
        xml.push_str("    <priority>");
        xml.push_str(&format!("{:.1}", entry.priority));
        xml.push_str("</priority>\n  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// `robots.txt` that hides the admin and login areas.
pub fn render_robots(site: &SiteInfo) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /admin/\nDisallow: /login/\nDisallow: /logout/\nDisallow: /api/\n\nSitemap: {}\n",
        site.absolute_url("/sitemap.xml")
    )
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
