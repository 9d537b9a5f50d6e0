//! SEO metadata for public pages: absolute and canonical URLs, title and
//! description fallbacks, Open Graph tags.

use serde::Serialize;

/// Site identity used in generated metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteInfo {
    pub name: String,
    /// Base URL without a trailing slash requirement, e.g. `https://glavtrubtorg.ru`.
    pub url: String,
}

impl SiteInfo {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Join a site-relative path onto the base URL.
    pub fn absolute_url(&self, path: &str) -> String {
        let base = self.url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Absolute URL with the canonical trailing slash (`.xml`/`.txt` excepted).
    pub fn canonical_url(&self, path: &str) -> String {
        if path.ends_with('/') || path.ends_with(".xml") || path.ends_with(".txt") {
            self.absolute_url(path)
        } else {
            self.absolute_url(&format!("{path}/"))
        }
    }

    /// Absolute URL for an image path; full URLs pass through.
    pub fn image_url(&self, image: &str) -> String {
        if image.starts_with("http") {
            image.to_string()
        } else {
            self.absolute_url(image)
        }
    }
}

/// Title, description and heading of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSeo {
    pub title: String,
    pub description: String,
    pub h1: String,
    pub seo_text: String,
}

/// SEO-relevant fields of an editable entity. Empty strings mean "unset".
#[derive(Debug, Clone, Copy, Default)]
pub struct SeoFields<'a> {
    pub h1: &'a str,
    /// Entity title or name, used when `h1` is empty.
    pub name: &'a str,
    pub seo_title: &'a str,
    pub seo_description: &'a str,
    pub seo_text: &'a str,
}

/// Build page metadata, generating a title and description from the heading
/// when the entity has none of its own.
pub fn page_seo(site: &SiteInfo, fields: SeoFields<'_>) -> PageSeo {
    let h1 = first_non_empty(&[fields.h1, fields.name]).to_string();
    let title = if fields.seo_title.trim().is_empty() {
        format!("{h1} — купить, цена, характеристики | {}", site.name)
    } else {
        fields.seo_title.to_string()
    };
    let description = if fields.seo_description.trim().is_empty() {
        format!(
            "Актуальные цены и наличие. {h1}. Доставка, консультация. {}.",
            site.name
        )
    } else {
        fields.seo_description.to_string()
    };
    PageSeo {
        title,
        description,
        h1,
        seo_text: fields.seo_text.to_string(),
    }
}

/// Metadata for fixed listing pages, with a section override when present.
pub fn section_seo(
    override_title: &str,
    override_description: &str,
    override_h1: &str,
    fallback: (String, String, String),
) -> PageSeo {
    let pick = |value: &str, default: String| {
        if value.trim().is_empty() {
            default
        } else {
            value.to_string()
        }
    };
    let (title, description, h1) = fallback;
    PageSeo {
        title: pick(override_title, title),
        description: pick(override_description, description),
        h1: pick(override_h1, h1),
        seo_text: String::new(),
    }
}

fn first_non_empty<'a>(values: &[&'a str]) -> &'a str {
    values
        .iter()
        .copied()
        .find(|v| !v.trim().is_empty())
        .unwrap_or("")
}

/// Open Graph tags in document order.
pub fn og_tags(
    site: &SiteInfo,
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut tags = vec![
        ("og:title", title.to_string()),
        ("og:description", description.to_string()),
        ("og:url", url.to_string()),
        ("og:type", "website".to_string()),
        ("og:site_name", site.name.clone()),
    ];
    if let Some(image) = image.filter(|i| !i.is_empty()) {
        tags.push(("og:image", site.image_url(image)));
    }
    tags
}

/// A breadcrumb; the last crumb normally has no URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: Option<String>,
}

impl Breadcrumb {
    pub fn link(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }

    pub fn current(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

/// Breadcrumb trail starting at the home page.
pub fn breadcrumbs(trail: impl IntoIterator<Item = Breadcrumb>) -> Vec<Breadcrumb> {
    std::iter::once(Breadcrumb::link("Главная", "/"))
        .chain(trail)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteInfo {
        SiteInfo::new("ГлавТрубТорг", "https://glavtrubtorg.ru/")
    }

    #[test]
    fn absolute_and_canonical_urls() {
        let s = site();
        assert_eq!(s.absolute_url("/news/"), "https://glavtrubtorg.ru/news/");
        assert_eq!(s.absolute_url("news"), "https://glavtrubtorg.ru/news");
        assert_eq!(s.canonical_url("/news"), "https://glavtrubtorg.ru/news/");
        assert_eq!(s.canonical_url("/sitemap.xml"), "https://glavtrubtorg.ru/sitemap.xml");
        assert_eq!(s.canonical_url("/robots.txt"), "https://glavtrubtorg.ru/robots.txt");
    }

    #[test]
    fn page_seo_prefers_entity_values() {
        let seo = page_seo(
            &site(),
            SeoFields {
                h1: "Трубы",
                name: "ignored",
                seo_title: "Custom title",
                seo_description: "Custom description",
                seo_text: "<p>x</p>",
            },
        );
        assert_eq!(seo.h1, "Трубы");
        assert_eq!(seo.title, "Custom title");
        assert_eq!(seo.description, "Custom description");
        assert_eq!(seo.seo_text, "<p>x</p>");
    }

    #[test]
    fn page_seo_generates_fallbacks() {
        let seo = page_seo(
            &site(),
            SeoFields {
                name: "Изопрофлекс",
                ..Default::default()
            },
        );
        assert_eq!(seo.h1, "Изопрофлекс");
        assert_eq!(
            seo.title,
            "Изопрофлекс — купить, цена, характеристики | ГлавТрубТорг"
        );
        assert!(seo.description.contains("Изопрофлекс"));
        assert!(seo.description.ends_with("ГлавТрубТорг."));
    }

    #[test]
    fn section_seo_override() {
        let seo = section_seo(
            "",
            "Own description",
            "",
            ("T".into(), "D".into(), "H".into()),
        );
        assert_eq!(seo.title, "T");
        assert_eq!(seo.description, "Own description");
        assert_eq!(seo.h1, "H");
    }

    #[test]
    fn og_tags_include_absolute_image() {
        let s = site();
        let tags = og_tags(&s, "t", "d", "https://glavtrubtorg.ru/", Some("/static/a.jpg"));
        assert_eq!(tags.len(), 6);
        assert_eq!(
            tags.last().unwrap(),
            &("og:image", "https://glavtrubtorg.ru/static/a.jpg".to_string())
        );
        assert_eq!(og_tags(&s, "t", "d", "u", None).len(), 5);
    }

    #[test]
    fn breadcrumbs_start_at_home() {
        let crumbs = breadcrumbs([Breadcrumb::current("Новости")]);
        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs[0].url.as_deref(), Some("/"));
        assert_eq!(crumbs[1].url, None);
    }
}
