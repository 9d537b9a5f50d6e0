//! `sitemap.xml` and `robots.txt`.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use glavtrub_core::sitemap::{render_robots, render_sitemap, SitemapEntry};
use glavtrub_db::repositories::{
    CategoryRepo, NewsRepo, PageRepo, ProductLineRepo, ServiceRepo, SizeItemRepo,
};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /sitemap.xml
///
/// Published pages, the fixed listings, the whole active catalog tree,
/// services and published news.
pub async fn sitemap(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let site = &state.config.site;
    let url = |path: &str| site.canonical_url(path);

    let mut entries = Vec::new();

    for page in PageRepo::list_published(pool).await? {
        entries.push(
            SitemapEntry::new(url(&page.url_path), 0.8)
                .with_lastmod(Some(page.updated_at.date_naive())),
        );
    }
    entries.push(SitemapEntry::new(url("/"), 1.0));
    entries.push(SitemapEntry::new(url("/catalog/"), 0.9));
    entries.push(SitemapEntry::new(url("/news/"), 0.7));
    entries.push(SitemapEntry::new(url("/services/"), 0.7));

    for category in CategoryRepo::list_active(pool).await? {
        entries.push(SitemapEntry::new(url(&category.url_path()), 0.8));

        for line in ProductLineRepo::list_active_by_category(pool, category.id).await? {
            let line_path = format!("/{}/{}/", category.slug, line.slug);
            entries.push(SitemapEntry::new(url(&line_path), 0.7));

            for item in SizeItemRepo::list_by_line(pool, line.id).await? {
                entries.push(
                    SitemapEntry::new(url(&format!("{line_path}{}/", item.size_slug)), 0.6)
                        .with_lastmod(Some(item.updated_at.date_naive())),
                );
            }
        }
    }

    for service in ServiceRepo::list_active(pool).await? {
        entries.push(
            SitemapEntry::new(url(&format!("/services/{}/", service.slug)), 0.6)
                .with_lastmod(Some(service.updated_at.date_naive())),
        );
    }

    for news in NewsRepo::list_published(pool, None).await? {
        entries.push(
            SitemapEntry::new(url(&format!("/news/{}/", news.slug)), 0.5)
                .with_lastmod(Some(news.date)),
        );
    }

    tracing::debug!(entries = entries.len(), "Sitemap rendered");

    Ok((
        [(CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&entries),
    ))
}

/// GET /robots.txt
pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&state.config.site),
    )
}
