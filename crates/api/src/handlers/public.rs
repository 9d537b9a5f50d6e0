//! Public storefront pages, the contact form and its captcha.
//!
//! Pages are JSON view models; a front-end renders them. Catalog URLs are
//! hierarchical and slug-based:
//!
//! ```text
//! /{category}/                      category with its product lines
//! /{category}/{line}/               product line with sizes, gallery, accessories
//! /{category}/{line}/{size_slug}/   size item with filtered accessory tables
//! ```
//!
//! Published static pages take precedence over catalog URLs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use glavtrub_core::captcha::{generate_captcha, honeypot_is_clean, verify_captcha, Captcha};
use glavtrub_core::catalog::sort_by_size;
use glavtrub_core::csv_import::SizeItemSpecs;
use glavtrub_core::error::CoreError;
use glavtrub_core::schema_org::{organization_jsonld, product_jsonld, ProductFacts};
use glavtrub_core::seo::{
    breadcrumbs, page_seo, section_seo, Breadcrumb, PageSeo, SeoFields, SiteInfo,
};
use glavtrub_core::size_spec::matching_accessories;
use glavtrub_core::slug::is_reserved_slug;
use glavtrub_db::models::category::Category;
use glavtrub_db::models::gallery_image::{main_image, GalleryImage, GalleryOwner};
use glavtrub_db::models::lead::{CreateLead, UtmParams};
use glavtrub_db::models::news::News;
use glavtrub_db::models::page::Page;
use glavtrub_db::models::product_line::ProductLine;
use glavtrub_db::models::service::Service;
use glavtrub_db::models::site_section::SiteSection;
use glavtrub_db::models::size_item::{EffectivePricing, SizeItem};
use glavtrub_db::repositories::{
    AccessoryBlockRepo, CategoryRepo, GalleryImageRepo, LeadRepo, MenuItemRepo, NewsRepo,
    PageRepo, ProductLineRepo, ServiceRepo, SiteSectionRepo, SizeItemRepo,
};
use glavtrub_db::DbPool;
use glavtrub_events::{LeadNotice, SiteEvent};
use serde::{Deserialize, Serialize};

use super::pages::normalize_url_path;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{
    slides, AccessoryView, GallerySlide, Hero, MenuLink, Meta, PublicPage, SizeItemCard,
};

const HOME_NEWS_LIMIT: i64 = 6;
const HOME_SERVICES_LIMIT: usize = 4;

fn page_not_found() -> AppError {
    AppError::NotFound("Page".into())
}

/// Wrap a body into the storefront envelope with the current menu.
async fn render<T: Serialize>(
    state: &AppState,
    view: &'static str,
    meta: Meta,
    hero: Option<Hero>,
    body: T,
) -> AppResult<Json<PublicPage<T>>> {
    let menu = MenuItemRepo::list_active(&state.pool).await?;
    Ok(Json(PublicPage {
        view,
        site_name: state.config.site.name.clone(),
        menu: menu.iter().map(MenuLink::from).collect(),
        meta,
        hero,
        body,
    }))
}

// ---------------------------------------------------------------------------
// Hero and SEO helpers
// ---------------------------------------------------------------------------

async fn hero_for_url(pool: &DbPool, url: &str) -> AppResult<Option<Hero>> {
    let item = MenuItemRepo::find_active_by_url(pool, url).await?;
    Ok(item.and_then(|m| Hero::from_parts(&m.hero_image, &m.hero_title, &m.hero_subtitle, &m.title)))
}

fn hero_for_section(section: Option<&SiteSection>) -> Option<Hero> {
    section.and_then(|s| Hero::from_parts(&s.hero_image, &s.hero_title, &s.hero_subtitle, &s.title))
}

/// Section banner, else the banner of the menu item pointing at `url`.
async fn listing_hero(
    pool: &DbPool,
    section: Option<&SiteSection>,
    url: &str,
) -> AppResult<Option<Hero>> {
    match hero_for_section(section) {
        Some(hero) => Ok(Some(hero)),
        None => hero_for_url(pool, url).await,
    }
}

/// Own hero image, else the main image, both titled after the entity.
fn entity_hero(hero_image: &str, image_path: &str, hero_title: &str, subtitle: &str, name: &str) -> Option<Hero> {
    Hero::from_parts(hero_image, hero_title, subtitle, name)
        .or_else(|| Hero::from_parts(image_path, hero_title, subtitle, name))
}

/// Share image: the entity's own image, else its main gallery picture.
fn share_image(own: &str, gallery: &[GalleryImage]) -> Option<String> {
    if !own.trim().is_empty() {
        return Some(own.to_string());
    }
    main_image(gallery).map(GalleryImage::watermarked_url)
}

fn listing_seo(section: Option<&SiteSection>, fallback: (String, String, String)) -> PageSeo {
    match section {
        Some(s) => {
            let mut seo = section_seo(&s.seo_title, &s.seo_description, &s.h1, fallback);
            seo.seo_text = s.seo_text_html.clone();
            seo
        }
        None => section_seo("", "", "", fallback),
    }
}

fn size_item_name(line: &ProductLine, item: &SizeItem) -> String {
    if item.full_name.trim().is_empty() {
        format!("{} {}", line.name, item.size_text)
    } else {
        item.full_name.clone()
    }
}

/// Metadata for a size item page. The title doubles as the heading.
fn size_item_seo(site: &SiteInfo, line: &ProductLine, item: &SizeItem) -> PageSeo {
    let name = size_item_name(line, item);
    let subject = if item.full_name.trim().is_empty() {
        line.name.as_str()
    } else {
        item.full_name.as_str()
    };
    PageSeo {
        description: format!(
            "Купить {subject} {}. Цена, характеристики, наличие. {}.",
            item.size_text, site.name
        ),
        title: name.clone(),
        h1: name,
        seo_text: String::new(),
    }
}

// ---------------------------------------------------------------------------
// Home and listings
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HomeBody {
    pub section: Option<SiteSection>,
    pub news: Vec<News>,
    pub categories: Vec<Category>,
    pub services: Vec<Service>,
    pub gallery: Vec<GallerySlide>,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let site = &state.config.site;

    let section = SiteSectionRepo::find_by_key(pool, "index").await?;
    let news = NewsRepo::list_published(pool, Some(HOME_NEWS_LIMIT)).await?;
    let categories = CategoryRepo::list_active(pool).await?;
    let mut services = ServiceRepo::list_active(pool).await?;
    services.truncate(HOME_SERVICES_LIMIT);
    let gallery = GalleryImageRepo::list_for_owner(pool, GalleryOwner::Home, None).await?;

    let seo = listing_seo(
        section.as_ref(),
        (
            format!("{} — трубы, изоляция, комплектующие", site.name),
            format!(
                "{} — продажа труб, изоляционных материалов и комплектующих. Доставка по России.",
                site.name
            ),
            format!("Добро пожаловать в {}", site.name),
        ),
    );
    let meta = Meta::new(site, seo, "/", Vec::new(), None).with_jsonld(organization_jsonld(site));
    let hero = hero_for_section(section.as_ref());

    render(
        &state,
        "home",
        meta,
        hero,
        HomeBody {
            section,
            news,
            categories,
            services,
            gallery: slides(&gallery),
        },
    )
    .await
}

#[derive(Debug, Serialize)]
pub struct CatalogBody {
    pub section: Option<SiteSection>,
    pub categories: Vec<Category>,
}

/// GET /catalog/
pub async fn catalog(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let site = &state.config.site;

    let section = SiteSectionRepo::find_by_key(pool, "catalog").await?;
    let categories = CategoryRepo::list_active(pool).await?;

    let seo = listing_seo(
        section.as_ref(),
        (
            format!("Каталог продукции — {}", site.name),
            format!("Каталог продукции {}. Трубы, изоляция, комплектующие.", site.name),
            "Каталог продукции".to_string(),
        ),
    );
    let crumbs = breadcrumbs([Breadcrumb::current("Каталог")]);
    let meta = Meta::new(site, seo, "/catalog/", crumbs, None);
    let hero = listing_hero(pool, section.as_ref(), "/catalog/").await?;

    render(&state, "catalog", meta, hero, CatalogBody { section, categories }).await
}

#[derive(Debug, Serialize)]
pub struct ServicesBody {
    pub section: Option<SiteSection>,
    pub services: Vec<Service>,
}

/// GET /services/
pub async fn services(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let site = &state.config.site;

    let section = SiteSectionRepo::find_by_key(pool, "services").await?;
    let services = ServiceRepo::list_active(pool).await?;

    let seo = listing_seo(
        section.as_ref(),
        (
            format!("Услуги — {}", site.name),
            format!(
                "Услуги компании {}. Доставка, монтаж и другие сервисы.",
                site.name
            ),
            "Наши услуги".to_string(),
        ),
    );
    let crumbs = breadcrumbs([Breadcrumb::current("Услуги")]);
    let meta = Meta::new(site, seo, "/services/", crumbs, None);
    let hero = listing_hero(pool, section.as_ref(), "/services/").await?;

    render(&state, "services", meta, hero, ServicesBody { section, services }).await
}

#[derive(Debug, Serialize)]
pub struct ServiceBody {
    pub service: Service,
    pub gallery: Vec<GallerySlide>,
}

/// GET /services/{slug}/
pub async fn service_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let site = &state.config.site;

    let service = ServiceRepo::find_active_by_slug(pool, &slug)
        .await?
        .ok_or_else(page_not_found)?;
    let gallery =
        GalleryImageRepo::list_for_owner(pool, GalleryOwner::Service, Some(service.id)).await?;

    let seo = page_seo(
        site,
        SeoFields {
            h1: &service.h1,
            name: &service.title,
            seo_title: &service.seo_title,
            seo_description: &service.seo_description,
            seo_text: &service.seo_text_html,
        },
    );
    let crumbs = breadcrumbs([
        Breadcrumb::link("Услуги", "/services/"),
        Breadcrumb::current(service.title.clone()),
    ]);
    let path = format!("/services/{}/", service.slug);
    let image = share_image(&service.image_path, &gallery);
    let meta = Meta::new(site, seo, &path, crumbs, image.as_deref());

    let hero = match entity_hero(
        &service.hero_image,
        &service.image_path,
        &service.hero_title,
        &service.hero_subtitle,
        &service.title,
    ) {
        Some(hero) => Some(hero),
        None => {
            let section = SiteSectionRepo::find_by_key(pool, "services").await?;
            hero_for_section(section.as_ref())
        }
    };

    render(
        &state,
        "service",
        meta,
        hero,
        ServiceBody {
            service,
            gallery: slides(&gallery),
        },
    )
    .await
}

#[derive(Debug, Serialize)]
pub struct NewsListBody {
    pub news: Vec<News>,
}

/// GET /news/
pub async fn news_list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let site = &state.config.site;

    let section = SiteSectionRepo::find_by_key(pool, "news").await?;
    let news = NewsRepo::list_published(pool, None).await?;

    let seo = listing_seo(
        section.as_ref(),
        (
            format!("Новости — {}", site.name),
            format!("Новости компании {}", site.name),
            "Новости".to_string(),
        ),
    );
    let crumbs = breadcrumbs([Breadcrumb::current("Новости")]);
    let meta = Meta::new(site, seo, "/news/", crumbs, None);
    let hero = listing_hero(pool, section.as_ref(), "/news/").await?;

    render(&state, "news_list", meta, hero, NewsListBody { news }).await
}

#[derive(Debug, Serialize)]
pub struct NewsBody {
    pub news: News,
}

/// GET /news/{slug}/
pub async fn news_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let site = &state.config.site;
    let news = NewsRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(page_not_found)?;

    let seo = page_seo(
        site,
        SeoFields {
            h1: &news.h1,
            name: &news.title,
            seo_title: &news.seo_title,
            seo_description: &news.seo_description,
            seo_text: &news.seo_text_html,
        },
    );
    let crumbs = breadcrumbs([
        Breadcrumb::link("Новости", "/news/"),
        Breadcrumb::current(news.title.clone()),
    ]);
    let path = format!("/news/{}/", news.slug);
    let meta = Meta::new(site, seo, &path, crumbs, None);

    render(&state, "news", meta, None, NewsBody { news }).await
}

// ---------------------------------------------------------------------------
// Catch-all: static pages and the catalog tree
// ---------------------------------------------------------------------------

/// GET /{*path}
///
/// A published page whose `url_path` matches wins; otherwise up to three
/// segments are resolved as category / product line / size item.
pub async fn resolve_path(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> AppResult<Response> {
    let url_path = normalize_url_path(&path);

    if let Some(page) = PageRepo::find_published_by_url(&state.pool, &url_path).await? {
        return render_page(&state, page).await;
    }

    let parts: Vec<&str> = url_path.split('/').filter(|p| !p.is_empty()).collect();
    let Some((&category_slug, rest)) = parts.split_first() else {
        return Err(page_not_found());
    };
    if rest.len() > 2 || is_reserved_slug(category_slug) {
        return Err(page_not_found());
    }

    let category = CategoryRepo::find_active_by_slug(&state.pool, category_slug)
        .await?
        .ok_or_else(page_not_found)?;
    let Some((&line_slug, rest)) = rest.split_first() else {
        return render_category(&state, category).await;
    };

    let line = ProductLineRepo::find_active_by_slug(&state.pool, category.id, line_slug)
        .await?
        .ok_or_else(page_not_found)?;
    match rest.first() {
        None => render_product_line(&state, category, line).await,
        Some(&size_slug) => {
            let item = SizeItemRepo::find_by_slug(&state.pool, line.id, size_slug)
                .await?
                .ok_or_else(page_not_found)?;
            render_size_item(&state, category, line, item).await
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageBody {
    pub page: Page,
}

async fn render_page(state: &AppState, page: Page) -> AppResult<Response> {
    let site = &state.config.site;
    let seo = page_seo(
        site,
        SeoFields {
            h1: &page.h1,
            name: &page.title,
            seo_title: &page.seo_title,
            seo_description: &page.seo_description,
            seo_text: &page.seo_text_html,
        },
    );
    let crumbs = breadcrumbs([Breadcrumb::current(page.title.clone())]);
    let meta = Meta::new(site, seo, &page.url_path, crumbs, None);
    let hero = match Hero::from_parts(
        &page.hero_image,
        &page.hero_title,
        &page.hero_subtitle,
        &page.title,
    ) {
        Some(hero) => Some(hero),
        None => hero_for_url(&state.pool, &page.url_path).await?,
    };

    Ok(render(state, "page", meta, hero, PageBody { page })
        .await?
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct CategoryBody {
    pub category: Category,
    pub product_lines: Vec<ProductLine>,
}

async fn render_category(state: &AppState, category: Category) -> AppResult<Response> {
    let site = &state.config.site;
    let product_lines = ProductLineRepo::list_active_by_category(&state.pool, category.id).await?;

    let seo = page_seo(
        site,
        SeoFields {
            h1: &category.h1,
            name: &category.name,
            seo_title: &category.seo_title,
            seo_description: &category.seo_description,
            seo_text: &category.seo_text_html,
        },
    );
    let crumbs = breadcrumbs([
        Breadcrumb::link("Каталог", "/catalog/"),
        Breadcrumb::current(category.name.clone()),
    ]);
    let meta = Meta::new(site, seo, &category.url_path(), crumbs, Some(&category.image_path));
    let hero = entity_hero(
        &category.hero_image,
        &category.image_path,
        &category.hero_title,
        &category.hero_subtitle,
        &category.name,
    );

    Ok(render(
        state,
        "category",
        meta,
        hero,
        CategoryBody {
            category,
            product_lines,
        },
    )
    .await?
    .into_response())
}

#[derive(Debug, Serialize)]
pub struct ProductLineBody {
    pub category: Category,
    pub product_line: ProductLine,
    pub size_items: Vec<SizeItemCard>,
    pub gallery: Vec<GallerySlide>,
    pub accessory_blocks: Vec<AccessoryView>,
}

fn line_path(category: &Category, line: &ProductLine) -> String {
    format!("/{}/{}/", category.slug, line.slug)
}

async fn render_product_line(
    state: &AppState,
    category: Category,
    line: ProductLine,
) -> AppResult<Response> {
    let pool = &state.pool;
    let site = &state.config.site;
    let path = line_path(&category, &line);

    let mut items = SizeItemRepo::list_by_line(pool, line.id).await?;
    sort_by_size(&mut items, |i| i.size_text.as_str());
    let size_items = items
        .into_iter()
        .map(|item| SizeItemCard {
            url: format!("{path}{}/", item.size_slug),
            pricing: item.pricing(&line),
            item,
        })
        .collect();

    let gallery =
        GalleryImageRepo::list_for_owner(pool, GalleryOwner::ProductLine, Some(line.id)).await?;
    let accessory_blocks = AccessoryBlockRepo::list_by_line(pool, line.id)
        .await?
        .iter()
        .filter(|b| b.is_active)
        .map(|b| AccessoryView::new(b, b.table_html.clone()))
        .collect();

    let seo = page_seo(
        site,
        SeoFields {
            h1: &line.h1,
            name: &line.name,
            seo_title: &line.seo_title,
            seo_description: &line.seo_description,
            seo_text: &line.seo_text_html,
        },
    );
    let crumbs = breadcrumbs([
        Breadcrumb::link("Каталог", "/catalog/"),
        Breadcrumb::link(category.name.clone(), category.url_path()),
        Breadcrumb::current(line.name.clone()),
    ]);
    let image = share_image(&line.image_path, &gallery);
    let meta = Meta::new(site, seo, &path, crumbs, image.as_deref());
    let hero = Hero::from_parts(&line.hero_image, &line.hero_title, &line.hero_subtitle, &line.name);

    Ok(render(
        state,
        "product_line",
        meta,
        hero,
        ProductLineBody {
            category,
            product_line: line,
            size_items,
            gallery: slides(&gallery),
            accessory_blocks,
        },
    )
    .await?
    .into_response())
}

#[derive(Debug, Serialize)]
pub struct SizeItemBody {
    pub category: Category,
    pub product_line: ProductLine,
    pub size_item: SizeItem,
    pub pricing: EffectivePricing,
    pub specs: SizeItemSpecs,
    /// Accessory blocks whose tables have rows for this size, filtered to
    /// those rows.
    pub accessories: Vec<AccessoryView>,
}

async fn render_size_item(
    state: &AppState,
    category: Category,
    line: ProductLine,
    item: SizeItem,
) -> AppResult<Response> {
    let site = &state.config.site;
    let path = format!("{}{}/", line_path(&category, &line), item.size_slug);

    let blocks = AccessoryBlockRepo::list_by_line(&state.pool, line.id).await?;
    let accessories = matching_accessories(&item.size_text, &blocks)
        .into_iter()
        .map(|m| AccessoryView::new(m.block, m.filtered_table))
        .collect();

    let name = size_item_name(&line, &item);
    let description = format!("{} размер {}", line.name, item.size_text);
    let image = [&item.image_path, &line.image_path, &category.image_path]
        .into_iter()
        .find(|p| !p.is_empty())
        .map(String::as_str);
    let product = product_jsonld(
        site,
        &ProductFacts {
            name: &name,
            sku: &item.sku,
            brand: &category.name,
            description: &description,
            path: &path,
            price: item.price,
            currency: &item.currency,
            in_stock: item.in_stock,
            image,
        },
    );

    let seo = size_item_seo(site, &line, &item);
    let crumbs = breadcrumbs([
        Breadcrumb::link("Каталог", "/catalog/"),
        Breadcrumb::link(category.name.clone(), category.url_path()),
        Breadcrumb::link(line.name.clone(), line_path(&category, &line)),
        Breadcrumb::current(item.size_text.clone()),
    ]);
    let meta = Meta::new(site, seo, &path, crumbs, image).with_jsonld(product);

    let body = SizeItemBody {
        pricing: item.pricing(&line),
        specs: item.specs(),
        category,
        product_line: line,
        size_item: item,
        accessories,
    };
    Ok(render(state, "size_item", meta, None, body)
        .await?
        .into_response())
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

/// GET /captcha/
///
/// A fresh arithmetic question. The token goes back with the form.
pub async fn captcha(State(state): State<AppState>) -> Json<DataResponse<Captcha>> {
    let now = chrono::Utc::now().timestamp();
    Json(DataResponse {
        data: generate_captcha(&state.config.captcha_secret, now),
    })
}

/// Request body for `POST /lead/`.
#[derive(Debug, Deserialize)]
pub struct LeadForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub page_url: String,
    #[serde(flatten)]
    pub utm: UtmParams,
    #[serde(default)]
    pub captcha_answer: String,
    #[serde(default)]
    pub captcha_token: String,
    /// Honeypot; must stay empty.
    pub website: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeadAccepted {
    pub message: &'static str,
}

const LEAD_ACCEPTED: &str =
    "Заявка успешно отправлена! Мы свяжемся с вами в ближайшее время.";

fn validate_lead(form: &LeadForm) -> Result<(), CoreError> {
    if form.name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    if form.phone.trim().is_empty() && form.email.trim().is_empty() {
        return Err(CoreError::Validation(
            "Provide a phone number or an email".into(),
        ));
    }
    Ok(())
}

/// POST /lead/
///
/// Stores the lead and hands it to the notification dispatcher. Submissions
/// that fill the honeypot get the same answer but are dropped.
pub async fn submit_lead(
    State(state): State<AppState>,
    Json(form): Json<LeadForm>,
) -> AppResult<impl IntoResponse> {
    let accepted = (
        StatusCode::CREATED,
        Json(DataResponse {
            data: LeadAccepted {
                message: LEAD_ACCEPTED,
            },
        }),
    );

    if !honeypot_is_clean(form.website.as_deref()) {
        tracing::warn!(page_url = %form.page_url, "Lead dropped by honeypot");
        return Ok(accepted);
    }

    let now = chrono::Utc::now().timestamp();
    if !verify_captcha(
        &state.config.captcha_secret,
        &form.captcha_answer,
        &form.captcha_token,
        now,
    ) {
        return Err(CoreError::Validation("Incorrect captcha answer".into()).into());
    }
    validate_lead(&form)?;

    let input = CreateLead {
        name: form.name.trim().to_string(),
        phone: form.phone.trim().to_string(),
        email: form.email.trim().to_string(),
        message: form.message.trim().to_string(),
        source: Some("site".into()),
        page_url: form.page_url,
        utm: form.utm,
    };
    let lead = LeadRepo::create(&state.pool, &input).await?;

    tracing::info!(lead_id = lead.id, source = %lead.source, "Lead submitted");
    state
        .event_bus
        .publish(SiteEvent::LeadSubmitted(LeadNotice::from(&lead)));

    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form(json: serde_json::Value) -> LeadForm {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn lead_form_collects_utm_params() {
        let form = form(serde_json::json!({
            "name": "Иван",
            "phone": "+7 900",
            "utm_source": "yandex",
            "utm_campaign": "pipes",
            "captcha_answer": "7",
            "captcha_token": "t",
        }));
        assert_eq!(form.utm.utm_source, "yandex");
        assert_eq!(form.utm.utm_campaign, "pipes");
        assert!(form.website.is_none());
    }

    #[test]
    fn lead_needs_name_and_a_contact() {
        assert_matches!(
            validate_lead(&form(serde_json::json!({ "phone": "1" }))),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_lead(&form(serde_json::json!({ "name": "Иван" }))),
            Err(CoreError::Validation(_))
        );
        assert!(validate_lead(&form(serde_json::json!({ "name": "Иван", "email": "a@b.ru" }))).is_ok());
    }

    #[test]
    fn entity_hero_falls_back_to_main_image() {
        let hero = entity_hero("", "/static/cat.jpg", "", "sub", "Трубы").unwrap();
        assert_eq!(hero.image, "/static/cat.jpg");
        assert_eq!(hero.title, "Трубы");
        assert!(entity_hero("", "", "T", "", "Трубы").is_none());
    }

    #[test]
    fn listing_seo_uses_fallback_without_section() {
        let fallback = || ("T".to_string(), "D".to_string(), "H".to_string());
        let seo = listing_seo(None, fallback());
        assert_eq!((seo.title.as_str(), seo.h1.as_str()), ("T", "H"));
    }
}
