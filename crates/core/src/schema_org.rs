//! schema.org JSON-LD documents embedded in public pages.

use serde_json::{json, Value};

use crate::seo::{Breadcrumb, SiteInfo};

/// Product facts needed for a `Product` document.
#[derive(Debug, Clone, Default)]
pub struct ProductFacts<'a> {
    pub name: &'a str,
    pub sku: &'a str,
    pub brand: &'a str,
    pub description: &'a str,
    /// Site-relative canonical path of the product page.
    pub path: &'a str,
    pub price: f64,
    pub currency: &'a str,
    pub in_stock: bool,
    pub image: Option<&'a str>,
}

/// `Product` with a single `Offer`.
pub fn product_jsonld(site: &SiteInfo, facts: &ProductFacts<'_>) -> Value {
    let availability = if facts.in_stock {
        "https://schema.org/InStock"
    } else {
        "https://schema.org/OutOfStock"
    };
    let price = if facts.price > 0.0 {
        facts.price.to_string()
    } else {
        "0".to_string()
    };
    let currency = if facts.currency.is_empty() {
        "RUB"
    } else {
        facts.currency
    };

    let mut doc = json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": facts.name,
        "sku": facts.sku,
        "brand": { "@type": "Brand", "name": facts.brand },
        "description": facts.description,
        "offers": {
            "@type": "Offer",
            "url": site.absolute_url(facts.path),
            "priceCurrency": currency,
            "price": price,
            "availability": availability,
            "seller": { "@type": "Organization", "name": site.name },
        },
    });
    if let Some(image) = facts.image.filter(|i| !i.is_empty()) {
        doc["image"] = Value::String(site.image_url(image));
    }
    doc
}

/// `BreadcrumbList`; crumbs without a URL get no `item`.
pub fn breadcrumb_jsonld(site: &SiteInfo, crumbs: &[Breadcrumb]) -> Value {
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            let mut item = json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.name,
            });
            if let Some(url) = crumb.url.as_deref() {
                item["item"] = Value::String(site.absolute_url(url));
            }
            item
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// `Organization` for the home page.
pub fn organization_jsonld(site: &SiteInfo) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site.name,
        "url": site.absolute_url("/"),
        "description": "Продажа труб, изоляционных материалов и комплектующих",
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": "sales",
            "availableLanguage": "Russian",
        },
    })
}
