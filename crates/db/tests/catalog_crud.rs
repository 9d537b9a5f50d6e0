//! Catalog hierarchy against a real database:
//! categories -> product lines -> size items / accessory blocks.

use glavtrub_core::csv_import::SizeItemSpecs;
use glavtrub_core::size_spec::matching_accessories;
use glavtrub_db::models::accessory_block::CreateAccessoryBlock;
use glavtrub_db::models::category::CreateCategory;
use glavtrub_db::models::product_line::CreateProductLine;
use glavtrub_db::models::size_item::{CreateSizeItem, UpdateSizeItem};
use glavtrub_db::repositories::{
    AccessoryBlockRepo, CategoryRepo, ProductLineRepo, SizeItemRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        slug: None,
        description_html: None,
        image_path: None,
        seo_title: None,
        seo_description: None,
        h1: None,
        seo_text_html: None,
        hero_image: None,
        hero_title: None,
        hero_subtitle: None,
        sort_order: None,
        is_active: None,
    }
}

fn new_line(category_id: i64, name: &str, discount: f64) -> CreateProductLine {
    CreateProductLine {
        category_id,
        name: name.to_string(),
        slug: None,
        description_html: None,
        image_path: None,
        seo_title: None,
        seo_description: None,
        h1: None,
        seo_text_html: None,
        hero_image: None,
        hero_title: None,
        hero_subtitle: None,
        gallery_interval: None,
        discount_percent: Some(discount),
        hide_price: None,
        sort_order: None,
        is_active: None,
    }
}

fn new_size(product_line_id: i64, size_text: &str, price: f64) -> CreateSizeItem {
    CreateSizeItem {
        product_line_id,
        size_text: size_text.to_string(),
        size_slug: None,
        full_name: None,
        sku: None,
        price: Some(price),
        currency: None,
        unit: None,
        in_stock: None,
        image_path: None,
        discount_percent: None,
        hide_price: None,
        specs: SizeItemSpecs::default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_hierarchy_and_cascade(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("Трубы ППУ"), "ppu")
        .await
        .unwrap();
    assert!(category.is_active);
    assert_eq!(category.url_path(), "/ppu/");

    let line = ProductLineRepo::create(&pool, &new_line(category.id, "Изопрофлекс", 0.0), "izoprofleks")
        .await
        .unwrap();
    assert_eq!(line.gallery_interval, 5);

    let item = SizeItemRepo::create(&pool, &new_size(line.id, "32/75", 100.0), "32_75")
        .await
        .unwrap();
    assert_eq!(item.currency, "RUB");
    assert_eq!(item.unit, "шт");

    assert!(CategoryRepo::delete(&pool, category.id).await.unwrap());
    assert!(ProductLineRepo::find_by_id(&pool, line.id).await.unwrap().is_none());
    assert!(SizeItemRepo::find_by_id(&pool, item.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_line_slug_unique_per_category(pool: PgPool) {
    let a = CategoryRepo::create(&pool, &new_category("A"), "a").await.unwrap();
    let b = CategoryRepo::create(&pool, &new_category("B"), "b").await.unwrap();

    ProductLineRepo::create(&pool, &new_line(a.id, "Line", 0.0), "line").await.unwrap();
    ProductLineRepo::create(&pool, &new_line(b.id, "Line", 0.0), "line").await.unwrap();

    let err = ProductLineRepo::create(&pool, &new_line(a.id, "Line", 0.0), "line")
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_product_lines_category_slug"));

    assert!(ProductLineRepo::slug_taken(&pool, a.id, "line", None).await.unwrap());
    assert!(!ProductLineRepo::slug_taken(&pool, a.id, "other", None).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_size_items_sorted_and_priced(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("C"), "c").await.unwrap();
    let line = ProductLineRepo::create(&pool, &new_line(category.id, "L", 10.0), "l")
        .await
        .unwrap();

    for (text, slug) in [("110/200", "110_200"), ("25/90", "25_90"), ("63/140", "63_140")] {
        SizeItemRepo::create(&pool, &new_size(line.id, text, 1000.0), slug)
            .await
            .unwrap();
    }
    let items = SizeItemRepo::list_by_line(&pool, line.id).await.unwrap();
    let order: Vec<&str> = items.iter().map(|i| i.size_text.as_str()).collect();
    assert_eq!(order, ["25/90", "63/140", "110/200"]);

    let item = &items[0];
    assert_eq!(item.pricing(&line).display_price, 900.0);

    let patched = SizeItemRepo::update(
        &pool,
        item.id,
        &UpdateSizeItem {
            discount_percent: Some(50.0),
            hide_price: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    let pricing = patched.pricing(&line);
    assert_eq!(pricing.display_price, 500.0);
    assert!(pricing.hide_price);

    let reverted = SizeItemRepo::update(
        &pool,
        item.id,
        &UpdateSizeItem {
            inherit_pricing: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(reverted.discount_percent, None);
    assert_eq!(reverted.hide_price, None);
    assert_eq!(reverted.pricing(&line).display_price, 900.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_accessory_blocks_match_size(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("C"), "c").await.unwrap();
    let line = ProductLineRepo::create(&pool, &new_line(category.id, "L", 0.0), "l")
        .await
        .unwrap();

    let table = "<table><tr><th>Размер</th><th>Артикул</th></tr>\
                 <tr><td>32</td><td>A-32</td></tr>\
                 <tr><td>40</td><td>A-40</td></tr></table>";
    AccessoryBlockRepo::create(
        &pool,
        &CreateAccessoryBlock {
            product_line_id: line.id,
            name: "Муфты".into(),
            description_html: None,
            image_path: None,
            table_html: Some(table.into()),
            use_outer_diameter: None,
            sort_order: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let blocks = AccessoryBlockRepo::list_by_line(&pool, line.id).await.unwrap();
    let matched = matching_accessories("32/75", &blocks);
    assert_eq!(matched.len(), 1);
    assert!(matched[0].filtered_table.contains("A-32"));
    assert!(!matched[0].filtered_table.contains("A-40"));
}
