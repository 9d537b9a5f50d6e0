//! Persists parsed CSV imports.
//!
//! Each import runs in one transaction with a savepoint per row, so a row
//! that fails in the database is reported and skipped without losing the
//! rows around it. Existing records are matched by slug and overwritten.

use std::collections::HashSet;

use glavtrub_core::catalog::size_full_name;
use glavtrub_core::csv_import::{
    CategoryRow, ImportReport, NewsRow, Parsed, ProductLineRow, SizeItemRow,
};
use glavtrub_core::slug::make_unique_slug;
use glavtrub_core::types::DbId;
use sqlx::{Connection, PgConnection, PgPool};

pub struct ImportRepo;

impl ImportRepo {
    pub async fn import_categories(
        pool: &PgPool,
        parsed: &Parsed<CategoryRow>,
    ) -> Result<ImportReport, sqlx::Error> {
        let mut report = parsed.report();
        let mut tx = pool.begin().await?;

        for (line, row) in &parsed.rows {
            let mut sp = Connection::begin(&mut *tx).await?;
            match upsert_category(&mut sp, row).await {
                Ok(()) => {
                    sp.commit().await?;
                    report.success += 1;
                }
                Err(e) => {
                    sp.rollback().await?;
                    report.row_error(*line, e);
                }
            }
        }

        tx.commit().await?;
        log_report("categories", &report);
        Ok(report)
    }

    pub async fn import_product_lines(
        pool: &PgPool,
        parsed: &Parsed<ProductLineRow>,
    ) -> Result<ImportReport, sqlx::Error> {
        let mut report = parsed.report();
        let mut tx = pool.begin().await?;

        for (line, row) in &parsed.rows {
            let Some(category_id) = category_id(&mut tx, &row.category_slug).await? else {
                report.row_error(*line, format!("category {} not found", row.category_slug));
                continue;
            };
            let mut sp = Connection::begin(&mut *tx).await?;
            match upsert_product_line(&mut sp, category_id, row).await {
                Ok(()) => {
                    sp.commit().await?;
                    report.success += 1;
                }
                Err(e) => {
                    sp.rollback().await?;
                    report.row_error(*line, e);
                }
            }
        }

        tx.commit().await?;
        log_report("product_lines", &report);
        Ok(report)
    }

    pub async fn import_size_items(
        pool: &PgPool,
        parsed: &Parsed<SizeItemRow>,
    ) -> Result<ImportReport, sqlx::Error> {
        let mut report = parsed.report();
        let mut tx = pool.begin().await?;

        for (line, row) in &parsed.rows {
            let Some(category_id) = category_id(&mut tx, &row.category_slug).await? else {
                report.row_error(*line, format!("category {} not found", row.category_slug));
                continue;
            };
            let line_row: Option<(DbId, String)> = sqlx::query_as(
                "SELECT id, name FROM product_lines WHERE category_id = $1 AND slug = $2",
            )
            .bind(category_id)
            .bind(&row.product_slug)
            .fetch_optional(&mut *tx)
            .await?;
            let Some((line_id, line_name)) = line_row else {
                report.row_error(*line, format!("product line {} not found", row.product_slug));
                continue;
            };

            let mut sp = Connection::begin(&mut *tx).await?;
            match upsert_size_item(&mut sp, line_id, &line_name, row).await {
                Ok(()) => {
                    sp.commit().await?;
                    report.success += 1;
                }
                Err(e) => {
                    sp.rollback().await?;
                    report.row_error(*line, e);
                }
            }
        }

        tx.commit().await?;
        log_report("size_items", &report);
        Ok(report)
    }

    /// Rows without a slug get one generated from the title, made unique
    /// against existing news and earlier rows of the same file.
    pub async fn import_news(
        pool: &PgPool,
        parsed: &Parsed<NewsRow>,
    ) -> Result<ImportReport, sqlx::Error> {
        let mut report = parsed.report();
        let mut tx = pool.begin().await?;

        let rows: Vec<(String,)> = sqlx::query_as("SELECT slug FROM news")
            .fetch_all(&mut *tx)
            .await?;
        let mut slugs: HashSet<String> = rows.into_iter().map(|(s,)| s).collect();

        for (line, row) in &parsed.rows {
            let slug = match &row.slug {
                Some(explicit) => explicit.clone(),
                None => make_unique_slug(&row.base_slug(), &slugs),
            };

            let mut sp = Connection::begin(&mut *tx).await?;
            match upsert_news(&mut sp, &slug, row).await {
                Ok(()) => {
                    sp.commit().await?;
                    slugs.insert(slug);
                    report.success += 1;
                }
                Err(e) => {
                    sp.rollback().await?;
                    report.row_error(*line, e);
                }
            }
        }

        tx.commit().await?;
        log_report("news", &report);
        Ok(report)
    }
}

fn log_report(kind: &str, report: &ImportReport) {
    tracing::info!(
        kind,
        success = report.success,
        errors = report.errors.len(),
        "CSV import finished"
    );
}

async fn category_id(conn: &mut PgConnection, slug: &str) -> Result<Option<DbId>, sqlx::Error> {
    let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM categories WHERE slug = $1")
        .bind(slug)
        .fetch_optional(conn)
        .await?;
    Ok(row.map(|(id,)| id))
}

async fn upsert_category(conn: &mut PgConnection, row: &CategoryRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO categories (slug, name, description_html, image_path, seo_title, \
             seo_description, h1, seo_text_html, sort_order, is_active) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         ON CONFLICT (slug) DO UPDATE SET \
             name = EXCLUDED.name, \
             description_html = EXCLUDED.description_html, \
             image_path = EXCLUDED.image_path, \
             seo_title = EXCLUDED.seo_title, \
             seo_description = EXCLUDED.seo_description, \
             h1 = EXCLUDED.h1, \
             seo_text_html = EXCLUDED.seo_text_html, \
             sort_order = EXCLUDED.sort_order, \
             is_active = EXCLUDED.is_active",
    )
    .bind(&row.slug)
    .bind(&row.name)
    .bind(&row.seo.description_html)
    .bind(&row.seo.image_path)
    .bind(&row.seo.seo_title)
    .bind(&row.seo.seo_description)
    .bind(&row.seo.h1)
    .bind(&row.seo.seo_text_html)
    .bind(row.sort_order)
    .bind(row.is_active)
    .execute(conn)
    .await?;
    Ok(())
}

async fn upsert_product_line(
    conn: &mut PgConnection,
    category_id: DbId,
    row: &ProductLineRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO product_lines (category_id, slug, name, description_html, image_path, \
             seo_title, seo_description, h1, seo_text_html, sort_order, is_active) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         ON CONFLICT (category_id, slug) DO UPDATE SET \
             name = EXCLUDED.name, \
             description_html = EXCLUDED.description_html, \
             image_path = EXCLUDED.image_path, \
             seo_title = EXCLUDED.seo_title, \
             seo_description = EXCLUDED.seo_description, \
             h1 = EXCLUDED.h1, \
             seo_text_html = EXCLUDED.seo_text_html, \
             sort_order = EXCLUDED.sort_order, \
             is_active = EXCLUDED.is_active",
    )
    .bind(category_id)
    .bind(&row.slug)
    .bind(&row.name)
    .bind(&row.seo.description_html)
    .bind(&row.seo.image_path)
    .bind(&row.seo.seo_title)
    .bind(&row.seo.seo_description)
    .bind(&row.seo.h1)
    .bind(&row.seo.seo_text_html)
    .bind(row.sort_order)
    .bind(row.is_active)
    .execute(conn)
    .await?;
    Ok(())
}

async fn upsert_size_item(
    conn: &mut PgConnection,
    product_line_id: DbId,
    line_name: &str,
    row: &SizeItemRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO size_items (product_line_id, size_slug, size_text, full_name, sku, price, \
             currency, unit, in_stock, image_path, pipe_dxs, pressure, mass_per_m, \
             min_bend_radius, max_len_coil, max_len_drum) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
         ON CONFLICT (product_line_id, size_slug) DO UPDATE SET \
             size_text = EXCLUDED.size_text, \
             full_name = EXCLUDED.full_name, \
             sku = EXCLUDED.sku, \
             price = EXCLUDED.price, \
             currency = EXCLUDED.currency, \
             unit = EXCLUDED.unit, \
             in_stock = EXCLUDED.in_stock, \
             image_path = EXCLUDED.image_path, \
             pipe_dxs = EXCLUDED.pipe_dxs, \
             pressure = EXCLUDED.pressure, \
             mass_per_m = EXCLUDED.mass_per_m, \
             min_bend_radius = EXCLUDED.min_bend_radius, \
             max_len_coil = EXCLUDED.max_len_coil, \
             max_len_drum = EXCLUDED.max_len_drum",
    )
    .bind(product_line_id)
    .bind(&row.size_slug)
    .bind(&row.size_text)
    .bind(size_full_name(line_name, &row.size_text))
    .bind(&row.sku)
    .bind(row.price)
    .bind(&row.currency)
    .bind(&row.unit)
    .bind(row.in_stock)
    .bind(&row.image_path)
    .bind(&row.specs.pipe_dxs)
    .bind(&row.specs.pressure)
    .bind(&row.specs.mass_per_m)
    .bind(&row.specs.min_bend_radius)
    .bind(&row.specs.max_len_coil)
    .bind(&row.specs.max_len_drum)
    .execute(conn)
    .await?;
    Ok(())
}

async fn upsert_news(conn: &mut PgConnection, slug: &str, row: &NewsRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO news (slug, title, date, content_html, seo_title, seo_description, h1, \
             is_published) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (slug) DO UPDATE SET \
             title = EXCLUDED.title, \
             date = EXCLUDED.date, \
             content_html = EXCLUDED.content_html, \
             seo_title = EXCLUDED.seo_title, \
             seo_description = EXCLUDED.seo_description, \
             h1 = EXCLUDED.h1, \
             is_published = EXCLUDED.is_published",
    )
    .bind(slug)
    .bind(&row.title)
    .bind(row.date)
    .bind(&row.content)
    .bind(&row.seo_title)
    .bind(&row.seo_description)
    .bind(&row.h1)
    .bind(row.is_published)
    .execute(conn)
    .await?;
    Ok(())
}
