//! Bulk catalog and news import from semicolon-delimited CSV.
//!
//! Parsing is split from persistence: this module turns raw upload bytes into
//! typed rows plus per-row error messages, and the db layer upserts the rows.
//! Row numbers in messages are 1-based file lines, so the first data row is 2.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::default_size_slug;
use crate::error::CoreError;
use crate::slug::generate_slug;

/// What a CSV upload contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Categories,
    ProductLines,
    SizeItems,
    News,
}

impl ImportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::ProductLines => "product_lines",
            Self::SizeItems => "size_items",
            Self::News => "news",
        }
    }

    /// Download file name of the template.
    pub fn template_filename(self) -> String {
        format!("{}_template.csv", self.as_str())
    }

    /// Header line plus one example row.
    pub fn template(self) -> &'static str {
        match self {
            Self::Categories => {
                "name;slug;sort_order;is_active\n\
                 Полиэтиленовые трубы;polietilenovye-truby;1;1\n"
            }
            Self::ProductLines => {
                "category_slug;name;slug;sort_order;is_active\n\
                 polietilenovye-truby;ПЭ 100 SDR 11;pe-100-sdr-11;1;1\n"
            }
            Self::SizeItems => {
                "category_slug;product_slug;size_text;sku;price;unit;in_stock;pipe_dxs;pressure;mass_per_m;min_bend_radius;max_len_coil;max_len_drum\n\
                 polietilenovye-truby;pe-100-sdr-11;32x3.0;PE100-32-3;150.00;м;1;32x3.0;1.0 МПа;0.29;0.5;200;500\n"
            }
            Self::News => "date;content\n15.01.2025;Компания расширила ассортимент продукции\n",
        }
    }
}

impl FromStr for ImportKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "categories" => Ok(Self::Categories),
            "product_lines" | "product-lines" => Ok(Self::ProductLines),
            "size_items" | "size-items" => Ok(Self::SizeItems),
            "news" => Ok(Self::News),
            other => Err(CoreError::Validation(format!("Unknown import kind '{other}'"))),
        }
    }
}

/// Outcome of an import: number of stored rows and one message per failed row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub success: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn row_error(&mut self, line: usize, message: impl std::fmt::Display) {
        self.errors.push(format!("Row {line}: {message}"));
    }
}

/// Rows that parsed, with their file line numbers, and messages for the rest.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub rows: Vec<(usize, T)>,
    pub errors: Vec<String>,
}

impl<T> Parsed<T> {
    /// Start a report seeded with the parse errors.
    pub fn report(&self) -> ImportReport {
        ImportReport {
            success: 0,
            errors: self.errors.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

/// A CSV record addressed by header name.
#[derive(Debug, Clone)]
pub struct CsvRecord {
    pub line: usize,
    fields: HashMap<String, String>,
}

impl CsvRecord {
    /// Trimmed value, empty when the column is absent.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(|v| v.trim()).unwrap_or("")
    }

    /// Value as-is (HTML columns keep their whitespace).
    pub fn raw(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    fn flag(&self, name: &str, default: bool) -> bool {
        match self.fields.get(name) {
            Some(v) => parse_flag(v),
            None => default,
        }
    }

    fn int(&self, name: &str) -> Result<i32, String> {
        let value = self.get(name);
        if value.is_empty() {
            return Ok(0);
        }
        value
            .parse()
            .map_err(|_| format!("invalid integer '{value}' in column {name}"))
    }

    fn or(&self, name: &str, default: &str) -> String {
        match self.fields.get(name) {
            Some(v) => v.trim().to_string(),
            None => default.to_string(),
        }
    }
}

/// `1`, `true` and `yes` (any case) are true, everything else is false.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Price with either `.` or `,` as decimal separator; unparseable is zero.
pub fn parse_price(value: &str) -> f64 {
    value.trim().replace(',', ".").parse().unwrap_or(0.0)
}

/// Decode an upload: UTF-8 with an optional BOM, lossy otherwise.
pub fn decode_csv(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.trim_start_matches('\u{FEFF}').to_string()
}

/// Read all records of a semicolon-delimited file.
///
/// Malformed records are reported as row errors instead of aborting; a file
/// without a readable header fails as a whole.
pub fn read_records(bytes: &[u8]) -> Result<(Vec<CsvRecord>, Vec<String>), CoreError> {
    let text = decode_csv(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CoreError::Validation(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut records = Vec::new();
    let mut errors = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(line);
                let fields = headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(str::to_string))
                    .collect();
                records.push(CsvRecord { line, fields });
            }
            Err(e) => errors.push(format!("Row {line}: {e}")),
        }
    }
    Ok((records, errors))
}

fn parse_all<T>(
    bytes: &[u8],
    parse: impl Fn(&CsvRecord) -> Result<T, String>,
) -> Result<Parsed<T>, CoreError> {
    let (records, mut errors) = read_records(bytes)?;
    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        match parse(record) {
            Ok(row) => rows.push((record.line, row)),
            Err(msg) => errors.push(format!("Row {}: {msg}", record.line)),
        }
    }
    Ok(Parsed { rows, errors })
}

// ---------------------------------------------------------------------------
// Typed rows
// ---------------------------------------------------------------------------

/// SEO columns shared by categories and product lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeoColumns {
    pub description_html: String,
    pub image_path: String,
    pub seo_title: String,
    pub seo_description: String,
    pub h1: String,
    pub seo_text_html: String,
}

impl SeoColumns {
    fn read(record: &CsvRecord) -> Self {
        Self {
            description_html: record.raw("description_html"),
            image_path: record.get("image_path").to_string(),
            seo_title: record.get("seo_title").to_string(),
            seo_description: record.get("seo_description").to_string(),
            h1: record.get("h1").to_string(),
            seo_text_html: record.raw("seo_text_html"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub slug: String,
    pub name: String,
    pub seo: SeoColumns,
    pub sort_order: i32,
    pub is_active: bool,
}

pub fn parse_category_row(record: &CsvRecord) -> Result<CategoryRow, String> {
    let name = record.get("name").to_string();
    let slug = slug_or_generated(record.get("slug"), &name);
    if slug.is_empty() || name.is_empty() {
        return Err("empty slug or name".into());
    }
    Ok(CategoryRow {
        slug,
        name,
        seo: SeoColumns::read(record),
        sort_order: record.int("sort_order")?,
        is_active: record.flag("is_active", true),
    })
}

pub fn parse_categories(bytes: &[u8]) -> Result<Parsed<CategoryRow>, CoreError> {
    parse_all(bytes, parse_category_row)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductLineRow {
    pub category_slug: String,
    pub slug: String,
    pub name: String,
    pub seo: SeoColumns,
    pub sort_order: i32,
    pub is_active: bool,
}

pub fn parse_product_line_row(record: &CsvRecord) -> Result<ProductLineRow, String> {
    let category_slug = record.get("category_slug").to_string();
    let name = record.get("name").to_string();
    let slug = slug_or_generated(record.get("slug"), &name);
    if category_slug.is_empty() || slug.is_empty() || name.is_empty() {
        return Err("missing required fields".into());
    }
    Ok(ProductLineRow {
        category_slug,
        slug,
        name,
        seo: SeoColumns::read(record),
        sort_order: record.int("sort_order")?,
        is_active: record.flag("is_active", true),
    })
}

pub fn parse_product_lines(bytes: &[u8]) -> Result<Parsed<ProductLineRow>, CoreError> {
    parse_all(bytes, parse_product_line_row)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeItemRow {
    pub category_slug: String,
    pub product_slug: String,
    pub size_text: String,
    pub size_slug: String,
    pub sku: String,
    pub price: f64,
    pub currency: String,
    pub unit: String,
    pub in_stock: bool,
    pub image_path: String,
    pub specs: SizeItemSpecs,
}

/// Technical characteristics shown on the size item page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SizeItemSpecs {
    pub pipe_dxs: String,
    pub pressure: String,
    pub mass_per_m: String,
    pub min_bend_radius: String,
    pub max_len_coil: String,
    pub max_len_drum: String,
}

pub fn parse_size_item_row(record: &CsvRecord) -> Result<SizeItemRow, String> {
    let category_slug = record.get("category_slug").to_string();
    let product_slug = record.get("product_slug").to_string();
    let size_text = record.get("size_text").to_string();
    let size_slug = match record.get("size_slug") {
        "" => default_size_slug(&size_text),
        given => given.to_string(),
    };
    if category_slug.is_empty()
        || product_slug.is_empty()
        || size_text.is_empty()
        || size_slug.is_empty()
    {
        return Err("missing required fields".into());
    }
    Ok(SizeItemRow {
        category_slug,
        product_slug,
        size_text,
        size_slug,
        sku: record.get("sku").to_string(),
        price: parse_price(record.get("price")),
        currency: record.or("currency", "RUB"),
        unit: record.or("unit", "шт"),
        in_stock: record.flag("in_stock", true),
        image_path: record.get("image_path").to_string(),
        specs: SizeItemSpecs {
            pipe_dxs: record.get("pipe_dxs").to_string(),
            pressure: record.get("pressure").to_string(),
            mass_per_m: record.get("mass_per_m").to_string(),
            min_bend_radius: record.get("min_bend_radius").to_string(),
            max_len_coil: record.get("max_len_coil").to_string(),
            max_len_drum: record.get("max_len_drum").to_string(),
        },
    })
}

pub fn parse_size_items(bytes: &[u8]) -> Result<Parsed<SizeItemRow>, CoreError> {
    parse_all(bytes, parse_size_item_row)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsRow {
    pub title: String,
    /// Explicit slug; `None` means generate from the title and de-duplicate.
    pub slug: Option<String>,
    pub date: NaiveDate,
    pub content: String,
    pub seo_title: String,
    pub seo_description: String,
    pub h1: String,
    pub is_published: bool,
}

impl NewsRow {
    /// Slug to try before de-duplication.
    pub fn base_slug(&self) -> String {
        self.slug
            .clone()
            .unwrap_or_else(|| generate_slug(&self.title))
    }
}

/// Parse a news row; an empty or malformed `dd.mm.yyyy` date becomes `today`.
pub fn parse_news_row(record: &CsvRecord, today: NaiveDate) -> Result<NewsRow, String> {
    let content = record.get("content").to_string();
    if content.is_empty() {
        return Err("empty content".into());
    }
    let title = match record.get("title") {
        "" => title_from_content(&content),
        given => given.to_string(),
    };
    let date = NaiveDate::parse_from_str(record.get("date"), "%d.%m.%Y").unwrap_or(today);
    let slug = Some(record.get("slug"))
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Ok(NewsRow {
        title,
        slug,
        date,
        content,
        seo_title: record.get("seo_title").to_string(),
        seo_description: record.get("seo_description").to_string(),
        h1: record.get("h1").to_string(),
        is_published: record.flag("is_published", true),
    })
}

pub fn parse_news(bytes: &[u8], today: NaiveDate) -> Result<Parsed<NewsRow>, CoreError> {
    parse_all(bytes, |record| parse_news_row(record, today))
}

/// First 50 characters of the content, with an ellipsis when cut.
pub fn title_from_content(content: &str) -> String {
    const MAX_CHARS: usize = 50;
    if content.chars().count() > MAX_CHARS {
        let head: String = content.chars().take(MAX_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

fn slug_or_generated(slug: &str, name: &str) -> String {
    if slug.is_empty() && !name.is_empty() {
        generate_slug(name)
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn kind_round_trip_and_templates() {
        for kind in [
            ImportKind::Categories,
            ImportKind::ProductLines,
            ImportKind::SizeItems,
            ImportKind::News,
        ] {
            assert_eq!(kind.as_str().parse::<ImportKind>().unwrap(), kind);
            assert_eq!(kind.template().lines().count(), 2);
        }
        assert_matches!("widgets".parse::<ImportKind>(), Err(CoreError::Validation(_)));
        assert_eq!(ImportKind::News.template_filename(), "news_template.csv");
    }

    #[test]
    fn flags_and_prices() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("да"));
        assert_eq!(parse_price("150,50"), 150.5);
        assert_eq!(parse_price("99.9"), 99.9);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("n/a"), 0.0);
    }

    #[test]
    fn strips_bom() {
        let bytes = "\u{FEFF}name;slug\nТрубы;\n".as_bytes();
        let parsed = parse_categories(bytes).unwrap();
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.rows[0].1.slug, "truby");
        assert!(parsed.rows[0].1.is_active);
    }

    #[test]
    fn category_rows_report_line_numbers() {
        let csv = "name;slug;sort_order;is_active\n\
                   Трубы;truby;1;1\n\
                   ;;2;1\n\
                   Отводы;otvody;x;0\n";
        let parsed = parse_categories(csv.as_bytes()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].0, 2);
        assert_eq!(parsed.errors.len(), 2);
        assert!(parsed.errors[0].starts_with("Row 3:"));
        assert!(parsed.errors[1].starts_with("Row 4:"));
    }

    #[test]
    fn template_parses_cleanly() {
        let parsed = parse_size_items(ImportKind::SizeItems.template().as_bytes()).unwrap();
        assert!(parsed.errors.is_empty());
        let (_, row) = &parsed.rows[0];
        assert_eq!(row.size_slug, "32x3.0");
        assert_eq!(row.price, 150.0);
        assert_eq!(row.unit, "м");
        assert_eq!(row.currency, "RUB");
        assert_eq!(row.specs.pressure, "1.0 МПа");

        let parsed = parse_product_lines(ImportKind::ProductLines.template().as_bytes()).unwrap();
        assert_eq!(parsed.rows[0].1.category_slug, "polietilenovye-truby");
    }

    #[test]
    fn size_item_slug_generated() {
        let csv = "category_slug;product_slug;size_text;price\nppu;izo;32/75 Плюс;1 200,5\n";
        let parsed = parse_size_items(csv.as_bytes()).unwrap();
        let (_, row) = &parsed.rows[0];
        assert_eq!(row.size_slug, "32_75_Плюс");
        assert_eq!(row.price, 0.0);
        assert!(row.in_stock);
    }

    #[test]
    fn news_rows() {
        let long = "x".repeat(60);
        let csv = format!("date;content\n15.01.2025;Короткая новость\nbad;{long}\n;\n");
        let parsed = parse_news(csv.as_bytes(), today()).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.errors, vec!["Row 4: empty content".to_string()]);

        let first = &parsed.rows[0].1;
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(first.title, "Короткая новость");
        assert_eq!(first.base_slug(), "korotkaya_novost");

        let second = &parsed.rows[1].1;
        assert_eq!(second.date, today());
        assert_eq!(second.title.chars().count(), 53);
        assert!(second.title.ends_with("..."));
    }
}
