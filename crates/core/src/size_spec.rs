//! Size-specification parsing and accessory-table filtering.
//!
//! A sized item carries a free-text size such as `32/75`, `25+25/90` or
//! `2x25x2,3+2x20x1,9/140`. [`parse_size_spec`] turns that into the set of
//! inner diameters plus the outer diameter; [`filter_accessory_table`] keeps
//! only the rows of an admin-authored HTML table whose first cell matches.
//!
//! Everything here is best-effort: unknown tokens are dropped, and an absent
//! table or an empty match yields `None`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// CSS class added to every filtered table.
pub const MATCH_TABLE_CLASS: &str = "accessory-match-table";

static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)").expect("valid regex"));

static FULL_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:/\d+)?)").expect("valid regex"));

static SEGMENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+|\s+").expect("valid regex"));

static SDR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SDR[\d,.]+").expect("valid regex"));

/// `N x D (x T)?`, e.g. `2x25x2,3`; the diameter is the second number.
static COUNT_DIAMETER_WALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)x(\d+)(?:x[\d,.]+)?$").expect("valid regex"));

/// `D (x T)?`, e.g. `40x5,5` or `32`.
static DIAMETER_WALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:x[\d,.]+)?$").expect("valid regex"));

static SLASHED_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)/(\d+)").expect("valid regex"));

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Diameters extracted from a size text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SizeSpec {
    pub inner_diameters: BTreeSet<u32>,
    pub outer_diameter: Option<u32>,
    /// Leading `inner/outer` (or bare number) prefix of a slashed size text.
    pub full_size: Option<String>,
}

impl SizeSpec {
    /// `true` when there is nothing to match against.
    pub fn is_empty(&self) -> bool {
        self.inner_diameters.is_empty() && self.outer_diameter.is_none()
    }
}

/// Parse a free-text size descriptor.
pub fn parse_size_spec(text: &str) -> SizeSpec {
    let text = text.trim();
    if text.is_empty() {
        return SizeSpec::default();
    }

    let (before_slash, outer_diameter, full_size) = match text.rsplit_once('/') {
        Some((before, after)) => {
            let outer = leading_number(after.trim());
            let full = FULL_SIZE
                .captures(text)
                .map(|caps| caps[1].to_string());
            (before.trim(), outer, full)
        }
        None => (text, None, None),
    };

    let inner_diameters = SEGMENT_SPLIT
        .split(before_slash)
        .filter_map(segment_diameter)
        .collect();

    SizeSpec {
        inner_diameters,
        outer_diameter,
        full_size,
    }
}

/// Reduce one `+`/whitespace-separated segment to its diameter.
fn segment_diameter(segment: &str) -> Option<u32> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }
    let segment = SDR_TOKEN.replace_all(segment, "");
    let segment = segment.trim().replace('х', "x");

    if let Some(caps) = COUNT_DIAMETER_WALL.captures(&segment) {
        return caps[2].parse().ok();
    }
    if let Some(caps) = DIAMETER_WALL.captures(&segment) {
        return caps[1].parse().ok();
    }
    None
}

fn leading_number(text: &str) -> Option<u32> {
    LEADING_DIGITS
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

// ---------------------------------------------------------------------------
// Table cells
// ---------------------------------------------------------------------------

/// Size found in the first cell of an accessory table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSize {
    /// A bare number such as `25`.
    Plain(u32),
    /// An `inner/outer` pair such as `32/75`.
    Slashed { inner: u32, outer: u32 },
}

impl TableSize {
    /// Canonical text form, comparable to [`SizeSpec::full_size`].
    pub fn full(&self) -> String {
        match self {
            Self::Plain(v) => v.to_string(),
            Self::Slashed { inner, outer } => format!("{inner}/{outer}"),
        }
    }

    /// Whether this cell value matches `spec`.
    pub fn matches(&self, spec: &SizeSpec, use_outer_diameter: bool) -> bool {
        match *self {
            Self::Slashed { inner, outer } => {
                if spec.full_size.as_deref() == Some(self.full().as_str()) {
                    true
                } else if use_outer_diameter && spec.outer_diameter.is_some() {
                    spec.outer_diameter == Some(outer)
                } else if !use_outer_diameter {
                    spec.inner_diameters.contains(&inner)
                } else {
                    false
                }
            }
            Self::Plain(value) => {
                if use_outer_diameter {
                    spec.outer_diameter == Some(value)
                } else {
                    spec.inner_diameters.contains(&value)
                }
            }
        }
    }
}

/// Normalize the text of a table cell.
///
/// `32/75 Плюс` becomes `Slashed { 32, 75 }`, `25 мм` becomes `Plain(25)`,
/// text without a leading number yields `None`.
pub fn normalize_table_size(cell: &str) -> Option<TableSize> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    if cell.contains('/') {
        if let Some(caps) = SLASHED_CELL.captures(cell) {
            if let (Ok(inner), Ok(outer)) = (caps[1].parse(), caps[2].parse()) {
                return Some(TableSize::Slashed { inner, outer });
            }
        }
    }
    leading_number(cell).map(TableSize::Plain)
}

// ---------------------------------------------------------------------------
// Table filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Head,
    Body,
    Bare,
}

#[derive(Debug, Clone, Copy)]
struct Row {
    handle: tl::NodeHandle,
    section: Section,
}

/// Filter an accessory table down to the rows matching `spec`.
///
/// The rebuilt table keeps the original `<table>` attributes, gains the
/// [`MATCH_TABLE_CLASS`] class, repeats the header row (if any) in a
/// `<thead>` and places the matched rows in a `<tbody>`.
pub fn filter_accessory_table(
    html: &str,
    spec: &SizeSpec,
    use_outer_diameter: bool,
) -> Option<String> {
    if html.trim().is_empty() || spec.is_empty() {
        return None;
    }

    let dom = tl::parse(html, tl::ParserOptions::default()).ok()?;
    let parser = dom.parser();
    let table = dom
        .children()
        .iter()
        .find_map(|h| find_first(*h, parser, "table"))?;
    let table_tag = table.get(parser)?.as_tag()?;

    let mut rows = Vec::new();
    let mut has_tbody = false;
    for child in table_tag.children().top().iter() {
        collect_rows(*child, parser, Section::Bare, &mut rows, &mut has_tbody);
    }

    let header = rows
        .iter()
        .find(|r| r.section == Section::Head)
        .or_else(|| rows.first().filter(|r| row_has_header_cell(r.handle, parser)))
        .map(|r| r.handle);

    let data_rows: Vec<tl::NodeHandle> = if has_tbody {
        rows.iter()
            .filter(|r| r.section == Section::Body)
            .map(|r| r.handle)
            .collect()
    } else if let Some(header) = header {
        rows.iter()
            .map(|r| r.handle)
            .filter(|h| *h != header)
            .collect()
    } else {
        rows.iter().skip(1).map(|r| r.handle).collect()
    };

    let matched: Vec<String> = data_rows
        .into_iter()
        .filter(|h| {
            first_cell_text(*h, parser)
                .and_then(|text| normalize_table_size(&text))
                .is_some_and(|size| size.matches(spec, use_outer_diameter))
        })
        .filter_map(|h| h.get(parser).map(|node| node.outer_html(parser).to_string()))
        .collect();

    if matched.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(html.len());
    out.push_str("<table");
    push_table_attributes(&mut out, table_tag);
    out.push('>');
    if let Some(row) = header.and_then(|h| h.get(parser)) {
        out.push_str("<thead>");
        out.push_str(&row.outer_html(parser));
        out.push_str("</thead>");
    }
    out.push_str("<tbody>");
    for row in &matched {
        out.push_str(row);
    }
    out.push_str("</tbody></table>");
    Some(out)
}

fn tag_name(tag: &tl::HTMLTag<'_>) -> String {
    tag.name().as_utf8_str().to_ascii_lowercase()
}

fn find_first(handle: tl::NodeHandle, parser: &tl::Parser<'_>, name: &str) -> Option<tl::NodeHandle> {
    let tag = handle.get(parser)?.as_tag()?;
    if tag_name(tag) == name {
        return Some(handle);
    }
    tag.children()
        .top()
        .iter()
        .find_map(|child| find_first(*child, parser, name))
}

/// Collect `<tr>` rows below a table in document order, tagging each with the
/// section it appeared in. Nested tables are not descended into.
fn collect_rows(
    handle: tl::NodeHandle,
    parser: &tl::Parser<'_>,
    section: Section,
    rows: &mut Vec<Row>,
    has_tbody: &mut bool,
) {
    let Some(tag) = handle.get(parser).and_then(|n| n.as_tag()) else {
        return;
    };
    let section = match tag_name(tag).as_str() {
        "tr" => {
            rows.push(Row { handle, section });
            return;
        }
        "table" => return,
        "thead" => Section::Head,
        "tbody" => {
            *has_tbody = true;
            Section::Body
        }
        _ => section,
    };
    for child in tag.children().top().iter() {
        collect_rows(*child, parser, section, rows, has_tbody);
    }
}

fn row_cells(row: tl::NodeHandle, parser: &tl::Parser<'_>) -> Vec<(String, tl::NodeHandle)> {
    let Some(tag) = row.get(parser).and_then(|n| n.as_tag()) else {
        return Vec::new();
    };
    tag.children()
        .top()
        .iter()
        .filter_map(|h| {
            let name = tag_name(h.get(parser)?.as_tag()?);
            matches!(name.as_str(), "td" | "th").then_some((name, *h))
        })
        .collect()
}

fn row_has_header_cell(row: tl::NodeHandle, parser: &tl::Parser<'_>) -> bool {
    row_cells(row, parser).iter().any(|(name, _)| name == "th")
}

fn first_cell_text(row: tl::NodeHandle, parser: &tl::Parser<'_>) -> Option<String> {
    let (_, cell) = row_cells(row, parser).into_iter().next()?;
    // `inner_text` keeps entities as written; sanitized tables store U+00A0
    // as `&nbsp;`.
    let text = cell.get(parser)?.inner_text(parser);
    Some(html_escape::decode_html_entities(&text).trim().to_string())
}

fn push_table_attributes(out: &mut String, table: &tl::HTMLTag<'_>) {
    let mut has_class = false;
    for (key, value) in table.attributes().iter() {
        let key: &str = key.as_ref();
        let mut value = value.map(|v| v.to_string()).unwrap_or_default();
        if key.eq_ignore_ascii_case("class") {
            has_class = true;
            if !value.split_whitespace().any(|c| c == MATCH_TABLE_CLASS) {
                if !value.trim().is_empty() {
                    value.push(' ');
                }
                value.push_str(MATCH_TABLE_CLASS);
            }
        }
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
    if !has_class {
        out.push_str(" class=\"");
        out.push_str(MATCH_TABLE_CLASS);
        out.push('"');
    }
}

// ---------------------------------------------------------------------------
// Accessory blocks
// ---------------------------------------------------------------------------

/// An accessory block as seen by the matcher.
pub trait AccessorySource {
    fn is_active(&self) -> bool;
    fn table_html(&self) -> &str;
    fn use_outer_diameter(&self) -> bool;
}

/// A block whose table had at least one matching row.
#[derive(Debug, Clone)]
pub struct MatchedAccessory<'a, B> {
    pub block: &'a B,
    pub filtered_table: String,
}

/// Filter every active block's table for the given size text.
///
/// Blocks with no matching rows are omitted. A size text that yields neither
/// inner nor outer diameters produces no matches at all.
pub fn matching_accessories<'a, B: AccessorySource>(
    size_text: &str,
    blocks: &'a [B],
) -> Vec<MatchedAccessory<'a, B>> {
    let spec = parse_size_spec(size_text);
    if spec.is_empty() {
        return Vec::new();
    }

    blocks
        .iter()
        .filter(|b| b.is_active() && !b.table_html().trim().is_empty())
        .filter_map(|block| {
            filter_accessory_table(block.table_html(), &spec, block.use_outer_diameter()).map(
                |filtered_table| MatchedAccessory {
                    block,
                    filtered_table,
                },
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
