// ryzom-reddit-bot: Ryzom release notes to Reddit
//
// SPDX-FileCopyrightText: 2026 RyzomApps contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release notes page scraper.
//!
//! ```text
//! table[style*="margin: 0 auto"]           main table
//!   tr  a[target=_blank] "date: title"     header row
//!   tr  img + table                        content row
//!         tr  td(b "Headline")             headline row
//!         tr  td | td(✪ point ✪ point)     key point row
//!   tr  a[target=_blank] "date: title"
//!   ...
//! ```
//!
//! Rows without a `_blank` link are ignored, as is the
//! `Release-Information` header. A header row consumes the row after it
//! together with everything nested inside that row.

use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{Headline, NewsItem};
use crate::error::{BotResult, ScrapeError};

const MAIN_TABLE: &str = r#"table[style*="margin: 0 auto"]"#;
const ROW: &str = "tr";
const HEADER_LINK: &str = r#"a[target="_blank"]"#;
const IMAGE: &str = "img";
const TABLE: &str = "table";
const BOLD: &str = "b";
const UNDERLINED_CELL: &str = r#"td[style*="border-bottom"]"#;

const BULLET_STYLE: &str = r"(?i)color\s*:\s*#08c";
const BULLET_GLYPH: &str = "✪";

const IGNORED_HEADER: &str = "Release-Information";

/// Elements rendered on their own line; their edges separate words.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Compiled selectors for one parse.
struct Selectors {
    main_table: Selector,
    row: Selector,
    header_link: Selector,
    image: Selector,
    table: Selector,
    bold: Selector,
    underlined_cell: Selector,
    bullet_style: Regex,
}

impl Selectors {
    fn new() -> BotResult<Self> {
        Ok(Self {
            main_table: compile(MAIN_TABLE)?,
            row: compile(ROW)?,
            header_link: compile(HEADER_LINK)?,
            image: compile(IMAGE)?,
            table: compile(TABLE)?,
            bold: compile(BOLD)?,
            underlined_cell: compile(UNDERLINED_CELL)?,
            bullet_style: Regex::new(BULLET_STYLE).map_err(|e| ScrapeError::InvalidPattern {
                pattern: BULLET_STYLE.to_string(),
                message: e.to_string(),
            })?,
        })
    }
}

fn compile(css: &str) -> BotResult<Selector> {
    Selector::parse(css).map_err(|e| {
        ScrapeError::InvalidSelector {
            selector: css.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Parse the release notes page into news items, newest first.
///
/// Relative links are resolved against `base_url` when given. A page
/// without the main table yields an empty list.
///
/// # Errors
///
/// Returns a `ScrapeError` only if a built-in selector fails to compile.
pub fn parse_release_notes(html: &str, base_url: Option<&Url>) -> BotResult<Vec<NewsItem>> {
    let selectors = Selectors::new()?;
    let document = Html::parse_document(html);

    let Some(main_table) = document.select(&selectors.main_table).next() else {
        debug!("release notes table not found");
        return Ok(Vec::new());
    };

    let rows: Vec<ElementRef<'_>> = main_table.select(&selectors.row).collect();
    let mut items = Vec::new();
    let mut consumed: Option<ElementRef<'_>> = None;
    let mut index = 0;

    while index < rows.len() {
        let row = rows[index];
        index += 1;

        if consumed.is_some_and(|done| is_inside(row, done)) {
            continue;
        }

        let Some(link) = row.select(&selectors.header_link).next() else {
            continue;
        };
        let header = element_text(link);
        if header.eq_ignore_ascii_case(IGNORED_HEADER) {
            continue;
        }
        let href = link.value().attr("href").unwrap_or_default().trim();

        let Some(offset) = rows[index..].iter().position(|next| !is_inside(*next, row)) else {
            debug!(header = %header, "header row has no content row");
            break;
        };
        let content = rows[index + offset];

        let image_url = content
            .select(&selectors.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| resolve(base_url, src.trim()));

        let headlines = content
            .select(&selectors.table)
            .next()
            .map(|table| parse_headlines(table, &selectors))
            .unwrap_or_default();

        debug!(header = %header, headlines = headlines.len(), "parsed news entry");
        items.push(NewsItem::from_header(
            &header,
            resolve(base_url, href),
            image_url,
            headlines,
        ));

        consumed = Some(content);
        index += offset + 1;
    }

    Ok(items)
}

/// Collect headlines and their key points from a content table.
fn parse_headlines(table: ElementRef<'_>, selectors: &Selectors) -> Vec<Headline> {
    let mut headlines = Vec::new();
    let mut current: Option<Headline> = None;

    for row in table.select(&selectors.row) {
        if owning_table(row).is_none_or(|owner| owner.id() != table.id()) {
            continue;
        }

        let cells: Vec<ElementRef<'_>> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| cell.value().name() == "td")
            .collect();
        let Some(first) = cells.first() else {
            continue;
        };

        if let Some(title) = headline_title(*first, selectors) {
            headlines.extend(current.take());
            current = Some(Headline::new(title));
        } else if let Some(headline) = current.as_mut()
            && let Some(points_cell) = cells.get(1)
        {
            headline
                .key_points
                .extend(key_points(*points_cell, &selectors.bullet_style));
        }
    }

    headlines.extend(current);
    headlines
}

/// Title of a headline row, if `cell` starts one.
///
/// Headlines are either bold text, possibly inside a nested layout table,
/// or an underlined cell of such a table.
fn headline_title(cell: ElementRef<'_>, selectors: &Selectors) -> Option<String> {
    if let Some(nested) = cell.select(&selectors.table).next() {
        nested
            .select(&selectors.bold)
            .next()
            .or_else(|| nested.select(&selectors.underlined_cell).next())
            .map(element_text)
    } else {
        cell.select(&selectors.bold).next().map(element_text)
    }
}

/// Split a cell at its bullet markers. Text before the first marker is dropped.
fn key_points(cell: ElementRef<'_>, bullet_style: &Regex) -> Vec<String> {
    let mut collector = KeyPoints {
        bullet_style,
        points: Vec::new(),
        current: None,
    };
    collector.visit(cell);
    collector.finish()
}

struct KeyPoints<'r> {
    bullet_style: &'r Regex,
    points: Vec<String>,
    current: Option<String>,
}

impl KeyPoints<'_> {
    fn visit(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                if let Some(buffer) = self.current.as_mut() {
                    buffer.push_str(text);
                }
            } else if let Some(child) = ElementRef::wrap(child) {
                if self.is_bullet(child) {
                    self.close_point();
                    self.current = Some(String::new());
                    continue;
                }
                let block = is_block(child);
                self.separate(block);
                self.visit(child);
                self.separate(block);
            }
        }
    }

    fn is_bullet(&self, element: ElementRef<'_>) -> bool {
        element.value().name() == "span"
            && element
                .value()
                .attr("style")
                .is_some_and(|style| self.bullet_style.is_match(style))
            && element_text(element) == BULLET_GLYPH
    }

    fn separate(&mut self, block: bool) {
        if block && let Some(buffer) = self.current.as_mut() {
            buffer.push(' ');
        }
    }

    fn close_point(&mut self) {
        if let Some(raw) = self.current.take() {
            let point = normalize_whitespace(&raw);
            if !point.is_empty() {
                self.points.push(point);
            }
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.close_point();
        self.points
    }
}

/// Rendered text of an element with whitespace collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    append_text(element, &mut raw);
    normalize_whitespace(&raw)
}

fn append_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let block = is_block(child);
            if block {
                out.push(' ');
            }
            append_text(child, out);
            if block {
                out.push(' ');
            }
        }
    }
}

fn is_block(element: ElementRef<'_>) -> bool {
    BLOCK_ELEMENTS.contains(&element.value().name())
}

/// Collapse whitespace runs (NBSP included) to single spaces and trim.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `row` is nested somewhere below `outer`.
fn is_inside(row: ElementRef<'_>, outer: ElementRef<'_>) -> bool {
    row.ancestors().any(|ancestor| ancestor.id() == outer.id())
}

/// Nearest enclosing `table` element.
fn owning_table(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "table")
}

/// Resolve a relative link against the page URL; absolute links are kept verbatim.
fn resolve(base_url: Option<&Url>, raw: &str) -> String {
    if raw.is_empty() || Url::parse(raw).is_ok() {
        return raw.to_string();
    }
    base_url
        .and_then(|base| base.join(raw).ok())
        .map_or_else(|| raw.to_string(), String::from)
}
