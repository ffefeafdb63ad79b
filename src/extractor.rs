use log::{debug, info};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::error::CrawlError;

/// Column order of the output file.
pub const FIELDNAMES: [&str; 4] = ["title", "link", "author_and_date", "info"];

/// One listing item, flattened. A field whose node is missing is an empty
/// string, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub title: String,
    pub link: String,
    pub author_and_date: String,
    pub info: String,
}

impl Record {
    /// Field values in `FIELDNAMES` order.
    pub fn fields(&self) -> [&str; 4] {
        [
            self.title.as_str(),
            self.link.as_str(),
            self.author_and_date.as_str(),
            self.info.as_str(),
        ]
    }
}

pub struct RecordExtractor {
    item: Selector,
    title: Selector,
    link: Selector,
    author: Selector,
    info: Selector,
}

impl RecordExtractor {
    pub fn new(listing_selector: &str) -> Result<Self, CrawlError> {
        Ok(RecordExtractor {
            item: selector(listing_selector)?,
            title: selector("div.listTitle a span.listTitleColor1")?,
            link: selector("div.listTitle a")?,
            author: selector("div.listTitle span.listTitleColor2")?,
            info: selector("div.listInfo p.listIcons")?,
        })
    }

    /// Every listing item in document order, one record each. An empty result
    /// means the listing is exhausted.
    pub fn extract(&self, html: &str, offset: u64) -> Vec<Record> {
        let document = Html::parse_document(html);
        let items: Vec<ElementRef> = document.select(&self.item).collect();
        info!("Offset {} -> found {} items", offset, items.len());

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let record = Record {
                    title: first(item, &self.title)
                        .map(|el| joined_text(el, ""))
                        .unwrap_or_default(),
                    link: first(item, &self.link)
                        .and_then(|el| el.value().attr("href"))
                        .unwrap_or_default()
                        .to_string(),
                    author_and_date: first(item, &self.author)
                        .map(|el| joined_text(el, ""))
                        .unwrap_or_default(),
                    info: first(item, &self.info)
                        .map(|el| joined_text(el, " "))
                        .unwrap_or_default(),
                };
                if record.fields().iter().any(|f| f.is_empty()) {
                    debug!("Item {} at offset {} is missing fields: {:?}", i, offset, record);
                }
                record
            })
            .collect()
    }
}

fn first<'a>(item: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    item.select(sel).next()
}

fn selector(css: &str) -> Result<Selector, CrawlError> {
    Selector::parse(css).map_err(|e| CrawlError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Trims every text fragment under `el`, drops the empty ones and joins the
/// rest with `sep`.
fn joined_text(el: ElementRef, sep: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
