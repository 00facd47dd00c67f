//! Row-limited history table parser.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::error;

use crate::fetcher::Document;
use crate::RecordError;

/// Default number of entities kept per symbol: roughly a month of trading days.
pub const DEFAULT_ROW_LIMIT: usize = 30;

static TABLE_BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody").expect("tbody selector must parse"));
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("tr selector must parse"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("td selector must parse"));

/// Conversion of one table row, given as cell text in column order.
pub trait FromCells: Sized {
    fn from_cells(cells: &[&str]) -> Result<Self, RecordError>;
}

/// Extracts up to `limit` entities from the first table body of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableParser {
    limit: usize,
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_LIMIT)
    }
}

impl TableParser {
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }

    pub fn parse<T: FromCells>(&self, document: &Document) -> Vec<T> {
        self.parse_html(&document.html())
    }

    /// Rows are visited in document order. Only rows that convert count
    /// against the limit; the others are logged and skipped.
    pub fn parse_html<T: FromCells>(&self, html: &Html) -> Vec<T> {
        let Some(body) = html.select(&TABLE_BODY).next() else {
            return Vec::new();
        };

        let mut entities = Vec::new();
        for row in body.select(&ROW) {
            if entities.len() >= self.limit {
                break;
            }

            let cells = row_cells(row);
            let texts: Vec<&str> = cells.iter().map(String::as_str).collect();
            match T::from_cells(&texts) {
                Ok(entity) => entities.push(entity),
                Err(error) => error!(?cells, %error, "skipping malformed row"),
            }
        }
        entities
    }
}

fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELL)
        .map(|cell| cell.text().collect::<String>().trim().to_owned())
        .collect()
}
