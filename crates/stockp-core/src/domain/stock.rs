use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;

use crate::parser::FromCells;
use crate::RecordError;

/// Number of columns in a history table row.
pub const STOCK_COLUMNS: usize = 7;

/// One trading day of a price history table.
///
/// Fields are private: a `Stock` only exists once every column converted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(with = "iso_date")]
    date: Date,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    adj: f64,
    volume: u64,
}

impl Stock {
    pub const fn new(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj: f64,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            adj,
            volume,
        }
    }

    /// Build a record from raw cell text in column order
    /// `date, open, high, low, close, adj, volume`.
    ///
    /// Only the date is mandatory; trailing columns default to zero.
    pub fn from_text(cells: &[&str]) -> Result<Self, RecordError> {
        if cells.len() > STOCK_COLUMNS {
            return Err(RecordError::TooManyCells {
                count: cells.len(),
                max: STOCK_COLUMNS,
            });
        }

        let date = cells
            .first()
            .ok_or(RecordError::MissingDate)
            .and_then(|value| parse_date(value))?;
        let price = |index: usize, field: &'static str| {
            cells
                .get(index)
                .map_or(Ok(0.0), |value| parse_price(field, value))
        };

        Ok(Self {
            date,
            open: price(1, "open")?,
            high: price(2, "high")?,
            low: price(3, "low")?,
            close: price(4, "close")?,
            adj: price(5, "adj")?,
            volume: cells.get(6).map_or(Ok(0), |value| parse_volume(value))?,
        })
    }

    pub const fn date(&self) -> Date {
        self.date
    }

    pub const fn open(&self) -> f64 {
        self.open
    }

    pub const fn high(&self) -> f64 {
        self.high
    }

    pub const fn low(&self) -> f64 {
        self.low
    }

    pub const fn close(&self) -> f64 {
        self.close
    }

    pub const fn adj(&self) -> f64 {
        self.adj
    }

    pub const fn volume(&self) -> u64 {
        self.volume
    }

    /// JSON object view of the record with the date rendered as ISO-8601.
    pub fn payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FromCells for Stock {
    fn from_cells(cells: &[&str]) -> Result<Self, RecordError> {
        Self::from_text(cells)
    }
}

impl Display for Stock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stock('{}', {:.2}, {:.2}, {:.2}, {:.2}, {:.2}, {})",
            iso_date::format(self.date),
            self.open,
            self.high,
            self.low,
            self.close,
            self.adj,
            self.volume
        )
    }
}

fn parse_date(value: &str) -> Result<Date, RecordError> {
    let format = format_description!(
        "[month repr:short case_sensitive:false] [day padding:none], [year]"
    );
    Date::parse(value.trim(), format).map_err(|_| RecordError::InvalidDate {
        value: value.to_owned(),
    })
}

/// Only finite decimals are prices; `inf` and `NaN` have no JSON form.
fn parse_price(field: &'static str, value: &str) -> Result<f64, RecordError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| RecordError::InvalidNumber {
            field,
            value: value.to_owned(),
        })
}

fn parse_volume(value: &str) -> Result<u64, RecordError> {
    let digits: String = value.trim().chars().filter(|ch| *ch != ',').collect();
    digits.parse::<u64>().map_err(|_| RecordError::InvalidVolume {
        value: value.to_owned(),
    })
}

mod iso_date {
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::macros::format_description;
    use time::Date;

    pub fn format(date: Date) -> String {
        date.format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Date::parse(&value, format_description!("[year]-[month]-[day]"))
            .map_err(D::Error::custom)
    }
}
