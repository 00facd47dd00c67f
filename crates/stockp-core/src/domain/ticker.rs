use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::CoreError;

const MAX_TICKER_LEN: usize = 15;

/// Normalized exchange ticker, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and normalize a ticker to uppercase.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(CoreError::Config(String::from("ticker cannot be empty")));
        }

        let len = normalized.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(CoreError::Config(format!(
                "ticker length {len} exceeds max {MAX_TICKER_LEN}"
            )));
        }

        if let Some((index, ch)) = normalized
            .chars()
            .enumerate()
            .find(|(_, ch)| !(ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '-' || *ch == '^'))
        {
            return Err(CoreError::Config(format!(
                "ticker contains invalid character '{ch}' at index {index}"
            )));
        }

        Ok(Self(normalized))
    }

    /// Unvalidated constructor for built-in tickers.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_ascii_uppercase())
    }

    /// Extract the ticker from a quote history URL: the last `=`-separated
    /// segment, e.g. `https://finance.yahoo.com/quote/UGA/history?p=UGA`.
    pub fn from_url(url: &str) -> Result<Self, CoreError> {
        let tail = url.rsplit('=').next().unwrap_or(url);
        Self::parse(tail)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name used for this ticker's cached history page.
    pub fn cache_file_name(&self) -> String {
        format!("{}.html", self.0.to_ascii_lowercase())
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_ticker() {
        let parsed = Ticker::parse(" ndaq ").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "NDAQ");
        assert_eq!(parsed.cache_file_name(), "ndaq.html");
    }

    #[test]
    fn extracts_ticker_from_history_url() {
        let ticker = Ticker::from_url("https://finance.yahoo.com/quote/UGA/history?p=UGA")
            .expect("ticker in url");
        assert_eq!(ticker.as_str(), "UGA");
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(Ticker::parse("CO RN").is_err());
        assert!(Ticker::parse("").is_err());
    }
}
