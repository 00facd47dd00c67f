//! # Domain Models
//!
//! Typed values flowing through the history pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Stock`] | One trading day (date, OHLC, adjusted close, volume) |
//! | [`Ticker`] | Validated, uppercase exchange ticker |
//! | [`Label`] | Fixed, ordered display label of a tracked symbol |
//!
//! ## Validation
//!
//! `Stock` is only reachable through conversion of every column, so a
//! half-parsed row cannot exist:
//!
//! ```rust
//! use stockp_core::{RecordError, Stock};
//!
//! let stock = Stock::from_text(&["Dec 11, 2018", "16.32", "16.42"]).unwrap();
//! assert_eq!(stock.high(), 16.42);
//! assert_eq!(stock.close(), 0.0);
//!
//! let err = Stock::from_text(&["11/12/2018"]).unwrap_err();
//! assert!(matches!(err, RecordError::InvalidDate { .. }));
//! ```

mod label;
mod stock;
mod ticker;

pub use label::Label;
pub use stock::{Stock, STOCK_COLUMNS};
pub use ticker::Ticker;
