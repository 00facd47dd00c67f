//! Trailing-mean forecast over the newest entries of a series.

use std::num::NonZeroUsize;

use crate::{CoreError, Stock};

/// Default number of newest entries averaged by [`TrailingMean`].
pub const DEFAULT_FORECAST_WINDOW: usize = 3;

/// Single representative price of an entity.
pub trait Priced {
    fn price(&self) -> f64;
}

impl Priced for Stock {
    fn price(&self) -> f64 {
        self.close()
    }
}

/// Forecast capability injected into snapshot construction.
pub trait Forecaster: Send + Sync {
    fn forecast(&self, series: &[Stock]) -> Result<f64, CoreError>;
}

/// Arithmetic mean of the first `window` prices of a newest-first series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingMean {
    window: NonZeroUsize,
}

impl TrailingMean {
    pub fn new(window: usize) -> Result<Self, CoreError> {
        NonZeroUsize::new(window)
            .map(|window| Self { window })
            .ok_or_else(|| CoreError::Config(String::from("forecast window must be positive")))
    }

    pub const fn window(&self) -> usize {
        self.window.get()
    }

    /// A series shorter than the window is averaged over what it has.
    pub fn mean<T: Priced>(&self, items: &[T]) -> Result<f64, CoreError> {
        let taken = &items[..items.len().min(self.window.get())];
        if taken.is_empty() {
            return Err(CoreError::EmptySeries);
        }

        let sum: f64 = taken.iter().map(Priced::price).sum();
        Ok(sum / taken.len() as f64)
    }
}

impl Default for TrailingMean {
    fn default() -> Self {
        Self {
            window: NonZeroUsize::new(DEFAULT_FORECAST_WINDOW).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Forecaster for TrailingMean {
    fn forecast(&self, series: &[Stock]) -> Result<f64, CoreError> {
        self.mean(series)
    }
}
