//! Parameter types for the stochastic inputs of a run.
//!
//! These are plain values; sampling lives on [`RandomProcess`][crate::RandomProcess]
//! so that the run's single random stream is the only source of randomness.

use crate::{CoreError, CoreResult};

// ── CustomerKind ──────────────────────────────────────────────────────────────

/// How a shopper judges the lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CustomerKind {
    /// Picks the line with the fewest people.
    Regular,
    /// Looks into the carts and picks the line with the fewest items.
    Observer,
}

impl CustomerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CustomerKind::Regular  => "regular",
            CustomerKind::Observer => "observer",
        }
    }
}

// ── CartSizeDistribution ──────────────────────────────────────────────────────

/// Distribution of the number of items a shopper brings to the till.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CartSizeDistribution {
    /// Triangular on `[min, max]`.  `mode = None` peaks at the midpoint.
    /// Samples are rounded to the nearest whole item.
    Triangular { min: u32, max: u32, mode: Option<u32> },
    /// Uniform on `[min, max]`, both inclusive.
    Uniform { min: u32, max: u32 },
}

impl Default for CartSizeDistribution {
    fn default() -> Self {
        CartSizeDistribution::Triangular { min: 1, max: 100, mode: None }
    }
}

impl CartSizeDistribution {
    /// Reject empty carts and inverted bounds.
    pub fn validate(&self) -> CoreResult<()> {
        let (min, max) = match *self {
            CartSizeDistribution::Triangular { min, max, mode } => {
                if let Some(m) = mode {
                    if m < min || m > max {
                        return Err(CoreError::Distribution(format!(
                            "triangular mode {m} outside [{min}, {max}]"
                        )));
                    }
                }
                (min, max)
            }
            CartSizeDistribution::Uniform { min, max } => (min, max),
        };
        if min == 0 {
            return Err(CoreError::Distribution("cart size minimum must be at least 1".into()));
        }
        if min > max {
            return Err(CoreError::Distribution(format!("cart size bounds inverted: {min} > {max}")));
        }
        Ok(())
    }
}

// ── ScanTime ──────────────────────────────────────────────────────────────────

/// How long a cashier needs per scanned item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ScanTime {
    /// Every item takes exactly `secs_per_item`.
    Fixed { secs_per_item: f64 },
    /// Every item takes an independent exponential draw with this mean.
    Exponential { mean_secs_per_item: f64 },
}

impl Default for ScanTime {
    fn default() -> Self {
        ScanTime::Fixed { secs_per_item: 3.0 }
    }
}

impl ScanTime {
    /// Mean per-item duration, whichever mode is selected.
    pub fn mean_secs_per_item(&self) -> f64 {
        match *self {
            ScanTime::Fixed { secs_per_item }            => secs_per_item,
            ScanTime::Exponential { mean_secs_per_item } => mean_secs_per_item,
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        let mean = self.mean_secs_per_item();
        if !mean.is_finite() || mean <= 0.0 {
            return Err(CoreError::Distribution(format!(
                "scan time per item must be positive and finite, got {mean}"
            )));
        }
        Ok(())
    }
}
