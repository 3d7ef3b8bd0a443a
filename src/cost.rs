//! Storage cost projection
//!
//! Converts an estimated byte size into a monthly dollar cost and projects the
//! cumulative cost across a time horizon. Purely linear; no compounding, no
//! discounting.

use crate::{error::ParameterError, Result};

/// Bytes per gibibyte, the billing unit used by the storage rate
const BYTES_PER_GIB: f64 = (1u64 << 30) as f64;

/// Monthly storage cost for a byte size at a per-GB-month rate
pub fn monthly_storage_cost(byte_size: f64, cost_per_gb_month: f64) -> Result<f64> {
    if !byte_size.is_finite() {
        return Err(ParameterError::NonFiniteValue {
            name: "byte_size",
            value: byte_size,
        }
        .into());
    }
    if byte_size < 0.0 {
        return Err(ParameterError::NegativeByteSize(byte_size).into());
    }
    if cost_per_gb_month < 0.0 {
        return Err(ParameterError::NegativeCostRate(cost_per_gb_month).into());
    }
    Ok(byte_size / BYTES_PER_GIB * cost_per_gb_month)
}

/// Cumulative cost at the end of one month of the projection horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostPoint {
    /// 1-based month index
    pub month: u32,
    pub cumulative: f64,
}

/// An ordered sequence of cumulative cost points for charting
#[derive(Debug, Clone, PartialEq)]
pub struct CostProjection {
    pub monthly_cost: f64,
    pub points: Vec<CostPoint>,
}

impl CostProjection {
    /// Projects a monthly cost linearly over `months` months
    ///
    /// The horizon must cover at least one month; a zero monthly cost is valid.
    pub fn project(monthly_cost: f64, months: u32) -> Result<Self> {
        if months == 0 {
            return Err(ParameterError::EmptyHorizon.into());
        }
        if monthly_cost < 0.0 {
            return Err(ParameterError::NegativeCostRate(monthly_cost).into());
        }
        let points = (1..=months)
            .map(|month| CostPoint {
                month,
                cumulative: monthly_cost * f64::from(month),
            })
            .collect();
        Ok(Self {
            monthly_cost,
            points,
        })
    }

    /// Projects over a year-based horizon (12 points per year)
    pub fn project_years(monthly_cost: f64, years: u32) -> Result<Self> {
        Self::project(monthly_cost, years * 12)
    }

    /// Cumulative cost at the end of the horizon
    pub fn total(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.cumulative)
    }
}
