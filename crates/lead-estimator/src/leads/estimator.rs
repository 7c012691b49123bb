use super::domain::{Category, Dimension, LeadRecord};
use super::tables::LookupTables;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Lower edge of the estimate band, as a fraction of the total.
pub const LOW_BAND: f64 = 0.8;
/// Upper edge of the estimate band, as a fraction of the total.
pub const HIGH_BAND: f64 = 1.2;

/// Prices leads against a set of lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    tables: &'a LookupTables,
}

impl<'a> Estimator<'a> {
    pub fn new(tables: &'a LookupTables) -> Self {
        Self { tables }
    }

    /// Technology base value scaled by the lead type, country and industry
    /// multipliers.
    pub fn estimate_one(&self, record: &LeadRecord) -> f64 {
        let mut value = self.tables.base_value(record.technology);
        value *= self.tables.lead_type_multiplier(record.lead_type);
        value *= self.tables.country_multiplier(record.country);
        value *= self.tables.industry_multiplier(record.industry);
        debug!(
            lead_type = %record.lead_type,
            country = %record.country,
            industry = %record.industry,
            technology = %record.technology,
            value,
            "lead estimated"
        );
        value
    }

    pub fn estimate_all(&self, records: &[LeadRecord]) -> Result<EstimateResult, EstimateError> {
        if records.is_empty() {
            warn!("estimation requested without any leads");
            return Err(EstimateError::NoLeads);
        }

        let estimates = records
            .iter()
            .map(|record| self.estimate_one(record))
            .collect();
        let result = EstimateResult::from_estimates(estimates);
        info!(
            leads = records.len(),
            total = result.total,
            "lead estimation complete"
        );
        Ok(result)
    }
}

/// Per-lead estimates with the banded total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateResult {
    pub estimates: Vec<f64>,
    pub total: f64,
    pub low: f64,
    pub high: f64,
}

impl EstimateResult {
    pub fn from_estimates(estimates: Vec<f64>) -> Self {
        let total: f64 = estimates.iter().sum();
        Self {
            estimates,
            total,
            low: total * LOW_BAND,
            high: total * HIGH_BAND,
        }
    }

    pub fn group_by(&self, records: &[LeadRecord], dimension: Dimension) -> GroupedTotals {
        group_by(records, &self.estimates, dimension)
    }
}

/// Sums the estimates of leads sharing a value along `dimension`.
///
/// `records` and `estimates` are paired by position and must have the same
/// length; a mismatch panics in debug builds. Categories without any lead
/// are left out rather than reported as zero.
pub fn group_by(records: &[LeadRecord], estimates: &[f64], dimension: Dimension) -> GroupedTotals {
    debug_assert_eq!(
        records.len(),
        estimates.len(),
        "every grouped lead needs exactly one estimate"
    );

    let mut totals = BTreeMap::new();
    for (record, estimate) in records.iter().zip(estimates) {
        *totals.entry(record.category(dimension)).or_insert(0.0) += estimate;
    }

    GroupedTotals { dimension, totals }
}

/// Estimate sums per category along a single dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedTotals {
    dimension: Dimension,
    totals: BTreeMap<Category, f64>,
}

impl GroupedTotals {
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.totals.get(&category).copied()
    }

    /// Categories in declaration order with their summed estimate.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.totals
            .iter()
            .map(|(category, total)| (*category, *total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.totals.values().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    #[error("Please add at least one lead.")]
    NoLeads,
}
