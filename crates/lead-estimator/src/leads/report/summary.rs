use super::super::domain::{Dimension, LeadRecord};
use super::super::estimator::{EstimateResult, GroupedTotals};
use super::views::{
    format_currency, ChartBar, ChartSeries, HeadlineFigure, LeadEstimateView, LeadValueSummary,
};

/// Estimation outcome for a session, grouped along every dimension.
#[derive(Debug, Clone)]
pub struct LeadValueReport {
    pub leads: Vec<LeadRecord>,
    pub result: EstimateResult,
    pub breakdowns: Vec<GroupedTotals>,
}

impl LeadValueReport {
    pub fn new(records: &[LeadRecord], result: EstimateResult) -> Self {
        let breakdowns = Dimension::ordered()
            .into_iter()
            .map(|dimension| result.group_by(records, dimension))
            .collect();

        Self {
            leads: records.to_vec(),
            result,
            breakdowns,
        }
    }

    pub fn breakdown(&self, dimension: Dimension) -> Option<&GroupedTotals> {
        self.breakdowns
            .iter()
            .find(|grouped| grouped.dimension() == dimension)
    }

    pub fn summary(&self) -> LeadValueSummary {
        let leads = self
            .leads
            .iter()
            .zip(&self.result.estimates)
            .enumerate()
            .map(|(index, (record, estimate))| LeadEstimateView {
                index,
                label: format!("Lead {}", index + 1),
                record: *record,
                estimate: *estimate,
            })
            .collect();

        let charts = self.breakdowns.iter().map(chart_series).collect();

        LeadValueSummary {
            low: headline("Low Estimate", self.result.low),
            expected: headline("Expected Estimate", self.result.total),
            high: headline("High Estimate", self.result.high),
            leads,
            charts,
        }
    }
}

fn headline(label: &'static str, value: f64) -> HeadlineFigure {
    HeadlineFigure {
        label,
        value,
        formatted: format_currency(value),
    }
}

fn chart_series(grouped: &GroupedTotals) -> ChartSeries {
    let dimension = grouped.dimension();
    ChartSeries {
        dimension,
        title: format!("Lead Value by {}", dimension.label()),
        bars: grouped
            .iter()
            .map(|(category, value)| ChartBar {
                category,
                label: category.label(),
                value,
            })
            .collect(),
    }
}
