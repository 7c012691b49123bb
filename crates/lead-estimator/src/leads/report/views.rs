use super::super::domain::{Category, Dimension, LeadRecord};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HeadlineFigure {
    pub label: &'static str,
    pub value: f64,
    pub formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadEstimateView {
    pub index: usize,
    pub label: String,
    #[serde(flatten)]
    pub record: LeadRecord,
    pub estimate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartBar {
    pub category: Category,
    pub label: &'static str,
    pub value: f64,
}

/// Bar-chart dataset for one grouping dimension.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub dimension: Dimension,
    pub title: String,
    pub bars: Vec<ChartBar>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadValueSummary {
    pub low: HeadlineFigure,
    pub expected: HeadlineFigure,
    pub high: HeadlineFigure,
    pub leads: Vec<LeadEstimateView>,
    pub charts: Vec<ChartSeries>,
}

impl LeadValueSummary {
    pub fn headline(&self) -> [&HeadlineFigure; 3] {
        [&self.low, &self.expected, &self.high]
    }

    pub fn chart(&self, dimension: Dimension) -> Option<&ChartSeries> {
        self.charts.iter().find(|chart| chart.dimension == dimension)
    }
}

/// Euro amount with thousands separators and cents, e.g. `€41,580.00`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (position, digit) in whole.chars().enumerate() {
        if position > 0 && (whole.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}€{grouped}.{cents}")
}
