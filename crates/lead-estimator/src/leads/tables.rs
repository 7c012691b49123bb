use super::domain::{Country, Industry, LeadType, Technology};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Base value used for a technology missing from the table.
pub const DEFAULT_BASE_VALUE: f64 = 5000.0;
/// Multiplier used for any lead type, country or industry missing from its table.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Static value tables driving the estimator.
///
/// Built once at startup and never mutated afterwards. Lookups are total:
/// keys missing from a table resolve to [`DEFAULT_BASE_VALUE`] or
/// [`DEFAULT_MULTIPLIER`]. `Default` yields empty tables, so every lookup
/// falls back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    #[serde(default)]
    technology_base_value: BTreeMap<Technology, f64>,
    #[serde(default)]
    lead_type_multiplier: BTreeMap<LeadType, f64>,
    #[serde(default)]
    country_multiplier: BTreeMap<Country, f64>,
    #[serde(default)]
    industry_multiplier: BTreeMap<Industry, f64>,
}

impl LookupTables {
    /// The tables the sales team calibrated the estimator with.
    pub fn standard() -> Self {
        use Country::*;
        use Industry::*;
        use LeadType::*;
        use Technology::*;

        Self {
            technology_base_value: BTreeMap::from([
                (Addressable, 15000.0),
                (AspiratingSmokeDetection, 14000.0),
                (Evacuation, 13000.0),
                (Wireless, 9000.0),
                (Conventional, 7000.0),
                (LinearHeatDetection, 6000.0),
                (FlameDetection, 5000.0),
            ]),
            lead_type_multiplier: BTreeMap::from([
                (EndUser, 1.2),
                (Distributor, 1.5),
                (Installer, 1.1),
                (Consultant, 1.3),
            ]),
            country_multiplier: BTreeMap::from([
                (Belgium, 1.0),
                (Netherlands, 1.0),
                (UnitedKingdom, 1.1),
                (Ireland, 1.0),
                (France, 1.0),
                (Italy, 1.0),
                (Spain, 1.0),
                (Portugal, 1.0),
                (Germany, 1.1),
                (Denmark, 1.0),
                (Sweden, 1.0),
                (Finland, 1.0),
                (Norway, 1.0),
                (Poland, 0.9),
                (Turkey, 0.8),
                (SouthAfrica, 0.9),
                (MiddleEast, 1.2),
            ]),
            industry_multiplier: BTreeMap::from([
                (Hospitality, 1.1),
                (Datacenters, 1.4),
                (Factories, 1.3),
                (GasAndOil, 1.5),
                (Healthcare, 1.3),
                (Education, 1.2),
                (Retail, 1.1),
                (Transportation, 1.2),
                (Manufacturing, 1.3),
                (Energy, 1.4),
                (Government, 1.2),
                (Banking, 1.3),
                (Insurance, 1.2),
                (Telecommunications, 1.3),
                (Construction, 1.2),
                (RealEstate, 1.1),
                (FoodAndBeverage, 1.2),
                (Pharmaceutical, 1.4),
                (Mining, 1.5),
                (Utilities, 1.3),
                (Logistics, 1.2),
                (Media, 1.1),
                (Sports, 1.1),
                (Entertainment, 1.1),
                (Other, 1.0),
            ]),
        }
    }

    /// Reads a JSON table set. The file replaces the standard tables
    /// wholesale; anything it leaves out falls back to the defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TablesError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TablesError> {
        let tables: Self = serde_json::from_reader(reader)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Standard tables, or the override file when one is configured.
    pub fn load(path: Option<&Path>) -> Result<Self, TablesError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::standard()),
        }
    }

    pub fn with_base_value(mut self, technology: Technology, value: f64) -> Self {
        self.technology_base_value.insert(technology, value);
        self
    }

    pub fn base_value(&self, technology: Technology) -> f64 {
        self.technology_base_value
            .get(&technology)
            .copied()
            .unwrap_or(DEFAULT_BASE_VALUE)
    }

    pub fn lead_type_multiplier(&self, lead_type: LeadType) -> f64 {
        self.lead_type_multiplier
            .get(&lead_type)
            .copied()
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    pub fn country_multiplier(&self, country: Country) -> f64 {
        self.country_multiplier
            .get(&country)
            .copied()
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    pub fn industry_multiplier(&self, industry: Industry) -> f64 {
        self.industry_multiplier
            .get(&industry)
            .copied()
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    /// Every configured value must be finite and strictly positive so that
    /// estimates stay positive.
    fn validate(&self) -> Result<(), TablesError> {
        check_positive("technology_base_value", &self.technology_base_value)?;
        check_positive("lead_type_multiplier", &self.lead_type_multiplier)?;
        check_positive("country_multiplier", &self.country_multiplier)?;
        check_positive("industry_multiplier", &self.industry_multiplier)
    }
}

fn check_positive<K: std::fmt::Display>(
    table: &'static str,
    entries: &BTreeMap<K, f64>,
) -> Result<(), TablesError> {
    match entries
        .iter()
        .find(|(_, value)| !(value.is_finite() && **value > 0.0))
    {
        Some((key, value)) => Err(TablesError::NonPositive {
            table,
            key: key.to_string(),
            value: *value,
        }),
        None => Ok(()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("failed to read lookup tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lookup table JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{table} entry '{key}' must be a positive number, found {value}")]
    NonPositive {
        table: &'static str,
        key: String,
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_cover_every_attribute() {
        let tables = LookupTables::standard();
        assert_eq!(tables.technology_base_value.len(), Technology::ordered().len());
        assert_eq!(tables.lead_type_multiplier.len(), LeadType::ordered().len());
        assert_eq!(tables.country_multiplier.len(), Country::ordered().len());
        assert_eq!(tables.industry_multiplier.len(), Industry::ordered().len());
        assert!(tables.validate().is_ok());
    }

    #[test]
    fn empty_tables_fall_back_to_defaults() {
        let tables = LookupTables::default();
        assert_eq!(tables.base_value(Technology::Addressable), DEFAULT_BASE_VALUE);
        assert_eq!(tables.lead_type_multiplier(LeadType::Distributor), DEFAULT_MULTIPLIER);
        assert_eq!(tables.country_multiplier(Country::Turkey), DEFAULT_MULTIPLIER);
        assert_eq!(tables.industry_multiplier(Industry::Mining), DEFAULT_MULTIPLIER);
    }

    #[test]
    fn reads_partial_json_tables() {
        let json = r#"{
            "technology_base_value": { "wireless": 12000 },
            "country_multiplier": { "DE": 1.25 }
        }"#;
        let tables = LookupTables::from_reader(json.as_bytes()).expect("tables parse");
        assert_eq!(tables.base_value(Technology::Wireless), 12000.0);
        assert_eq!(tables.base_value(Technology::Addressable), DEFAULT_BASE_VALUE);
        assert_eq!(tables.country_multiplier(Country::Germany), 1.25);
        assert_eq!(tables.industry_multiplier(Industry::Energy), DEFAULT_MULTIPLIER);
    }

    #[test]
    fn rejects_non_positive_values() {
        let json = r#"{ "industry_multiplier": { "mining": 0 } }"#;
        let err = LookupTables::from_reader(json.as_bytes()).expect_err("zero rejected");
        assert!(matches!(
            err,
            TablesError::NonPositive { table: "industry_multiplier", .. }
        ));
        assert!(err.to_string().contains("'mining'"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let json = r#"{ "country_multiplier": { "US": 1.3 } }"#;
        let err = LookupTables::from_reader(json.as_bytes()).expect_err("unknown country");
        assert!(matches!(err, TablesError::Parse(_)));
    }
}
