use super::domain::LeadRecord;
use super::session::LeadSession;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Loads leads from a CSV export with `lead_type,country,industry,technology`
/// headers.
pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<LeadSession, LeadImportError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<LeadSession, LeadImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize::<LeadRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        info!(leads = records.len(), "imported leads from csv");
        Ok(LeadSession::from_records(records))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadImportError {
    #[error("failed to read lead export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lead CSV data: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::domain::{Country, Industry, LeadType, Technology};

    #[test]
    fn imports_rows_in_order() {
        let csv = "lead_type,country,industry,technology\n\
                   distributor, DE ,datacenters,addressable\n\
                   installer,ZA,gas & oil,flame detection\n";
        let session = LeadCsvImporter::from_reader(csv.as_bytes()).expect("csv imports");

        assert_eq!(session.len(), 2);
        assert_eq!(session.list()[0].country, Country::Germany);
        assert_eq!(
            session.list()[1],
            LeadRecord::new(
                LeadType::Installer,
                Country::SouthAfrica,
                Industry::GasAndOil,
                Technology::FlameDetection,
            )
        );
    }

    #[test]
    fn header_only_file_yields_empty_session() {
        let csv = "lead_type,country,industry,technology\n";
        let session = LeadCsvImporter::from_reader(csv.as_bytes()).expect("csv imports");
        assert!(session.is_empty());
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let csv = "lead_type,country,industry,technology\nreseller,BE,retail,wireless\n";
        let err = LeadCsvImporter::from_reader(csv.as_bytes()).expect_err("unknown lead type");
        assert!(matches!(err, LeadImportError::Csv(_)));
    }
}
