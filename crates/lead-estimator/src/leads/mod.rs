//! Lead intake, pricing and reporting.

pub mod domain;
pub mod estimator;
pub mod import;
pub mod report;
pub mod session;
pub mod tables;

pub use domain::{
    AttributeError, Category, Country, Dimension, Industry, LeadPatch, LeadRecord, LeadType,
    Technology,
};
pub use estimator::{group_by, EstimateError, EstimateResult, Estimator, GroupedTotals};
pub use import::{LeadCsvImporter, LeadImportError};
pub use report::LeadValueReport;
pub use session::{LeadSession, StoreError};
pub use tables::{LookupTables, TablesError};
