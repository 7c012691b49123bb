mod summary;
pub mod views;

pub use summary::LeadValueReport;
pub use views::format_currency;
