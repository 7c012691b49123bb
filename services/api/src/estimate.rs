use crate::infra::load_tables;
use clap::Args;
use lead_estimator::error::AppError;
use lead_estimator::leads::report::format_currency;
use lead_estimator::leads::report::views::LeadValueSummary;
use lead_estimator::leads::{
    Country, Estimator, Industry, LeadCsvImporter, LeadRecord, LeadSession, LeadType,
    LeadValueReport, LookupTables, Technology,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct EstimateArgs {
    /// CSV export with lead_type,country,industry,technology columns
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Lead given inline; repeat for several leads
    #[arg(long = "lead", value_name = "TYPE,COUNTRY,INDUSTRY,TECHNOLOGY")]
    pub(crate) leads: Vec<LeadRecord>,
    /// JSON lookup tables overriding LEAD_TABLES_PATH and the standard tables
    #[arg(long)]
    pub(crate) tables: Option<PathBuf>,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TablesArgs {
    /// JSON lookup tables overriding LEAD_TABLES_PATH and the standard tables
    #[arg(long)]
    pub(crate) tables: Option<PathBuf>,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        csv,
        leads,
        tables,
        json,
    } = args;

    let tables = load_tables(tables)?;
    let session = collect_session(csv, leads)?;
    let summary = estimate_session(&tables, &session)?;

    if json {
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        render_summary(&summary);
    }

    Ok(())
}

pub(crate) fn run_tables(args: TablesArgs) -> Result<(), AppError> {
    let tables = load_tables(args.tables)?;
    render_tables(&tables);
    Ok(())
}

fn collect_session(
    csv: Option<PathBuf>,
    leads: Vec<LeadRecord>,
) -> Result<LeadSession, AppError> {
    let imported = match csv {
        Some(path) => LeadCsvImporter::from_path(path)?,
        None => LeadSession::empty(),
    };

    Ok(LeadSession::from_records(
        imported.list().iter().copied().chain(leads),
    ))
}

pub(crate) fn estimate_session(
    tables: &LookupTables,
    session: &LeadSession,
) -> Result<LeadValueSummary, AppError> {
    let result = Estimator::new(tables).estimate_all(session.list())?;
    Ok(LeadValueReport::new(session.list(), result).summary())
}

fn render_summary(summary: &LeadValueSummary) {
    println!("Estimation Results");
    for figure in summary.headline() {
        println!("- {}: {}", figure.label, figure.formatted);
    }

    println!("\nLeads");
    for lead in &summary.leads {
        println!(
            "- {}: {} | {} | {} | {} => {}",
            lead.label,
            lead.record.lead_type,
            lead.record.country,
            lead.record.industry,
            lead.record.technology,
            format_currency(lead.estimate)
        );
    }

    for chart in &summary.charts {
        println!("\n{}", chart.title);
        for bar in &chart.bars {
            println!("- {}: {}", bar.label, format_currency(bar.value));
        }
    }
}

fn render_tables(tables: &LookupTables) {
    println!("Technology base values");
    for technology in Technology::ordered() {
        println!("- {}: {}", technology, tables.base_value(*technology));
    }

    println!("\nLead type multipliers");
    for lead_type in LeadType::ordered() {
        println!("- {}: {}", lead_type, tables.lead_type_multiplier(*lead_type));
    }

    println!("\nCountry multipliers");
    for country in Country::ordered() {
        println!("- {}: {}", country, tables.country_multiplier(*country));
    }

    println!("\nIndustry multipliers");
    for industry in Industry::ordered() {
        println!("- {}: {}", industry, tables.industry_multiplier(*industry));
    }
}
