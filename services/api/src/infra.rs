use lead_estimator::config::AppConfig;
use lead_estimator::error::AppError;
use lead_estimator::leads::{LeadSession, LookupTables};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) tables: Arc<LookupTables>,
    pub(crate) session: SharedSession,
}

/// The single interactive session the form edits between requests.
#[derive(Clone)]
pub(crate) struct SharedSession {
    inner: Arc<Mutex<LeadSession>>,
}

impl SharedSession {
    pub(crate) fn new(session: LeadSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// A panicked handler cannot leave a lead half-written, so a poisoned
    /// lock still holds a usable session.
    pub(crate) fn lock(&self) -> MutexGuard<'_, LeadSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolves the lookup tables from an explicit path, then
/// `LEAD_TABLES_PATH`, then the standard set.
pub(crate) fn load_tables(path: Option<PathBuf>) -> Result<LookupTables, AppError> {
    let path = match path {
        Some(path) => Some(path),
        None => AppConfig::load()?.estimator.tables_path,
    };

    let tables = LookupTables::load(path.as_deref())?;
    match &path {
        Some(path) => info!(path = %path.display(), "loaded lookup table overrides"),
        None => info!("using standard lookup tables"),
    }
    Ok(tables)
}
