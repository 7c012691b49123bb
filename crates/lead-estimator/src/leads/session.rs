use super::domain::{LeadPatch, LeadRecord};

/// Ordered leads captured during one estimation session.
///
/// Leads can be appended and edited in place but never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadSession {
    leads: Vec<LeadRecord>,
}

impl LeadSession {
    /// Opens a session the way the intake form does: with one default lead.
    pub fn new() -> Self {
        Self {
            leads: vec![LeadRecord::default()],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = LeadRecord>) -> Self {
        Self {
            leads: records.into_iter().collect(),
        }
    }

    /// Appends a lead with default attributes and returns its index.
    pub fn add_default_record(&mut self) -> usize {
        self.leads.push(LeadRecord::default());
        self.leads.len() - 1
    }

    pub fn update(&mut self, index: usize, patch: LeadPatch) -> Result<&LeadRecord, StoreError> {
        let len = self.leads.len();
        let lead = self
            .leads
            .get_mut(index)
            .ok_or(StoreError::LeadNotFound { index, len })?;
        lead.apply(patch);
        Ok(lead)
    }

    pub fn get(&self, index: usize) -> Option<&LeadRecord> {
        self.leads.get(index)
    }

    pub fn list(&self) -> &[LeadRecord] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("lead {index} not found (session holds {len} lead(s))")]
    LeadNotFound { index: usize, len: usize },
}
