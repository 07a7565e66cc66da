//! Report repository
//!
//! Persists generated reports through the same store as everything
//! else, with the same not-found/propagate-error contract. Summaries
//! are regenerated by the reporting engine, never edited here - the
//! only mutable things on a stored report are its descriptive fields.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::ReportData;
use crate::error::{RepoError, RepoResult, StoreResult};
use crate::infrastructure::store::DataStore;

use super::{remove_by_id, upsert};

/// CRUD over stored reports
#[derive(Clone)]
pub struct ReportRepository {
    store: Arc<DataStore>,
}

impl ReportRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<ReportData> {
        self.store.snapshot().reports
    }

    pub fn get(&self, id: &str) -> Option<ReportData> {
        self.all().into_iter().find(|report| report.id == id)
    }

    pub fn save(&self, report: ReportData) -> StoreResult<ReportData> {
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.reports, report))
    }

    /// Rename or redescribe a stored report; `NotFound` when absent
    pub fn update_metadata(
        &self,
        id: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> RepoResult<ReportData> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "report",
                id: id.to_string(),
            });
        }
        let updated = self.store.mutate(|snapshot| {
            let report = snapshot.reports.iter_mut().find(|report| report.id == id)?;
            if let Some(title) = title {
                report.title = title;
            }
            if let Some(description) = description {
                report.description = description;
            }
            report.updated_at = Utc::now();
            Some(report.clone())
        })?;
        updated.ok_or_else(|| RepoError::NotFound {
            collection: "report",
            id: id.to_string(),
        })
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "report",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.reports, id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DateRange;
    use crate::infrastructure::backend::MemoryBackend;

    fn repo() -> ReportRepository {
        ReportRepository::new(Arc::new(DataStore::new(MemoryBackend::new())))
    }

    fn draft() -> ReportData {
        let now = Utc::now();
        ReportData::draft(
            "Q3 compliance",
            "",
            DateRange {
                start: now - chrono::Duration::days(90),
                end: now,
            },
            "dana",
        )
    }

    #[test]
    fn save_and_update_metadata() {
        let repo = repo();
        let saved = repo.save(draft()).unwrap();

        let renamed = repo
            .update_metadata(&saved.id, Some("Q3 final".to_string()), None)
            .unwrap();
        assert_eq!(renamed.title, "Q3 final");
        assert_eq!(renamed.description, "");
    }

    #[test]
    fn update_and_delete_missing_report_are_not_found() {
        let repo = repo();
        assert!(repo.update_metadata("ghost", None, None).is_err());
        assert!(repo.delete("ghost").is_err());
    }

    #[test]
    fn delete_removes_the_report() {
        let repo = repo();
        let saved = repo.save(draft()).unwrap();
        repo.delete(&saved.id).unwrap();
        assert!(repo.all().is_empty());
    }
}
