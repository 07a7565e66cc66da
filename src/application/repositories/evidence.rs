//! Evidence repository

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::entities::{EvidenceItem, EvidenceStatus, EvidenceType};
use crate::error::{RepoError, RepoResult, StoreResult};
use crate::infrastructure::store::DataStore;

use super::{percentage, remove_by_id, text_matches, upsert};

/// Window used for the `expiring_soon` statistic
const EXPIRY_WINDOW_DAYS: i64 = 30;

/// Conjunctive filter over evidence; `None` = no constraint
#[derive(Debug, Clone, Default)]
pub struct EvidenceFilter {
    pub text: Option<String>,
    pub status: Option<EvidenceStatus>,
    pub evidence_type: Option<EvidenceType>,
    pub control_id: Option<String>,
}

impl EvidenceFilter {
    fn matches(&self, item: &EvidenceItem) -> bool {
        if let Some(text) = &self.text {
            if !text_matches(text, &[&item.title, &item.description], &item.tags) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if item.status != status {
                return false;
            }
        }
        if let Some(evidence_type) = self.evidence_type {
            if item.evidence_type != evidence_type {
                return false;
            }
        }
        if let Some(control_id) = &self.control_id {
            if !item.control_ids.contains(control_id) {
                return false;
            }
        }
        true
    }
}

/// Typed partial update; every field optional
#[derive(Debug, Clone, Default)]
pub struct EvidencePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub evidence_type: Option<EvidenceType>,
    pub status: Option<EvidenceStatus>,
    pub control_ids: Option<Vec<String>>,
    pub collected_by: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

impl EvidencePatch {
    fn apply(self, item: &mut EvidenceItem) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(evidence_type) = self.evidence_type {
            item.evidence_type = evidence_type;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(control_ids) = self.control_ids {
            item.control_ids = control_ids;
        }
        if let Some(collected_by) = self.collected_by {
            item.collected_by = collected_by;
        }
        if let Some(expires_at) = self.expires_at {
            item.expires_at = Some(expires_at);
        }
        if let Some(tags) = self.tags {
            item.tags = tags;
        }
    }
}

/// Aggregated evidence statistics
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct EvidenceStatistics {
    pub total: usize,
    pub by_status: BTreeMap<EvidenceStatus, usize>,
    pub by_type: BTreeMap<EvidenceType, usize>,
    /// Percentage with status `approved`; 0.0 for an empty collection
    pub compliance_rate: f64,
    /// Items whose expiry falls within the next 30 days
    pub expiring_soon: usize,
}

/// CRUD + search + statistics over the evidence collection
#[derive(Clone)]
pub struct EvidenceRepository {
    store: Arc<DataStore>,
}

impl EvidenceRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<EvidenceItem> {
        self.store.snapshot().evidence
    }

    pub fn get(&self, id: &str) -> Option<EvidenceItem> {
        self.all().into_iter().find(|item| item.id == id)
    }

    pub fn save(&self, item: EvidenceItem) -> StoreResult<EvidenceItem> {
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.evidence, item))
    }

    pub fn update(&self, id: &str, patch: EvidencePatch) -> RepoResult<EvidenceItem> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "evidence",
                id: id.to_string(),
            });
        }
        let updated = self.store.mutate(|snapshot| {
            let item = snapshot.evidence.iter_mut().find(|item| item.id == id)?;
            patch.apply(item);
            item.updated_at = Utc::now();
            Some(item.clone())
        })?;
        updated.ok_or_else(|| RepoError::NotFound {
            collection: "evidence",
            id: id.to_string(),
        })
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "evidence",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.evidence, id))?;
        Ok(())
    }

    pub fn search(&self, filter: &EvidenceFilter) -> Vec<EvidenceItem> {
        self.all()
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect()
    }

    pub fn statistics(&self) -> EvidenceStatistics {
        let items = self.all();
        let total = items.len();
        let now = Utc::now();
        let horizon = now + Duration::days(EXPIRY_WINDOW_DAYS);

        let mut stats = EvidenceStatistics {
            total,
            ..EvidenceStatistics::default()
        };
        for item in &items {
            *stats.by_status.entry(item.status).or_insert(0) += 1;
            *stats.by_type.entry(item.evidence_type).or_insert(0) += 1;
            if item
                .expires_at
                .is_some_and(|expiry| expiry > now && expiry <= horizon)
            {
                stats.expiring_soon += 1;
            }
        }
        let approved = items.iter().filter(|i| i.is_compliant()).count();
        stats.compliance_rate = percentage(approved, total);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::backend::MemoryBackend;

    fn repo() -> EvidenceRepository {
        EvidenceRepository::new(Arc::new(DataStore::new(MemoryBackend::new())))
    }

    #[test]
    fn compliance_rate_counts_approved_items() {
        let repo = repo();
        let mut approved = EvidenceItem::new("MFA screenshot", EvidenceType::Screenshot);
        approved.status = EvidenceStatus::Approved;
        repo.save(approved).unwrap();
        repo.save(EvidenceItem::new("Draft SSP", EvidenceType::Document))
            .unwrap();

        let stats = repo.statistics();
        assert_eq!(stats.compliance_rate, 50.0);
        assert_eq!(stats.by_type[&EvidenceType::Screenshot], 1);
    }

    #[test]
    fn expiring_soon_ignores_already_expired_items() {
        let repo = repo();
        let now = Utc::now();

        let mut soon = EvidenceItem::new("Cert scan", EvidenceType::LogExtract);
        soon.expires_at = Some(now + Duration::days(7));
        repo.save(soon).unwrap();

        let mut long_gone = EvidenceItem::new("Old audit", EvidenceType::Document);
        long_gone.expires_at = Some(now - Duration::days(7));
        repo.save(long_gone).unwrap();

        let mut far_out = EvidenceItem::new("Annual attestation", EvidenceType::Attestation);
        far_out.expires_at = Some(now + Duration::days(300));
        repo.save(far_out).unwrap();

        assert_eq!(repo.statistics().expiring_soon, 1);
    }

    #[test]
    fn search_by_control_id() {
        let repo = repo();
        let mut item = EvidenceItem::new("Firewall export", EvidenceType::Configuration);
        item.control_ids = vec!["ctl-1".to_string()];
        repo.save(item).unwrap();

        let hits = repo.search(&EvidenceFilter {
            control_id: Some("ctl-1".to_string()),
            ..EvidenceFilter::default()
        });
        assert_eq!(hits.len(), 1);

        let misses = repo.search(&EvidenceFilter {
            control_id: Some("ctl-2".to_string()),
            ..EvidenceFilter::default()
        });
        assert!(misses.is_empty());
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let err = repo().update("ghost", EvidencePatch::default()).unwrap_err();
        assert!(matches!(err, RepoError::NotFound { collection: "evidence", .. }));
    }
}
