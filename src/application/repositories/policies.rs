//! Policy repository

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::entities::{Policy, PolicyStatus};
use crate::error::{RepoError, RepoResult, StoreResult};
use crate::infrastructure::store::DataStore;

use super::{percentage, remove_by_id, text_matches, upsert};

/// Conjunctive filter over policies; `None` = no constraint
#[derive(Debug, Clone, Default)]
pub struct PolicyFilter {
    pub text: Option<String>,
    pub status: Option<PolicyStatus>,
    pub category: Option<String>,
    pub owner: Option<String>,
}

impl PolicyFilter {
    fn matches(&self, policy: &Policy) -> bool {
        if let Some(text) = &self.text {
            if !text_matches(text, &[&policy.title, &policy.description], &policy.tags) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if policy.status != status {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !policy.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(owner) = &self.owner {
            if &policy.owner != owner {
                return false;
            }
        }
        true
    }
}

/// Typed partial update; every field optional
#[derive(Debug, Clone, Default)]
pub struct PolicyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<PolicyStatus>,
    pub version: Option<String>,
    pub owner: Option<String>,
    pub effective_date: Option<chrono::DateTime<Utc>>,
    pub review_date: Option<chrono::DateTime<Utc>>,
    pub cmmc_practices: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl PolicyPatch {
    fn apply(self, policy: &mut Policy) {
        if let Some(title) = self.title {
            policy.title = title;
        }
        if let Some(description) = self.description {
            policy.description = description;
        }
        if let Some(category) = self.category {
            policy.category = category;
        }
        if let Some(status) = self.status {
            policy.status = status;
        }
        if let Some(version) = self.version {
            policy.version = version;
        }
        if let Some(owner) = self.owner {
            policy.owner = owner;
        }
        if let Some(effective_date) = self.effective_date {
            policy.effective_date = Some(effective_date);
        }
        if let Some(review_date) = self.review_date {
            policy.review_date = Some(review_date);
        }
        if let Some(cmmc_practices) = self.cmmc_practices {
            policy.cmmc_practices = cmmc_practices;
        }
        if let Some(tags) = self.tags {
            policy.tags = tags;
        }
    }
}

/// Aggregated policy statistics
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PolicyStatistics {
    pub total: usize,
    pub by_status: BTreeMap<PolicyStatus, usize>,
    pub by_category: BTreeMap<String, usize>,
    /// Percentage with status `approved`; 0.0 for an empty collection
    pub compliance_rate: f64,
}

/// CRUD + search + statistics over the policy collection
#[derive(Clone)]
pub struct PolicyRepository {
    store: Arc<DataStore>,
}

impl PolicyRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<Policy> {
        self.store.snapshot().policies
    }

    pub fn get(&self, id: &str) -> Option<Policy> {
        self.all().into_iter().find(|policy| policy.id == id)
    }

    pub fn save(&self, policy: Policy) -> StoreResult<Policy> {
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.policies, policy))
    }

    pub fn update(&self, id: &str, patch: PolicyPatch) -> RepoResult<Policy> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "policy",
                id: id.to_string(),
            });
        }
        let updated = self.store.mutate(|snapshot| {
            let policy = snapshot.policies.iter_mut().find(|policy| policy.id == id)?;
            patch.apply(policy);
            policy.updated_at = Utc::now();
            Some(policy.clone())
        })?;
        updated.ok_or_else(|| RepoError::NotFound {
            collection: "policy",
            id: id.to_string(),
        })
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "policy",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.policies, id))?;
        Ok(())
    }

    pub fn search(&self, filter: &PolicyFilter) -> Vec<Policy> {
        self.all()
            .into_iter()
            .filter(|policy| filter.matches(policy))
            .collect()
    }

    pub fn statistics(&self) -> PolicyStatistics {
        let policies = self.all();
        let total = policies.len();

        let mut stats = PolicyStatistics {
            total,
            ..PolicyStatistics::default()
        };
        for policy in &policies {
            *stats.by_status.entry(policy.status).or_insert(0) += 1;
            *stats.by_category.entry(policy.category.clone()).or_insert(0) += 1;
        }
        let approved = policies.iter().filter(|p| p.is_compliant()).count();
        stats.compliance_rate = percentage(approved, total);
        stats
    }
}
