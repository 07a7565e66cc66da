//! Control repository

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::entities::{Control, ControlStatus, Effectiveness};
use crate::domain::value_objects::Priority;
use crate::error::{RepoError, RepoResult, StoreResult};
use crate::infrastructure::store::DataStore;

use super::{percentage, remove_by_id, text_matches, upsert};

/// Conjunctive filter over controls; `None` = no constraint
#[derive(Debug, Clone, Default)]
pub struct ControlFilter {
    pub text: Option<String>,
    pub status: Option<ControlStatus>,
    pub family: Option<String>,
    pub priority: Option<Priority>,
    pub owner: Option<String>,
}

impl ControlFilter {
    fn matches(&self, control: &Control) -> bool {
        if let Some(text) = &self.text {
            if !text_matches(
                text,
                &[&control.title, &control.description, &control.practice_id],
                &control.tags,
            ) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if control.status != status {
                return false;
            }
        }
        if let Some(family) = &self.family {
            if !control.family.eq_ignore_ascii_case(family) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if control.priority != priority {
                return false;
            }
        }
        if let Some(owner) = &self.owner {
            if &control.owner != owner {
                return false;
            }
        }
        true
    }
}

/// Typed partial update; every field optional
#[derive(Debug, Clone, Default)]
pub struct ControlPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub family: Option<String>,
    pub status: Option<ControlStatus>,
    pub effectiveness: Option<Effectiveness>,
    pub priority: Option<Priority>,
    pub owner: Option<String>,
    pub related_policies: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl ControlPatch {
    fn apply(self, control: &mut Control) {
        if let Some(title) = self.title {
            control.title = title;
        }
        if let Some(description) = self.description {
            control.description = description;
        }
        if let Some(family) = self.family {
            control.family = family;
        }
        if let Some(status) = self.status {
            control.status = status;
        }
        if let Some(effectiveness) = self.effectiveness {
            control.effectiveness = effectiveness;
        }
        if let Some(priority) = self.priority {
            control.priority = priority;
        }
        if let Some(owner) = self.owner {
            control.owner = owner;
        }
        if let Some(related_policies) = self.related_policies {
            control.related_policies = related_policies;
        }
        if let Some(tags) = self.tags {
            control.tags = tags;
        }
        if let Some(notes) = self.notes {
            control.notes = notes;
        }
    }
}

/// Aggregated control statistics
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ControlStatistics {
    pub total: usize,
    pub by_status: BTreeMap<ControlStatus, usize>,
    pub by_family: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
    /// Percentage with status `implemented`; 0.0 for an empty collection
    pub compliance_rate: f64,
    /// Mean effectiveness rank (0..=4) across all controls
    pub average_effectiveness: f64,
}

/// CRUD + search + statistics over the control collection
#[derive(Clone)]
pub struct ControlRepository {
    store: Arc<DataStore>,
}

impl ControlRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<Control> {
        self.store.snapshot().controls
    }

    pub fn get(&self, id: &str) -> Option<Control> {
        self.all().into_iter().find(|control| control.id == id)
    }

    /// Upsert by id, stamping `created_at` on first insert and always
    /// refreshing `updated_at`
    pub fn save(&self, control: Control) -> StoreResult<Control> {
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.controls, control))
    }

    /// Apply a partial update; `NotFound` when the id is absent
    pub fn update(&self, id: &str, patch: ControlPatch) -> RepoResult<Control> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "control",
                id: id.to_string(),
            });
        }
        let updated = self.store.mutate(|snapshot| {
            let control = snapshot
                .controls
                .iter_mut()
                .find(|control| control.id == id)?;
            patch.apply(control);
            control.updated_at = Utc::now();
            Some(control.clone())
        })?;
        updated.ok_or_else(|| RepoError::NotFound {
            collection: "control",
            id: id.to_string(),
        })
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "control",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.controls, id))?;
        Ok(())
    }

    pub fn search(&self, filter: &ControlFilter) -> Vec<Control> {
        self.all()
            .into_iter()
            .filter(|control| filter.matches(control))
            .collect()
    }

    /// Pure aggregation over the current collection; never fails
    pub fn statistics(&self) -> ControlStatistics {
        let controls = self.all();
        let total = controls.len();

        let mut stats = ControlStatistics {
            total,
            ..ControlStatistics::default()
        };
        for control in &controls {
            *stats.by_status.entry(control.status).or_insert(0) += 1;
            *stats.by_family.entry(control.family.clone()).or_insert(0) += 1;
            *stats.by_priority.entry(control.priority).or_insert(0) += 1;
        }

        let compliant = controls.iter().filter(|c| c.is_compliant()).count();
        stats.compliance_rate = percentage(compliant, total);
        stats.average_effectiveness = if total == 0 {
            0.0
        } else {
            controls
                .iter()
                .map(|c| c.effectiveness.rank() as f64)
                .sum::<f64>()
                / total as f64
        };
        stats
    }
}
