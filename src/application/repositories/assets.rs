//! Asset repository

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{Asset, AssetType, CmmcScope};
use crate::domain::value_objects::RiskLevel;
use crate::error::{RepoError, RepoResult, StoreResult};
use crate::infrastructure::store::DataStore;

use super::{percentage, remove_by_id, text_matches, upsert};

/// Conjunctive filter over assets; `None` = no constraint
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    pub text: Option<String>,
    pub asset_type: Option<AssetType>,
    pub cmmc_scope: Option<CmmcScope>,
    pub criticality: Option<RiskLevel>,
    pub owner: Option<String>,
}

impl AssetFilter {
    fn matches(&self, asset: &Asset) -> bool {
        if let Some(text) = &self.text {
            if !text_matches(
                text,
                &[&asset.name, &asset.description, &asset.location],
                &asset.tags,
            ) {
                return false;
            }
        }
        if let Some(asset_type) = self.asset_type {
            if asset.asset_type != asset_type {
                return false;
            }
        }
        if let Some(scope) = self.cmmc_scope {
            if asset.cmmc_scope != scope {
                return false;
            }
        }
        if let Some(criticality) = self.criticality {
            if asset.criticality != criticality {
                return false;
            }
        }
        if let Some(owner) = &self.owner {
            if &asset.owner != owner {
                return false;
            }
        }
        true
    }
}

/// Aggregated asset statistics
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AssetStatistics {
    pub total: usize,
    pub by_type: BTreeMap<AssetType, usize>,
    pub by_scope: BTreeMap<CmmcScope, usize>,
    pub by_criticality: BTreeMap<RiskLevel, usize>,
    /// Percentage with a settled scope decision (not pending review)
    pub scoped_rate: f64,
    /// Mean criticality weight (1..=5) across all assets
    pub average_criticality: f64,
}

/// CRUD + search + statistics over the asset inventory
#[derive(Clone)]
pub struct AssetRepository {
    store: Arc<DataStore>,
}

impl AssetRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<Asset> {
        self.store.snapshot().assets
    }

    pub fn get(&self, id: &str) -> Option<Asset> {
        self.all().into_iter().find(|asset| asset.id == id)
    }

    pub fn save(&self, asset: Asset) -> StoreResult<Asset> {
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.assets, asset))
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "asset",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.assets, id))?;
        Ok(())
    }

    pub fn search(&self, filter: &AssetFilter) -> Vec<Asset> {
        self.all()
            .into_iter()
            .filter(|asset| filter.matches(asset))
            .collect()
    }

    pub fn statistics(&self) -> AssetStatistics {
        let assets = self.all();
        let total = assets.len();

        let mut stats = AssetStatistics {
            total,
            ..AssetStatistics::default()
        };
        for asset in &assets {
            *stats.by_type.entry(asset.asset_type).or_insert(0) += 1;
            *stats.by_scope.entry(asset.cmmc_scope).or_insert(0) += 1;
            *stats.by_criticality.entry(asset.criticality).or_insert(0) += 1;
        }
        let scoped = assets
            .iter()
            .filter(|a| a.cmmc_scope != CmmcScope::PendingReview)
            .count();
        stats.scoped_rate = percentage(scoped, total);
        stats.average_criticality = if total == 0 {
            0.0
        } else {
            assets
                .iter()
                .map(|a| a.criticality.weight() as f64)
                .sum::<f64>()
                / total as f64
        };
        stats
    }
}
