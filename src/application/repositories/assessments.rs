//! Assessment repository - risk assessments and threat models
//!
//! Every persist path runs `Assessment::rescore` first, so stored
//! scores, residual levels, and the overall level can never drift from
//! the likelihood x impact inputs.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{Assessment, AssessmentKind, AssessmentStatus, Risk, RiskStatus};
use crate::domain::value_objects::RiskLevel;
use crate::error::{RepoError, RepoResult, StoreResult};
use crate::infrastructure::store::DataStore;

use super::{remove_by_id, text_matches, upsert};

/// Conjunctive filter over assessments; `None` = no constraint
#[derive(Debug, Clone, Default)]
pub struct AssessmentFilter {
    pub text: Option<String>,
    pub kind: Option<AssessmentKind>,
    pub status: Option<AssessmentStatus>,
    pub overall_risk_level: Option<RiskLevel>,
}

impl AssessmentFilter {
    fn matches(&self, assessment: &Assessment) -> bool {
        if let Some(text) = &self.text {
            if !text_matches(
                text,
                &[&assessment.title, &assessment.description, &assessment.scope],
                &[],
            ) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if assessment.kind != kind {
                return false;
            }
        }
        if let Some(status) = self.status {
            if assessment.status != status {
                return false;
            }
        }
        if let Some(level) = self.overall_risk_level {
            if assessment.overall_risk_level != level {
                return false;
            }
        }
        true
    }
}

/// Aggregated assessment statistics
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AssessmentStatistics {
    pub total: usize,
    pub by_kind: BTreeMap<AssessmentKind, usize>,
    pub by_status: BTreeMap<AssessmentStatus, usize>,
    pub by_overall_level: BTreeMap<RiskLevel, usize>,
    pub total_risks: usize,
    pub open_risks: usize,
    /// Mean risk score (1..=25) across every risk in every assessment
    pub average_risk_score: f64,
    /// Worst overall level across assessments; `low` when there are none
    pub highest_overall_level: RiskLevel,
}

/// CRUD + search + statistics over assessments of both kinds
#[derive(Clone)]
pub struct AssessmentRepository {
    store: Arc<DataStore>,
}

impl AssessmentRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<Assessment> {
        self.store.snapshot().assessments
    }

    pub fn get(&self, id: &str) -> Option<Assessment> {
        self.all().into_iter().find(|a| a.id == id)
    }

    /// Upsert; derived scoring fields are recomputed before the write
    pub fn save(&self, mut assessment: Assessment) -> StoreResult<Assessment> {
        assessment.rescore();
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.assessments, assessment))
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "assessment",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.assessments, id))?;
        Ok(())
    }

    /// Append a risk to an assessment; scoring refreshes in the same
    /// operation
    pub fn add_risk(&self, assessment_id: &str, risk: Risk) -> RepoResult<Assessment> {
        let Some(mut assessment) = self.get(assessment_id) else {
            return Err(RepoError::NotFound {
                collection: "assessment",
                id: assessment_id.to_string(),
            });
        };
        assessment.add_risk(risk);
        Ok(self.save(assessment)?)
    }

    /// Re-rate one risk; score, residual level, and the overall level
    /// all move together
    pub fn rate_risk(
        &self,
        assessment_id: &str,
        risk_id: &str,
        likelihood: RiskLevel,
        impact: RiskLevel,
    ) -> RepoResult<Assessment> {
        let Some(mut assessment) = self.get(assessment_id) else {
            return Err(RepoError::NotFound {
                collection: "assessment",
                id: assessment_id.to_string(),
            });
        };
        let Some(risk) = assessment.risks.iter_mut().find(|r| r.id == risk_id) else {
            return Err(RepoError::NotFound {
                collection: "risk",
                id: risk_id.to_string(),
            });
        };
        risk.set_ratings(likelihood, impact);
        Ok(self.save(assessment)?)
    }

    pub fn search(&self, filter: &AssessmentFilter) -> Vec<Assessment> {
        self.all()
            .into_iter()
            .filter(|a| filter.matches(a))
            .collect()
    }

    pub fn statistics(&self) -> AssessmentStatistics {
        let assessments = self.all();

        let mut stats = AssessmentStatistics {
            total: assessments.len(),
            highest_overall_level: RiskLevel::Low,
            ..AssessmentStatistics::default()
        };
        let mut score_sum = 0u32;
        for assessment in &assessments {
            *stats.by_kind.entry(assessment.kind).or_insert(0) += 1;
            *stats.by_status.entry(assessment.status).or_insert(0) += 1;
            *stats
                .by_overall_level
                .entry(assessment.overall_risk_level)
                .or_insert(0) += 1;
            stats.highest_overall_level =
                stats.highest_overall_level.max(assessment.overall_risk_level);
            for risk in &assessment.risks {
                stats.total_risks += 1;
                if risk.status == RiskStatus::Open {
                    stats.open_risks += 1;
                }
                score_sum += u32::from(risk.risk_score);
            }
        }
        stats.average_risk_score = if stats.total_risks == 0 {
            0.0
        } else {
            f64::from(score_sum) / stats.total_risks as f64
        };
        stats
    }
}
