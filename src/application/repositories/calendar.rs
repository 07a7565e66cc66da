//! Calendar repository

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::entities::{CalendarEvent, EventStatus, EventType};
use crate::error::{RepoError, RepoResult, StoreResult};
use crate::infrastructure::store::DataStore;

use super::{percentage, remove_by_id, text_matches, upsert};

/// Conjunctive filter over calendar events; `None` = no constraint
#[derive(Debug, Clone, Default)]
pub struct CalendarFilter {
    pub text: Option<String>,
    pub event_type: Option<EventType>,
    pub status: Option<EventStatus>,
}

impl CalendarFilter {
    fn matches(&self, event: &CalendarEvent) -> bool {
        if let Some(text) = &self.text {
            if !text_matches(text, &[&event.title, &event.description], &[]) {
                return false;
            }
        }
        if let Some(event_type) = self.event_type {
            if event.event_type != event_type {
                return false;
            }
        }
        if let Some(status) = self.status {
            if event.status != status {
                return false;
            }
        }
        true
    }
}

/// Typed partial update; every field optional
#[derive(Debug, Clone, Default)]
pub struct CalendarPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<EventType>,
    pub date: Option<chrono::DateTime<Utc>>,
    pub status: Option<EventStatus>,
    pub related_control_ids: Option<Vec<String>>,
}

impl CalendarPatch {
    fn apply(self, event: &mut CalendarEvent) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(status) = self.status {
            event.status = status;
        }
        if let Some(related_control_ids) = self.related_control_ids {
            event.related_control_ids = related_control_ids;
        }
    }
}

/// Aggregated calendar statistics
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CalendarStatistics {
    pub total: usize,
    pub by_type: BTreeMap<EventType, usize>,
    pub by_status: BTreeMap<EventStatus, usize>,
    /// Scheduled events with a future date
    pub upcoming: usize,
    /// Scheduled events whose date has passed
    pub overdue: usize,
    /// Percentage with status `completed`; 0.0 for an empty collection
    pub completion_rate: f64,
}

/// CRUD + search + statistics over the compliance calendar
#[derive(Clone)]
pub struct CalendarRepository {
    store: Arc<DataStore>,
}

impl CalendarRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<CalendarEvent> {
        self.store.snapshot().calendar_events
    }

    pub fn get(&self, id: &str) -> Option<CalendarEvent> {
        self.all().into_iter().find(|event| event.id == id)
    }

    pub fn save(&self, event: CalendarEvent) -> StoreResult<CalendarEvent> {
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.calendar_events, event))
    }

    /// Apply a partial update; `NotFound` when the id is absent
    pub fn update(&self, id: &str, patch: CalendarPatch) -> RepoResult<CalendarEvent> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "calendar event",
                id: id.to_string(),
            });
        }
        let updated = self.store.mutate(|snapshot| {
            let event = snapshot
                .calendar_events
                .iter_mut()
                .find(|event| event.id == id)?;
            patch.apply(event);
            event.updated_at = Utc::now();
            Some(event.clone())
        })?;
        updated.ok_or_else(|| RepoError::NotFound {
            collection: "calendar event",
            id: id.to_string(),
        })
    }

    /// Mark an event completed; `NotFound` when the id is absent
    pub fn complete(&self, id: &str) -> RepoResult<CalendarEvent> {
        self.update(
            id,
            CalendarPatch {
                status: Some(EventStatus::Completed),
                ..CalendarPatch::default()
            },
        )
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        if self.get(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "calendar event",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.calendar_events, id))?;
        Ok(())
    }

    pub fn search(&self, filter: &CalendarFilter) -> Vec<CalendarEvent> {
        self.all()
            .into_iter()
            .filter(|event| filter.matches(event))
            .collect()
    }

    pub fn statistics(&self) -> CalendarStatistics {
        let events = self.all();
        let total = events.len();
        let now = Utc::now();

        let mut stats = CalendarStatistics {
            total,
            ..CalendarStatistics::default()
        };
        for event in &events {
            *stats.by_type.entry(event.event_type).or_insert(0) += 1;
            *stats.by_status.entry(event.status).or_insert(0) += 1;
            if event.is_upcoming_at(now) {
                stats.upcoming += 1;
            }
            if event.is_overdue_at(now) {
                stats.overdue += 1;
            }
        }
        let completed = events
            .iter()
            .filter(|e| e.status == EventStatus::Completed)
            .count();
        stats.completion_rate = percentage(completed, total);
        stats
    }
}
