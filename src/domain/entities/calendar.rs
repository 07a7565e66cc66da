//! CalendarEvent entity - assessments, audits, reviews, deadlines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of scheduled compliance event
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Assessment,
    Audit,
    #[default]
    Review,
    Deadline,
    Training,
    Meeting,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventType::Assessment => "assessment",
            EventType::Audit => "audit",
            EventType::Review => "review",
            EventType::Deadline => "deadline",
            EventType::Training => "training",
            EventType::Meeting => "meeting",
        };
        f.write_str(name)
    }
}

/// Scheduling status of an event
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventStatus::Scheduled => "scheduled",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A dated compliance event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: EventStatus,
    /// Controls the event relates to, by control id
    #[serde(default)]
    pub related_control_ids: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// Create a scheduled event
    pub fn new(title: &str, event_type: EventType, date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            title: title.to_string(),
            description: String::new(),
            event_type,
            date,
            status: EventStatus::default(),
            related_control_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overdue = still scheduled with a date in the past
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.status == EventStatus::Scheduled && self.date < now
    }

    /// Upcoming = scheduled with a date in the future
    pub fn is_upcoming_at(&self, now: DateTime<Utc>) -> bool {
        self.status == EventStatus::Scheduled && self.date >= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn past_scheduled_events_are_overdue() {
        let now = Utc::now();
        let event = CalendarEvent::new("Q2 self-assessment", EventType::Assessment, now - Duration::days(7));
        assert!(event.is_overdue_at(now));
        assert!(!event.is_upcoming_at(now));
    }

    #[test]
    fn completed_and_cancelled_events_are_never_overdue() {
        let now = Utc::now();
        let mut event = CalendarEvent::new("Annual audit", EventType::Audit, now - Duration::days(1));
        event.status = EventStatus::Completed;
        assert!(!event.is_overdue_at(now));
        event.status = EventStatus::Cancelled;
        assert!(!event.is_overdue_at(now));
    }
}
