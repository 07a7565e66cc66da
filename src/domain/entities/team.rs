//! Team entities - members, tasks, meetings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Priority;

/// Completion status of a team task
///
/// `Done` is the terminal status counted by the task completion rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Done => "done",
        };
        f.write_str(name)
    }
}

/// A member of the compliance team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl TeamMember {
    pub fn new(name: &str, role: &str) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            name: name.to_string(),
            email: String::new(),
            role: role.to_string(),
            responsibilities: Vec::new(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A compliance work item assigned to a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTask {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Assigned member, by member id
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl TeamTask {
    pub fn new(title: &str) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            title: title.to_string(),
            description: String::new(),
            assignee: String::new(),
            status: TaskStatus::default(),
            priority: Priority::default(),
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when a due date is set, has passed, and the task is not done
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < now)
    }
}

/// A recorded team meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMeeting {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    /// Attendees, by member id
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl TeamMeeting {
    pub fn new(title: &str, date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_entity_id(),
            title: title.to_string(),
            date,
            attendees: Vec::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_member_is_active() {
        let member = TeamMember::new("Dana", "ISSO");
        assert!(member.active);
    }

    #[test]
    fn done_tasks_are_never_overdue() {
        let now = Utc::now();
        let mut task = TeamTask::new("Update SSP");
        task.due_date = Some(now - Duration::days(3));
        assert!(task.is_overdue_at(now));

        task.status = TaskStatus::Done;
        assert!(!task.is_overdue_at(now));
    }

    #[test]
    fn task_without_due_date_is_never_overdue() {
        let task = TeamTask::new("Review POA&M");
        assert!(!task.is_overdue_at(Utc::now()));
    }
}
