//! Team repository - members, tasks, and meetings
//!
//! Three collections behind one repository; the statistics feed the
//! reporting engine's engagement rule.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::entities::{TaskStatus, TeamMeeting, TeamMember, TeamTask};
use crate::domain::value_objects::Priority;
use crate::error::{RepoError, RepoResult, StoreResult};
use crate::infrastructure::store::DataStore;

use super::{percentage, remove_by_id, text_matches, upsert};

/// Conjunctive filter over team tasks; `None` = no constraint
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub text: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
}

impl TaskFilter {
    fn matches(&self, task: &TeamTask) -> bool {
        if let Some(text) = &self.text {
            if !text_matches(text, &[&task.title, &task.description], &[]) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if &task.assignee != assignee {
                return false;
            }
        }
        true
    }
}

/// Typed partial update for tasks; every field optional
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub due_date: Option<chrono::DateTime<Utc>>,
}

impl TaskPatch {
    fn apply(self, task: &mut TeamTask) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(assignee) = self.assignee {
            task.assignee = assignee;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
    }
}

/// Aggregated team statistics
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TeamStatistics {
    pub total_members: usize,
    pub active_members: usize,
    pub total_tasks: usize,
    pub by_task_status: BTreeMap<TaskStatus, usize>,
    pub overdue_tasks: usize,
    /// Percentage of tasks with status `done`; 0.0 with no tasks
    pub task_completion_rate: f64,
    pub meetings_held: usize,
}

/// CRUD + search + statistics over the team collections
#[derive(Clone)]
pub struct TeamRepository {
    store: Arc<DataStore>,
}

impl TeamRepository {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    // -- members -----------------------------------------------------------

    pub fn members(&self) -> Vec<TeamMember> {
        self.store.snapshot().team_members
    }

    pub fn member(&self, id: &str) -> Option<TeamMember> {
        self.members().into_iter().find(|member| member.id == id)
    }

    pub fn save_member(&self, member: TeamMember) -> StoreResult<TeamMember> {
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.team_members, member))
    }

    pub fn delete_member(&self, id: &str) -> RepoResult<()> {
        if self.member(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "team member",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.team_members, id))?;
        Ok(())
    }

    // -- tasks -------------------------------------------------------------

    pub fn tasks(&self) -> Vec<TeamTask> {
        self.store.snapshot().team_tasks
    }

    pub fn task(&self, id: &str) -> Option<TeamTask> {
        self.tasks().into_iter().find(|task| task.id == id)
    }

    pub fn save_task(&self, task: TeamTask) -> StoreResult<TeamTask> {
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.team_tasks, task))
    }

    /// Apply a partial update; `NotFound` when the id is absent
    pub fn update_task(&self, id: &str, patch: TaskPatch) -> RepoResult<TeamTask> {
        if self.task(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "team task",
                id: id.to_string(),
            });
        }
        let updated = self.store.mutate(|snapshot| {
            let task = snapshot.team_tasks.iter_mut().find(|task| task.id == id)?;
            patch.apply(task);
            task.updated_at = Utc::now();
            Some(task.clone())
        })?;
        updated.ok_or_else(|| RepoError::NotFound {
            collection: "team task",
            id: id.to_string(),
        })
    }

    /// Move a task to a new status; `NotFound` when the id is absent
    pub fn set_task_status(&self, id: &str, status: TaskStatus) -> RepoResult<TeamTask> {
        self.update_task(
            id,
            TaskPatch {
                status: Some(status),
                ..TaskPatch::default()
            },
        )
    }

    pub fn delete_task(&self, id: &str) -> RepoResult<()> {
        if self.task(id).is_none() {
            return Err(RepoError::NotFound {
                collection: "team task",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.team_tasks, id))?;
        Ok(())
    }

    pub fn search_tasks(&self, filter: &TaskFilter) -> Vec<TeamTask> {
        self.tasks()
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    // -- meetings ----------------------------------------------------------

    pub fn meetings(&self) -> Vec<TeamMeeting> {
        self.store.snapshot().team_meetings
    }

    pub fn save_meeting(&self, meeting: TeamMeeting) -> StoreResult<TeamMeeting> {
        self.store
            .mutate(|snapshot| upsert(&mut snapshot.team_meetings, meeting))
    }

    pub fn delete_meeting(&self, id: &str) -> RepoResult<()> {
        if self.meetings().iter().all(|meeting| meeting.id != id) {
            return Err(RepoError::NotFound {
                collection: "team meeting",
                id: id.to_string(),
            });
        }
        self.store
            .mutate(|snapshot| remove_by_id(&mut snapshot.team_meetings, id))?;
        Ok(())
    }

    // -- statistics --------------------------------------------------------

    pub fn statistics(&self) -> TeamStatistics {
        let snapshot = self.store.snapshot();
        let now = Utc::now();

        let mut stats = TeamStatistics {
            total_members: snapshot.team_members.len(),
            active_members: snapshot.team_members.iter().filter(|m| m.active).count(),
            total_tasks: snapshot.team_tasks.len(),
            meetings_held: snapshot.team_meetings.len(),
            ..TeamStatistics::default()
        };
        for task in &snapshot.team_tasks {
            *stats.by_task_status.entry(task.status).or_insert(0) += 1;
            if task.is_overdue_at(now) {
                stats.overdue_tasks += 1;
            }
        }
        let done = snapshot
            .team_tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count();
        stats.task_completion_rate = percentage(done, stats.total_tasks);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::infrastructure::backend::MemoryBackend;

    fn repo() -> TeamRepository {
        TeamRepository::new(Arc::new(DataStore::new(MemoryBackend::new())))
    }

    #[test]
    fn completion_rate_counts_done_tasks() {
        let repo = repo();
        let mut done = TeamTask::new("Write SSP section");
        done.status = TaskStatus::Done;
        repo.save_task(done).unwrap();
        repo.save_task(TeamTask::new("Collect evidence")).unwrap();

        let stats = repo.statistics();
        assert_eq!(stats.total_tasks, 2);
        assert_eq!(stats.task_completion_rate, 50.0);
    }

    #[test]
    fn overdue_tasks_feed_statistics() {
        let repo = repo();
        let mut task = TeamTask::new("Expired POA&M item");
        task.due_date = Some(Utc::now() - Duration::days(2));
        repo.save_task(task).unwrap();

        assert_eq!(repo.statistics().overdue_tasks, 1);
    }

    #[test]
    fn set_task_status_round_trips() {
        let repo = repo();
        let saved = repo.save_task(TeamTask::new("Review controls")).unwrap();
        let updated = repo.set_task_status(&saved.id, TaskStatus::Done).unwrap();
        assert_eq!(updated.status, TaskStatus::Done);

        assert!(repo.set_task_status("ghost", TaskStatus::Done).is_err());
    }

    #[test]
    fn members_and_meetings_count_in_statistics() {
        let repo = repo();
        repo.save_member(TeamMember::new("Dana", "ISSO")).unwrap();
        let mut inactive = TeamMember::new("Sam", "Auditor");
        inactive.active = false;
        repo.save_member(inactive).unwrap();
        repo.save_meeting(TeamMeeting::new("Kickoff", Utc::now()))
            .unwrap();

        let stats = repo.statistics();
        assert_eq!(stats.total_members, 2);
        assert_eq!(stats.active_members, 1);
        assert_eq!(stats.meetings_held, 1);
    }

    #[test]
    fn task_search_filters_conjunctively() {
        let repo = repo();
        let mut task = TeamTask::new("Evidence sweep");
        task.assignee = "dana".to_string();
        task.priority = Priority::High;
        repo.save_task(task).unwrap();

        let hits = repo.search_tasks(&TaskFilter {
            assignee: Some("dana".to_string()),
            priority: Some(Priority::High),
            ..TaskFilter::default()
        });
        assert_eq!(hits.len(), 1);

        let misses = repo.search_tasks(&TaskFilter {
            assignee: Some("dana".to_string()),
            status: Some(TaskStatus::Done),
            ..TaskFilter::default()
        });
        assert!(misses.is_empty());
    }
}
