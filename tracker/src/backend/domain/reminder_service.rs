//! Reminder service: keeps scheduled notifications in step with the stored
//! reminders.
//!
//! - create arms a timer for the new reminder
//! - update re-arms it (or drops it once completed)
//! - delete and completion cancel it
//! - `rearm_pending` restores timers for stored reminders after a restart

use chrono::Utc;
use log::info;
use shared::{CreateReminderRequest, Reminder, UpdateReminderRequest};

use super::models::reminder::is_pending;
use super::scheduler::{ReminderScheduler, ScheduleOutcome};
use crate::backend::storage::{Repository, RepositoryError};

#[derive(Clone)]
pub struct ReminderService {
    repository: Repository<Reminder>,
    scheduler: ReminderScheduler,
}

impl ReminderService {
    pub fn new(repository: Repository<Reminder>, scheduler: ReminderScheduler) -> Self {
        Self { repository, scheduler }
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    pub fn list(&self) -> Vec<Reminder> {
        self.repository.list()
    }

    pub fn create(&self, draft: CreateReminderRequest) -> Result<Reminder, RepositoryError> {
        let reminder = self.repository.create(draft)?;
        self.scheduler.schedule(&reminder);
        Ok(reminder)
    }

    pub fn update(&self, id: i64, changes: UpdateReminderRequest) -> Result<Reminder, RepositoryError> {
        let reminder = self.repository.update(id, changes)?;
        self.sync_timer(&reminder);
        Ok(reminder)
    }

    pub fn delete(&self, id: i64) -> Result<Vec<Reminder>, RepositoryError> {
        let remaining = self.repository.delete(id)?;
        self.scheduler.cancel(id);
        Ok(remaining)
    }

    pub fn toggle(&self, id: i64, field: &str) -> Result<Reminder, RepositoryError> {
        let reminder = self.repository.toggle(id, field)?;
        self.sync_timer(&reminder);
        Ok(reminder)
    }

    /// Arm timers for every stored reminder that is open and still ahead
    pub fn rearm_pending(&self) -> usize {
        let now = Utc::now();
        let armed = self
            .repository
            .list()
            .iter()
            .filter(|reminder| is_pending(reminder, now))
            .filter(|reminder| self.scheduler.schedule(reminder) == ScheduleOutcome::Armed)
            .count();

        info!("Re-armed {} pending reminders", armed);
        armed
    }

    fn sync_timer(&self, reminder: &Reminder) {
        self.scheduler.cancel(reminder.id);
        if !reminder.completed {
            self.scheduler.schedule(reminder);
        }
    }
}
