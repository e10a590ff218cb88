//! # Reminder Scheduler
//!
//! Arms one-shot notifications for reminders that fall due in the future.
//!
//! ## Behaviour
//!
//! - Scheduling is gated on the host's notification permission. An
//!   undetermined permission triggers a non-blocking request and nothing is
//!   armed; the answer only matters to later calls.
//! - A reminder whose instant has already passed is ignored. There is no
//!   catch-up notification.
//! - When a timer fires it reloads the reminder. Deleted, completed or
//!   re-timed reminders do not notify.
//! - Without a tokio runtime (a plain UI thread, say) nothing is armed.
//! - Timers are tracked per reminder id so they can be cancelled, and
//!   scheduling the same reminder again replaces its timer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, info, warn};
use shared::Reminder;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::backend::storage::Repository;

/// State of the host's notification capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// The user has not been asked yet
    Default,
    /// The host cannot show notifications at all
    Unsupported,
}

/// Payload delivered to the host when a reminder falls due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotification {
    pub reminder_id: i64,
    pub title: String,
    pub body: String,
    pub icon: Option<String>,
}

/// Host notification capability consumed by the scheduler
#[async_trait]
pub trait NotificationHost: Send + Sync {
    fn query_permission(&self) -> NotificationPermission;

    /// Ask the user for permission. The scheduler never waits on this.
    async fn request_permission(&self) -> NotificationPermission;

    async fn notify(&self, notification: ReminderNotification) -> anyhow::Result<()>;
}

/// What `schedule` did. Informational only; none of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Armed,
    PermissionRequested,
    PermissionDenied,
    Unsupported,
    AlreadyElapsed,
}

/// Fixed parts of every reminder notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub title: String,
    pub icon: Option<String>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            title: "Pet Care Reminder".to_string(),
            icon: Some("/favicon.ico".to_string()),
        }
    }
}

struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Clone)]
pub struct ReminderScheduler {
    host: Arc<dyn NotificationHost>,
    reminders: Repository<Reminder>,
    settings: NotificationSettings,
    pending: Arc<DashMap<i64, PendingTimer>>,
    next_generation: Arc<AtomicU64>,
}

impl ReminderScheduler {
    pub fn new(
        host: Arc<dyn NotificationHost>,
        reminders: Repository<Reminder>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            host,
            reminders,
            settings,
            pending: Arc::new(DashMap::new()),
            next_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Arm a notification for `reminder` if permitted and still in the future.
    ///
    /// Timers run on the current tokio runtime; outside one, nothing is armed
    /// and the outcome is `Unsupported`.
    pub fn schedule(&self, reminder: &Reminder) -> ScheduleOutcome {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!("No tokio runtime, not scheduling reminder {}", reminder.id);
                return ScheduleOutcome::Unsupported;
            }
        };

        match self.host.query_permission() {
            NotificationPermission::Unsupported => {
                debug!("Notifications unsupported, not scheduling reminder {}", reminder.id);
                return ScheduleOutcome::Unsupported;
            }
            NotificationPermission::Denied => {
                debug!("Notifications denied, not scheduling reminder {}", reminder.id);
                return ScheduleOutcome::PermissionDenied;
            }
            NotificationPermission::Default => {
                let host = Arc::clone(&self.host);
                runtime.spawn(async move {
                    let permission = host.request_permission().await;
                    info!("Notification permission is now {:?}", permission);
                });
                return ScheduleOutcome::PermissionRequested;
            }
            NotificationPermission::Granted => {}
        }

        let delay = match (reminder.datetime - Utc::now()).to_std() {
            Ok(delay) if !delay.is_zero() => delay,
            _ => {
                debug!("Reminder {} is already due, not scheduling", reminder.id);
                return ScheduleOutcome::AlreadyElapsed;
            }
        };

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        // The entry stays locked until the new timer is recorded, so a timer
        // that fires immediately cannot clear its slot before it exists.
        let entry = self.pending.entry(reminder.id);
        if let Entry::Occupied(existing) = &entry {
            existing.get().handle.abort();
            debug!("Replacing pending timer for reminder {}", reminder.id);
        }

        let handle = runtime.spawn(fire_when_due(
            FiringContext {
                host: Arc::clone(&self.host),
                reminders: self.reminders.clone(),
                settings: self.settings.clone(),
                pending: Arc::clone(&self.pending),
            },
            reminder.id,
            reminder.datetime,
            generation,
            delay,
        ));
        entry.insert(PendingTimer { generation, handle });

        info!(
            "Scheduled reminder {} '{}' for {}",
            reminder.id, reminder.title, reminder.datetime
        );
        ScheduleOutcome::Armed
    }

    /// Cancel the pending timer for `reminder_id`; false if none was armed
    pub fn cancel(&self, reminder_id: i64) -> bool {
        match self.pending.remove(&reminder_id) {
            Some((_, timer)) => {
                timer.handle.abort();
                debug!("Cancelled pending timer for reminder {}", reminder_id);
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self, reminder_id: i64) -> bool {
        self.pending.contains_key(&reminder_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

struct FiringContext {
    host: Arc<dyn NotificationHost>,
    reminders: Repository<Reminder>,
    settings: NotificationSettings,
    pending: Arc<DashMap<i64, PendingTimer>>,
}

async fn fire_when_due(
    ctx: FiringContext,
    reminder_id: i64,
    armed_for: DateTime<Utc>,
    generation: u64,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;
    ctx.pending
        .remove_if(&reminder_id, |_, timer| timer.generation == generation);

    // Reload: the reminder may have been edited or deleted since it was armed
    let current = match ctx.reminders.get(reminder_id) {
        Some(reminder) => reminder,
        None => {
            debug!("Reminder {} was deleted before it fell due", reminder_id);
            return;
        }
    };
    if current.completed {
        debug!("Reminder {} was completed before it fell due", reminder_id);
        return;
    }
    if current.datetime != armed_for {
        debug!("Reminder {} was re-timed, skipping stale timer", reminder_id);
        return;
    }

    let notification = ReminderNotification {
        reminder_id,
        title: ctx.settings.title.clone(),
        body: current.title.clone(),
        icon: ctx.settings.icon.clone(),
    };

    match ctx.host.notify(notification).await {
        Ok(()) => info!("Delivered reminder {}: {}", reminder_id, current.title),
        Err(e) => warn!("Failed to deliver reminder {}: {}", reminder_id, e),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Host double that records deliveries. Granting happens on request.
    pub struct RecordingHost {
        permission: Mutex<NotificationPermission>,
        pub delivered: Mutex<Vec<ReminderNotification>>,
        pub permission_requests: AtomicU64,
    }

    impl RecordingHost {
        pub fn new(permission: NotificationPermission) -> Arc<Self> {
            Arc::new(Self {
                permission: Mutex::new(permission),
                delivered: Mutex::new(Vec::new()),
                permission_requests: AtomicU64::new(0),
            })
        }

        pub fn delivered(&self) -> Vec<ReminderNotification> {
            self.delivered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationHost for RecordingHost {
        fn query_permission(&self) -> NotificationPermission {
            *self.permission.lock().unwrap()
        }

        async fn request_permission(&self) -> NotificationPermission {
            self.permission_requests.fetch_add(1, Ordering::SeqCst);
            let mut permission = self.permission.lock().unwrap();
            *permission = NotificationPermission::Granted;
            *permission
        }

        async fn notify(&self, notification: ReminderNotification) -> anyhow::Result<()> {
            self.delivered.lock().unwrap().push(notification);
            Ok(())
        }
    }
}
