//! Notification host for the headless daemon: "shows" each notification by
//! logging it.

use async_trait::async_trait;
use log::info;

use crate::backend::domain::{NotificationHost, NotificationPermission, ReminderNotification};

pub struct LogNotificationHost {
    permission: NotificationPermission,
}

impl LogNotificationHost {
    pub fn new(enabled: bool) -> Self {
        let permission = if enabled {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        };
        Self { permission }
    }
}

#[async_trait]
impl NotificationHost for LogNotificationHost {
    fn query_permission(&self) -> NotificationPermission {
        self.permission
    }

    async fn request_permission(&self) -> NotificationPermission {
        self.permission
    }

    async fn notify(&self, notification: ReminderNotification) -> anyhow::Result<()> {
        info!("🔔 {}: {}", notification.title, notification.body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_permission_follows_config() {
        let enabled = LogNotificationHost::new(true);
        assert_eq!(enabled.query_permission(), NotificationPermission::Granted);

        let disabled = LogNotificationHost::new(false);
        assert_eq!(disabled.query_permission(), NotificationPermission::Denied);
        assert_eq!(disabled.request_permission().await, NotificationPermission::Denied);
    }

    #[tokio::test]
    async fn test_notify_succeeds() {
        let host = LogNotificationHost::new(true);
        let result = host
            .notify(ReminderNotification {
                reminder_id: 1,
                title: "Pet Care Reminder".to_string(),
                body: "Vet visit".to_string(),
                icon: None,
            })
            .await;
        assert!(result.is_ok());
    }
}
