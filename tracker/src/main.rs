use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use pet_care_tracker::backend::domain::advice;
use pet_care_tracker::backend::io::display::{
    format_record_date, format_reminder_datetime, record_type_label, render_advice,
};
use pet_care_tracker::backend::io::LogNotificationHost;
use pet_care_tracker::{initialize_backend, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // `pet-care advice <issue>` prints care advice and exits
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, issue] = args.as_slice() {
        if command == "advice" {
            match advice::lookup(issue) {
                Some(entry) => println!("{}", render_advice(entry)),
                None => warn!(
                    "Advice not found for '{}'. Known issues: {}",
                    issue,
                    advice::issues().collect::<Vec<_>>().join(", ")
                ),
            }
            return Ok(());
        }
    }

    info!("Starting Pet Care Tracker");
    let config = AppConfig::load()?;
    let host = Arc::new(LogNotificationHost::new(config.notifications_enabled));
    let state = initialize_backend(config, host)?;

    log_summary(&state);
    state.reminders.rearm_pending();

    info!("Waiting for reminders, press Ctrl+C to exit");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down with {} timers pending", state.reminders.scheduler().pending_count());
    Ok(())
}

fn log_summary(state: &AppState) {
    for profile in state.profiles.list() {
        info!("Pet: {} ({})", profile.name, profile.breed);
    }
    for record in state.health_records.list() {
        info!(
            "Health record: {} on {}",
            record_type_label(record.record_type),
            format_record_date(&record.date)
        );
    }
    for reminder in state.reminders.list() {
        let status = if reminder.completed { "done" } else { "open" };
        info!(
            "Reminder [{}]: {} at {}",
            status,
            reminder.title,
            format_reminder_datetime(&reminder.datetime)
        );
    }
}
