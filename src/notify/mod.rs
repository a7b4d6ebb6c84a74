//! Store-member notification collaborator.
//!
//! Notifications are best effort: the clock event is already durable by the
//! time one is sent, so a failed delivery is logged and swallowed, never
//! surfaced to the caller.

use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use rusqlite::Connection;
use serde::Serialize;

/// Payload handed to the delivery layer. Delivery mechanics (push service,
/// websocket, ...) live outside this crate.
#[derive(Debug, Clone, Serialize)]
pub struct StoreNotification {
    pub store_id: String,
    pub title: String,
    pub body: String,
    pub target_url: String,
    pub exclude_owner_ids: Vec<String>,
}

pub trait Notifier {
    fn send(&self, notification: &StoreNotification) -> AppResult<()>;
}

/// Records notifications in the audit log table of the given database.
/// Stands in for the real delivery service in the CLI.
pub struct DbNotifier {
    pub database: String,
}

impl Notifier for DbNotifier {
    fn send(&self, notification: &StoreNotification) -> AppResult<()> {
        let conn = Connection::open(&self.database)?;
        deliver_to_log(&conn, notification)
    }
}

fn deliver_to_log(conn: &Connection, notification: &StoreNotification) -> AppResult<()> {
    let payload = serde_json::to_string(notification)
        .unwrap_or_else(|_| notification.body.clone());
    log::audit(conn, "notification", &notification.store_id, &payload)
}

/// Drops every notification. Useful where no delivery target exists.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn send(&self, _notification: &StoreNotification) -> AppResult<()> {
        Ok(())
    }
}

/// Fire-and-forget send: a failure becomes a console warning and an audit
/// row, nothing more.
pub fn notify_best_effort(
    notifier: &dyn Notifier,
    conn: &Connection,
    notification: &StoreNotification,
) {
    if let Err(e) = notifier.send(notification) {
        warning(format!("Notification not delivered: {}", e));
        let _ = log::audit(
            conn,
            "notify_failed",
            &notification.store_id,
            &format!("{}: {}", notification.title, e),
        );
    }
}
