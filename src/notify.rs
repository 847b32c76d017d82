//! Outbound notification seam
//!
//! Delivery (email, chat, ...) lives outside this crate. The tracker hands
//! every new-visitor notification to a `Notifier` after it has been stored;
//! a failing notifier is logged and otherwise ignored.

use tracing::info;

use crate::error::NotifyError;
use crate::types::NotificationRecord;

/// Receiver for notifications produced by the tracker
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &NotificationRecord) -> Result<(), NotifyError>;
}

/// Default notifier: writes the message to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &NotificationRecord) -> Result<(), NotifyError> {
        info!(kind = %notification.kind, "{}", notification.message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeoInfo;
    use chrono::Utc;

    #[test]
    fn test_log_notifier_never_fails() {
        let notification = NotificationRecord::new_visitor(GeoInfo::local(), Utc::now());
        assert!(LogNotifier.notify(&notification).is_ok());
    }
}
