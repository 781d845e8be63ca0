use crate::brightness::IconTier;
use crate::consts::*;
use crate::notification::{Notification, NotificationServer, Urgency};

make_log_macro!(warn, "presenter");

/// Owns the single notification that every brightness change updates.
pub struct NotificationPresenter<S> {
    notification: Notification,
    server: S,
}

impl<S: NotificationServer> NotificationPresenter<S> {
    /// Starts out with a blank notification, nothing is shown until [`Self::present`].
    pub fn new(server: S) -> Self {
        Self {
            notification: Notification::default(),
            server,
        }
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    /// Show `bucket` percent with the icon for `icon_tier`.
    ///
    /// Delivery failures are logged and otherwise ignored.
    pub async fn present(&mut self, bucket: i64, icon_tier: IconTier, timeout_ms: i32) {
        let value = i32::try_from(bucket).unwrap_or(if bucket < 0 { i32::MIN } else { i32::MAX });

        self.notification
            .update(NOTIFICATION_SUMMARY, "", icon_tier.icon_name());
        self.notification.set_timeout(timeout_ms);
        self.notification.set_urgency(Urgency::Low);
        self.notification.set_value_hint(Some(value));

        if let Err(e) = self.server.show(&self.notification).await {
            warn!("Cannot show notification: {e}");
        }
    }
}
