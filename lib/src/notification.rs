use crate::consts::*;
use crate::errors::*;

use std::collections::HashMap;
use std::future::Future;

use zbus::Connection;
use zbus::zvariant::Value;

make_log_macro!(debug, "notification");

#[zbus::dbus_proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: &HashMap<&str, &Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    Critical,
}

impl Urgency {
    /// Byte value of the `urgency` hint.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Normal => 1,
            Self::Critical => 2,
        }
    }
}

/// Content of the on screen notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub summary: String,
    pub body: String,
    pub icon: String,
    pub urgency: Urgency,
    /// -1 uses the server default, 0 never expires, otherwise milliseconds.
    pub timeout_ms: i32,
    pub value_hint: Option<i32>,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            summary: String::new(),
            body: String::new(),
            icon: String::new(),
            urgency: Urgency::default(),
            timeout_ms: EXPIRES_DEFAULT,
            value_hint: None,
        }
    }
}

impl Notification {
    pub fn update(&mut self, summary: &str, body: &str, icon: &str) {
        self.summary = summary.to_string();
        self.body = body.to_string();
        self.icon = icon.to_string();
    }

    pub fn set_timeout(&mut self, timeout_ms: i32) {
        self.timeout_ms = timeout_ms;
    }

    pub fn set_urgency(&mut self, urgency: Urgency) {
        self.urgency = urgency;
    }

    /// `None` removes the progress value.
    pub fn set_value_hint(&mut self, value: Option<i32>) {
        self.value_hint = value;
    }
}

/// Something that can put a [`Notification`] on screen.
///
/// Every call after the first replaces what the previous call showed.
pub trait NotificationServer {
    fn show(&mut self, notification: &Notification) -> impl Future<Output = Result<()>>;
}

/// `org.freedesktop.Notifications` on the session bus.
pub struct DbusNotificationServer {
    proxy: NotificationsProxy<'static>,
    /// Id handed out by the server, 0 until the first show.
    id: u32,
}

impl DbusNotificationServer {
    pub async fn new() -> Result<Self> {
        let dbus_conn = Connection::session()
            .await
            .error("Failed to open DBus session connection")?;

        Ok(Self {
            proxy: NotificationsProxy::new(&dbus_conn)
                .await
                .error("Failed to create NotificationsProxy")?,
            id: 0,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl NotificationServer for DbusNotificationServer {
    async fn show(&mut self, notification: &Notification) -> Result<()> {
        let urgency = Value::U8(notification.urgency.as_byte());
        let value = notification.value_hint.map(Value::I32);

        let mut hints: HashMap<&str, &Value<'_>> = HashMap::new();
        hints.insert(HINT_URGENCY, &urgency);
        if let Some(value) = &value {
            hints.insert(HINT_VALUE, value);
        }

        self.id = self
            .proxy
            .notify(
                APP_NAME,
                self.id,
                &notification.icon,
                &notification.summary,
                &notification.body,
                &[],
                &hints,
                notification.timeout_ms,
            )
            .await?;
        debug!("shown as notification {}", self.id);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    /// Records every notification it is asked to show.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingServer {
        pub(crate) shown: Arc<Mutex<Vec<Notification>>>,
        pub(crate) fail: bool,
    }

    impl RecordingServer {
        pub(crate) fn shown(&self) -> Vec<Notification> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl NotificationServer for RecordingServer {
        async fn show(&mut self, notification: &Notification) -> Result<()> {
            if self.fail {
                return Err(BacklightNotifyError::Other("server went away".into()));
            }
            self.shown.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    #[test]
    fn blank_notification() {
        let notification = Notification::default();
        assert!(notification.summary.is_empty());
        assert!(notification.icon.is_empty());
        assert_eq!(notification.timeout_ms, EXPIRES_DEFAULT);
        assert_eq!(notification.value_hint, None);
    }

    #[test]
    fn setters_update_in_place() {
        let mut notification = Notification::default();
        notification.update("Backlight", "", "notification-display-brightness-low");
        notification.set_timeout(5000);
        notification.set_urgency(Urgency::Low);
        notification.set_value_hint(Some(20));
        assert_eq!(notification.summary, "Backlight");
        assert_eq!(notification.timeout_ms, 5000);
        assert_eq!(notification.urgency, Urgency::Low);
        assert_eq!(notification.value_hint, Some(20));

        notification.set_value_hint(None);
        assert_eq!(notification.value_hint, None);
    }

    #[test]
    fn urgency_bytes() {
        assert_eq!(Urgency::Low.as_byte(), 0);
        assert_eq!(Urgency::Normal.as_byte(), 1);
        assert_eq!(Urgency::Critical.as_byte(), 2);
    }
}
