#![warn(clippy::match_same_arms)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::unnecessary_wraps)]

#[macro_use]
mod util;
mod brightness;
mod config;
mod consts;
mod device;
mod errors;
mod notification;
mod presenter;
mod watcher;

use std::future::Future;

use futures::StreamExt;

pub use crate::brightness::{BrightnessModel, IconTier, ReportedChange, bucket};
pub use crate::config::{FileConfig, Overrides, Settings, default_config_path, timeout_to_millis};
pub use crate::consts::{APP_NAME, DEVICES_PATH};
pub use crate::device::BacklightDevice;
pub use crate::errors::{BacklightNotifyError, Result};
pub use crate::notification::{
    DbusNotificationServer, Notification, NotificationServer, Urgency,
};
pub use crate::presenter::NotificationPresenter;
pub use crate::util::{parse_int_prefix, read_int};
use crate::watcher::*;

make_log_macro!(debug, "backlight_notify");
make_log_macro!(info, "backlight_notify");
make_log_macro!(warn, "backlight_notify");

/// Used to construct [`ChangeWatcher`]
pub struct ChangeWatcherBuilder {
    device: BacklightDevice,
    timeout_ms: i32,
}

impl ChangeWatcherBuilder {
    pub fn new(device: BacklightDevice) -> Self {
        Self {
            device,
            timeout_ms: consts::EXPIRES_DEFAULT,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.device.clone()).with_timeout_ms(settings.timeout_ms)
    }

    /// Defaults to -1 (server default).
    pub fn with_timeout_ms(mut self, timeout_ms: i32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Subscribe to changes of the device's `actual_brightness`.
    pub fn build<S: NotificationServer>(self, server: S) -> Result<ChangeWatcher<S>> {
        ChangeWatcher::new(self.device, self.timeout_ms, NotificationPresenter::new(server))
    }
}

/// Turns change events of `actual_brightness` into notifications.
pub struct ChangeWatcher<S> {
    rx: Receiver<notify::Result<notify::Event>>,
    _inotify_watcher: INotifyWatcher,
    device: BacklightDevice,
    timeout_ms: i32,
    model: BrightnessModel,
    presenter: NotificationPresenter<S>,
}

impl<S: NotificationServer> ChangeWatcher<S> {
    pub(crate) fn new(
        device: BacklightDevice,
        timeout_ms: i32,
        presenter: NotificationPresenter<S>,
    ) -> Result<Self> {
        let (inotify_watcher, rx) = file_watcher(&device.actual_brightness_file).map_err(
            |source| BacklightNotifyError::Subscription {
                path: device.actual_brightness_file.clone(),
                source,
            },
        )?;
        info!("watching {}", device.actual_brightness_file.display());

        Ok(Self {
            rx,
            _inotify_watcher: inotify_watcher,
            model: BrightnessModel::new(&device.max_brightness_file),
            device,
            timeout_ms,
            presenter,
        })
    }

    pub fn device(&self) -> &BacklightDevice {
        &self.device
    }

    pub fn model(&self) -> &BrightnessModel {
        &self.model
    }

    pub fn presenter(&self) -> &NotificationPresenter<S> {
        &self.presenter
    }

    /// Handle events until `shutdown` completes or the subscription ends.
    pub async fn run_until<F: Future<Output = ()>>(&mut self, shutdown: F) {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    debug!("shutdown requested");
                    return;
                }
                event = self.rx.next() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        warn!("change subscription ended");
                        return;
                    }
                },
            }
        }
    }

    /// Run the pipeline for content changes, ignore everything else.
    pub async fn handle_event(&mut self, event: notify::Result<notify::Event>) {
        match event {
            Ok(event) if is_change(&event.kind) => self.process_change().await,
            Ok(event) => debug!("ignoring {:?}", event.kind),
            Err(e) => debug!("watch error: {e}"),
        }
    }

    /// Read `actual_brightness` and present it if it changed.
    ///
    /// Failures drop this event only.
    pub async fn process_change(&mut self) {
        if let Err(e) = self.try_process_change().await {
            warn!("{e}");
        }
    }

    async fn try_process_change(&mut self) -> Result<()> {
        let raw = read_int(&self.device.actual_brightness_file).await?;
        if let Some(change) = self.model.on_raw_reading(raw).await? {
            self.presenter
                .present(change.bucket, change.icon_tier, self.timeout_ms)
                .await;
        }
        Ok(())
    }
}
