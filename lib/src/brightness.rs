use crate::consts::*;
use crate::errors::*;
use crate::util::read_int;

use std::path::{Path, PathBuf};

make_log_macro!(debug, "brightness");

/// Icon shown next to the brightness value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconTier {
    High,
    Medium,
    Low,
}

impl IconTier {
    pub fn for_bucket(bucket: i64) -> Self {
        if bucket >= TIER_HIGH_THRESHOLD {
            Self::High
        } else if bucket >= TIER_MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            Self::High => "notification-display-brightness-high",
            Self::Medium => "notification-display-brightness-medium",
            Self::Low => "notification-display-brightness-low",
        }
    }
}

/// A raw reading that differs from the last reported one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportedChange {
    pub bucket: i64,
    pub icon_tier: IconTier,
}

/// Percentage of `raw` relative to `max`, rounded half-up to the nearest multiple of 5.
///
/// Readings above `max` are passed through, so the result can exceed 100.
pub fn bucket(raw: i64, max: i64) -> i64 {
    let percentage = (raw as f64 / max as f64) * 100.0;
    ((percentage / BUCKET_STEP + 0.5).floor() * BUCKET_STEP) as i64
}

/// Tracks the last reported raw brightness of a device.
pub struct BrightnessModel {
    max_brightness_file: PathBuf,
    last_reported_raw: Option<i64>,
}

impl BrightnessModel {
    pub fn new(max_brightness_file: impl Into<PathBuf>) -> Self {
        Self {
            max_brightness_file: max_brightness_file.into(),
            last_reported_raw: None,
        }
    }

    pub fn max_brightness_file(&self) -> &Path {
        &self.max_brightness_file
    }

    pub fn last_reported_raw(&self) -> Option<i64> {
        self.last_reported_raw
    }

    /// Feed a new raw reading.
    ///
    /// Returns `None` when `raw` equals the last reported value. The max
    /// brightness is re-read for every change; if that fails the error is
    /// returned and the last reported value is kept.
    pub async fn on_raw_reading(&mut self, raw: i64) -> Result<Option<ReportedChange>> {
        if self.last_reported_raw == Some(raw) {
            return Ok(None);
        }
        debug!("actual_brightness changed to {raw}");

        let max = read_int(&self.max_brightness_file).await?;
        if max <= 0 {
            return Err(BacklightNotifyError::InvalidMaxBrightness {
                path: self.max_brightness_file.clone(),
                value: max,
            });
        }

        let bucket = bucket(raw, max);
        let icon_tier = IconTier::for_bucket(bucket);
        debug!("{raw}/{max} -> {bucket}% ({icon_tier:?})");

        self.last_reported_raw = Some(raw);
        Ok(Some(ReportedChange { bucket, icon_tier }))
    }
}
