use std::ops::RangeFrom;

/// Application name reported to the notification server
pub const APP_NAME: &str = "backlight-notify";

/// Location of backlight devices
pub const DEVICES_PATH: &str = "/sys/class/backlight";

/// Filename for device's max brightness
pub const FILE_MAX_BRIGHTNESS: &str = "max_brightness";

/// Filename for current brightness, this is the file under surveillance.
pub const FILE_BRIGHTNESS: &str = "actual_brightness";

/// Directory below the user's config dir holding `config.toml`
pub const CONFIG_DIR: &str = "backlight-notify";

/// Summary shown on every brightness notification
pub const NOTIFICATION_SUMMARY: &str = "Backlight";

/// Buckets at or above this value use the high icon
pub const TIER_HIGH_THRESHOLD: i64 = 66;

/// Buckets at or above this value (and below [`TIER_HIGH_THRESHOLD`]) use the medium icon
pub const TIER_MEDIUM_THRESHOLD: i64 = 33;

/// Percentages are reported in steps of this size
pub const BUCKET_STEP: f64 = 5.0;

/// Let the notification server pick the timeout
pub const EXPIRES_DEFAULT: i32 = -1;

/// Timeouts in this range are given in seconds and get scaled to milliseconds
pub const SCALED_TIMEOUT_RANGE: RangeFrom<i32> = 1..;

/// Hint key carrying the progress value
pub const HINT_VALUE: &str = "value";

/// Hint key carrying the urgency byte
pub const HINT_URGENCY: &str = "urgency";
