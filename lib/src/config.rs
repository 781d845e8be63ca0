use crate::consts::*;
use crate::device::BacklightDevice;
use crate::errors::*;
use crate::util::*;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use smart_default::SmartDefault;

make_log_macro!(debug, "config");

/// Contents of `config.toml`, every key is optional.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub debug: bool,

    /// Seconds, -1 uses the server default and 0 never expires
    #[default(EXPIRES_DEFAULT)]
    pub timeout: i32,

    pub backlight: Option<String>,
}

impl FileConfig {
    /// Load `path`, or the default config location when `path` is `None`.
    ///
    /// A missing default file yields the defaults, a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => deserialize_toml_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => {
                    debug!("loading {}", path.display());
                    deserialize_toml_file(path)
                }
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }
}

/// `$XDG_CONFIG_HOME/backlight-notify/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join("config.toml"))
}

/// Values given on the command line, they win over the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub debug: bool,
    pub timeout: Option<i32>,
    pub backlight: Option<String>,
}

/// Resolved configuration, immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub debug: bool,
    pub timeout_ms: i32,
    pub device: BacklightDevice,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        Self::resolve_with_root(file, overrides, DEVICES_PATH)
    }

    pub fn resolve_with_root(
        file: FileConfig,
        overrides: Overrides,
        root: impl AsRef<Path>,
    ) -> Result<Self> {
        let backlight = overrides.backlight.or(file.backlight).ok_or_else(|| {
            BacklightNotifyError::Config("-b/--backlight is required argument".into())
        })?;
        let timeout = overrides.timeout.unwrap_or(file.timeout);

        Ok(Self {
            debug: overrides.debug || file.debug,
            timeout_ms: timeout_to_millis(timeout),
            device: BacklightDevice::with_root(root, &backlight)?,
        })
    }
}

/// Positive timeouts are seconds, zero and negative values are passed through.
pub fn timeout_to_millis(timeout: i32) -> i32 {
    if SCALED_TIMEOUT_RANGE.contains(&timeout) {
        timeout.saturating_mul(1000)
    } else {
        timeout
    }
}
