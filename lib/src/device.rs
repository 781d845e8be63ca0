use crate::consts::*;
use crate::errors::*;

use std::path::{Component, Path, PathBuf};

make_log_macro!(debug, "device");

/// The sysfs files of one backlight device.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacklightDevice {
    pub device_name: String,
    pub max_brightness_file: PathBuf,
    pub actual_brightness_file: PathBuf,
}

impl BacklightDevice {
    /// Device `device_name` below [`DEVICES_PATH`].
    pub fn new(device_name: &str) -> Result<Self> {
        Self::with_root(DEVICES_PATH, device_name)
    }

    /// Device `device_name` below an arbitrary sysfs style root.
    pub fn with_root(root: impl AsRef<Path>, device_name: &str) -> Result<Self> {
        let mut components = Path::new(device_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(BacklightNotifyError::Config(format!(
                    "Invalid backlight {device_name:?}, expected a directory name below {}",
                    root.as_ref().display()
                )));
            }
        }

        let device_path = root.as_ref().join(device_name);
        debug!("using {}", device_path.display());

        Ok(Self {
            device_name: device_name.to_string(),
            max_brightness_file: device_path.join(FILE_MAX_BRIGHTNESS),
            actual_brightness_file: device_path.join(FILE_BRIGHTNESS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_sysfs_paths() {
        let device = BacklightDevice::new("intel_backlight").unwrap();
        assert_eq!(
            device.max_brightness_file,
            Path::new("/sys/class/backlight/intel_backlight/max_brightness")
        );
        assert_eq!(
            device.actual_brightness_file,
            Path::new("/sys/class/backlight/intel_backlight/actual_brightness")
        );
    }

    #[test]
    fn custom_root() {
        let device = BacklightDevice::with_root("/tmp/sys", "acpi_video0").unwrap();
        assert_eq!(
            device.actual_brightness_file,
            Path::new("/tmp/sys/acpi_video0/actual_brightness")
        );
    }

    #[test]
    fn rejects_names_outside_root() {
        for name in ["", ".", "..", "../etc", "a/b", "/abs"] {
            let err = BacklightDevice::new(name).unwrap_err();
            assert!(matches!(err, BacklightNotifyError::Config(_)), "{name}");
        }
    }
}
