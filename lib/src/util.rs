use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use tokio::io::AsyncReadExt as _;

use crate::errors::*;

macro_rules! make_log_macro {
    (@wdoll $macro_name:ident, $block_name:literal, ($dol:tt)) => {
        #[allow(unused_macros)]
        macro_rules! $macro_name {
            ($dol($args:tt)+) => {
                ::log::$macro_name!(target: $block_name, $dol($args)+)
            };
        }
    };
    ($macro_name:ident, $block_name:literal) => {
        make_log_macro!(@wdoll $macro_name, $block_name, ($));
    };
}

/// Leading integer of a sysfs attribute, surrounding whitespace allowed.
static INT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\n\r\x0B\x0C]*([+-]?[0-9]+)").expect("integer prefix regex is valid")
});

pub fn deserialize_toml_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|err| {
        BacklightNotifyError::Config(format!(
            "Failed to read config file {}: {err}",
            path.display()
        ))
    })?;

    toml::from_str(&contents).map_err(|err| {
        let location_msg = err
            .span()
            .map(|span| {
                let line = 1 + contents.as_bytes()[..(span.start)]
                    .iter()
                    .filter(|b| **b == b'\n')
                    .count();
                format!(" at line {line}")
            })
            .unwrap_or_default();
        BacklightNotifyError::Config(format!(
            "Failed to deserialize TOML file {}{}: {}",
            path.display(),
            location_msg,
            err.message()
        ))
    })
}

pub async fn read_file(path: impl AsRef<Path>) -> std::io::Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut content = String::new();
    file.read_to_string(&mut content).await?;
    Ok(content)
}

/// Parse the leading base-10 integer of `text`.
///
/// Anything after the digits is ignored and text without a leading number
/// yields 0. Out of range values saturate.
pub fn parse_int_prefix(text: &str) -> i64 {
    let Some(digits) = INT_PREFIX.captures(text).and_then(|c| c.get(1)) else {
        return 0;
    };
    let digits = digits.as_str();
    digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Read a single integer out of a text state file.
///
/// Only opening or reading the file can fail, the content itself always
/// yields a number (see [`parse_int_prefix`]).
pub async fn read_int(path: impl AsRef<Path>) -> Result<i64> {
    let path = path.as_ref();
    let content = read_file(path)
        .await
        .map_err(|e| BacklightNotifyError::io(path, e))?;
    Ok(parse_int_prefix(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sysfs_value_with_newline() {
        assert_eq!(parse_int_prefix("4882\n"), 4882);
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        assert_eq!(parse_int_prefix("  \t 96000  \n"), 96000);
    }

    #[test]
    fn trailing_garbage_is_not_an_error() {
        assert_eq!(parse_int_prefix("120abc"), 120);
        assert_eq!(parse_int_prefix("7 8"), 7);
    }

    #[test]
    fn non_numeric_prefix_yields_zero() {
        assert_eq!(parse_int_prefix("abc120"), 0);
        assert_eq!(parse_int_prefix(""), 0);
        assert_eq!(parse_int_prefix("\n"), 0);
        assert_eq!(parse_int_prefix("-"), 0);
    }

    #[test]
    fn accepts_signs() {
        assert_eq!(parse_int_prefix("-15\n"), -15);
        assert_eq!(parse_int_prefix("+15"), 15);
    }

    #[test]
    fn saturates_out_of_range_values() {
        assert_eq!(parse_int_prefix("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_int_prefix("-99999999999999999999999"), i64::MIN);
    }

    #[tokio::test]
    async fn read_int_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actual_brightness");
        std::fs::write(&path, "512\n").unwrap();

        assert_eq!(read_int(&path).await.unwrap(), 512);
    }

    #[tokio::test]
    async fn read_int_missing_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");

        let err = read_int(&path).await.unwrap_err();
        assert!(matches!(err, BacklightNotifyError::Io { .. }));
        assert!(err.is_per_event());
    }
}
