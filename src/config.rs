use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

const DEFAULT_API_BASE: &str = "https://json.medrating.org/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every API path is appended to; always ends with `/`
    pub api_base: String,
    pub request_timeout: Duration,
    /// Where the local storage database lives
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let api_base: String = try_load("PHOTO_CATALOG_API_BASE", DEFAULT_API_BASE.to_string());
        let timeout_secs = try_load("PHOTO_CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        let data_dir = var("PHOTO_CATALOG_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Self {
            api_base: normalize_base(&api_base),
            request_timeout: Duration::from_secs(timeout_secs),
            data_dir,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => parse_or(key, &raw, default),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

/// Ensure API paths can be appended directly to the base
fn normalize_base(base: &str) -> String {
    let base = base.trim();
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

/// ~/.local/share/photo-catalog on Linux
fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("photo-catalog");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_adds_trailing_slash() {
        assert_eq!(normalize_base("http://localhost:3000"), "http://localhost:3000/");
        assert_eq!(normalize_base(" https://json.medrating.org/ "), DEFAULT_API_BASE);
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or("TIMEOUT", "12", 30u64), 12);
        assert_eq!(parse_or("TIMEOUT", "soon", 30u64), 30);
    }

    #[test]
    fn test_default_data_dir_is_app_specific() {
        assert!(default_data_dir().ends_with("photo-catalog"));
    }
}
