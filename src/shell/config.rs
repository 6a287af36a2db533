use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub upload_dir: PathBuf,
    /// Absent means report requests are only recorded in memory.
    pub report_service_url: Option<String>,
    pub assignment_interval: Duration,
    pub employee_codes: Vec<String>,
    pub room_names: Vec<String>,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr: SocketAddr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), "0.0.0.0:8080".parse().ok())?;
        let interval_secs: u64 = parse_or("ASSIGNMENT_INTERVAL_SECS", lookup("ASSIGNMENT_INTERVAL_SECS"), Some(300))?;
        if interval_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "ASSIGNMENT_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            upload_dir: lookup("UPLOAD_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            report_service_url: lookup("REPORT_SERVICE_URL").filter(|url| !url.trim().is_empty()),
            assignment_interval: Duration::from_secs(interval_secs),
            employee_codes: split_list(lookup("EMPLOYEE_CODES")),
            room_names: split_list(lookup("ROOM_NAMES")),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        None => default.ok_or(ConfigError::Invalid {
            name,
            value: String::new(),
        }),
    }
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
