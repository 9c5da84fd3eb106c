use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dashboard::{
    DASHBOARD_VERSION, DEFAULT_COMPLETION_RATE, DEFAULT_DEFECT_TARGET, DashboardSettings,
};
use crate::error::{ProdlineError, Result};
use crate::time::parse_wait_time;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub http_addr: String,
    pub api_endpoint: String,
    pub wait_time: Duration,
    pub refresh_interval: Duration,
    pub completion_rate: f64,
    pub defect_target: f64,
    pub dashboard_version: String,
}

impl Default for Config {
    fn default() -> Self {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_root = env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(home).join(".local/share"));

        Self {
            db_path: data_root.join("prodline/prodline.duckdb"),
            http_addr: "127.0.0.1:5000".to_string(),
            api_endpoint: "http://localhost:5000".to_string(),
            wait_time: Duration::from_secs(15),
            refresh_interval: Duration::from_secs(15),
            completion_rate: DEFAULT_COMPLETION_RATE,
            defect_target: DEFAULT_DEFECT_TARGET,
            dashboard_version: DASHBOARD_VERSION.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        let config_path = config_file_path();
        if let Some(file_overrides) = load_file_overrides(&config_path)? {
            apply_overrides(&mut cfg, file_overrides, "config file")?;
        }
        let env_overrides = load_env_overrides();
        apply_overrides(&mut cfg, env_overrides, "environment")?;
        Ok(cfg)
    }

    /// Endpoint the simulator posts readings to.
    pub fn submit_url(&self) -> String {
        format!("{}/submitData", self.api_endpoint.trim_end_matches('/'))
    }

    pub fn dashboard(&self) -> DashboardSettings {
        DashboardSettings {
            completion_rate: self.completion_rate,
            defect_target: self.defect_target,
            version: self.dashboard_version.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    db_path: Option<PathBuf>,
    http_addr: Option<String>,
    api_endpoint: Option<String>,
    wait_time: Option<String>,
    refresh_interval: Option<String>,
    completion_rate: Option<f64>,
    defect_target: Option<f64>,
    dashboard_version: Option<String>,
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = env::var("PRODLINE_CONFIG") {
        return PathBuf::from(path);
    }

    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(home).join(".config"));
    config_home.join("prodline/config.toml")
}

fn load_file_overrides(path: &Path) -> Result<Option<ConfigOverrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| ProdlineError::Config(format!("failed reading {}: {e}", path.display())))?;
    let parsed: ConfigOverrides = toml::from_str(&raw)
        .map_err(|e| ProdlineError::Config(format!("failed parsing {}: {e}", path.display())))?;
    Ok(Some(parsed))
}

fn load_env_overrides() -> ConfigOverrides {
    ConfigOverrides {
        db_path: env::var("PRODLINE_DB_PATH").ok().map(PathBuf::from),
        http_addr: env::var("PRODLINE_HTTP_ADDR").ok(),
        api_endpoint: env::var("API_ENDPOINT").ok(),
        wait_time: env::var("WAIT_TIME").ok(),
        refresh_interval: None,
        completion_rate: None,
        defect_target: None,
        dashboard_version: None,
    }
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides, source: &str) -> Result<()> {
    if let Some(v) = overrides.db_path {
        cfg.db_path = v;
    }
    if let Some(v) = overrides.http_addr {
        cfg.http_addr = v;
    }
    if let Some(v) = overrides.api_endpoint {
        cfg.api_endpoint = v;
    }
    if let Some(v) = overrides.wait_time {
        cfg.wait_time = parse_wait_time(&v).map_err(|e| {
            ProdlineError::Config(format!("bad wait_time in {source}: {e} (value={v})"))
        })?;
    }
    if let Some(v) = overrides.refresh_interval {
        cfg.refresh_interval = humantime::parse_duration(&v).map_err(|e| {
            ProdlineError::Config(format!("bad refresh_interval in {source}: {e} (value={v})"))
        })?;
    }
    if let Some(v) = overrides.completion_rate {
        if !(0.0..=100.0).contains(&v) {
            return Err(ProdlineError::Config(format!(
                "completion_rate in {source} must be within 0..=100 (value={v})"
            )));
        }
        cfg.completion_rate = v;
    }
    if let Some(v) = overrides.defect_target {
        cfg.defect_target = v;
    }
    if let Some(v) = overrides.dashboard_version {
        cfg.dashboard_version = v;
    }
    Ok(())
}
