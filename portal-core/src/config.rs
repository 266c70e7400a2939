use crate::{Error, Result};
use axum::http::{HeaderValue, Uri};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// 内置默认配置
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../configs.toml");

/// 顶层应用配置（启动后只读）
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub portal: PortalConfig,
    pub scan: ScanConfig,
    pub join: JoinConfig,
}

/// Web 前端配置
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub bind_addr: SocketAddr,
    /// Location every redirect points at.
    pub portal_url: String,
    /// Directory holding index.html and logo.png for the disk frontend.
    pub asset_dir: PathBuf,
    pub logo_max_age: Duration,
}

/// A program followed by its fixed leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub command: CommandLine,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct JoinConfig {
    pub command: CommandLine,
    pub open_flag: String,
}

// ============= TOML 解析用的临时结构 =============

#[derive(Deserialize)]
struct AppConfigFile {
    portal: PortalConfigToml,
    scan: ScanConfigToml,
    join: JoinConfigToml,
}

#[derive(Deserialize)]
struct PortalConfigToml {
    bind_addr: String,
    portal_url: String,
    asset_dir: PathBuf,
    logo_max_age_secs: u64,
}

#[derive(Deserialize)]
struct ScanConfigToml {
    command: Vec<String>,
    timeout_secs: u64,
}

#[derive(Deserialize)]
struct JoinConfigToml {
    command: Vec<String>,
    #[serde(default = "default_open_flag")]
    open_flag: String,
}

fn default_open_flag() -> String {
    "--open".to_string()
}

impl CommandLine {
    fn from_argv(table: &str, argv: Vec<String>) -> Result<Self> {
        let mut argv = argv.into_iter();
        match argv.next() {
            Some(program) if !program.is_empty() => Ok(Self {
                program,
                args: argv.collect(),
            }),
            _ => Err(Error::Config(format!("[{}] command must not be empty", table))),
        }
    }
}

impl TryFrom<AppConfigFile> for AppConfig {
    type Error = Error;

    fn try_from(t: AppConfigFile) -> Result<Self> {
        let bind_addr = SocketAddr::from_str(&t.portal.bind_addr).map_err(|e| {
            Error::Config(format!("invalid bind_addr {:?}: {}", t.portal.bind_addr, e))
        })?;
        if t.scan.timeout_secs == 0 {
            return Err(Error::Config("[scan] timeout_secs must be positive".into()));
        }
        if t.portal.logo_max_age_secs == 0 {
            return Err(Error::Config(
                "[portal] logo_max_age_secs must be positive".into(),
            ));
        }
        // Sent verbatim as the redirect `Location`.
        if HeaderValue::from_str(&t.portal.portal_url).is_err()
            || t.portal.portal_url.parse::<Uri>().is_err()
        {
            return Err(Error::Config(format!(
                "invalid portal_url {:?}",
                t.portal.portal_url
            )));
        }

        Ok(AppConfig {
            portal: PortalConfig {
                bind_addr,
                portal_url: t.portal.portal_url,
                asset_dir: t.portal.asset_dir,
                logo_max_age: Duration::from_secs(t.portal.logo_max_age_secs),
            },
            scan: ScanConfig {
                command: CommandLine::from_argv("scan", t.scan.command)?,
                timeout: Duration::from_secs(t.scan.timeout_secs),
            },
            join: JoinConfig {
                command: CommandLine::from_argv("join", t.join.command)?,
                open_flag: t.join.open_flag,
            },
        })
    }
}

// ============= 配置加载函数 =============

/// 从 TOML 字符串加载应用配置
pub fn load_config_from_toml_str(s: &str) -> Result<AppConfig> {
    let parsed: AppConfigFile = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
    AppConfig::try_from(parsed)
}

/// Loads `path` if given, otherwise the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            let s = std::fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
            load_config_from_toml_str(&s)
        }
        None => {
            tracing::info!("Using built-in default configuration");
            load_config_from_toml_str(DEFAULT_CONFIG_TOML)
        }
    }
}
