// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use estate_app::{ChannelRetention, PageSize};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "estate";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_PAGE_SIZE: usize = 5;
const DEFAULT_LOG_FILTER: &str = "info";
const DATA_FILE_NAME: &str = "properties.json";
const LOG_FILE_NAME: &str = "estate.log";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub table: TableSettings,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            table: TableSettings::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    pub page_size: Option<usize>,
    pub keep_channel_choices: Option<bool>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE),
            keep_channel_choices: Some(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub filter: Option<String>,
    pub path: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            filter: Some(DEFAULT_LOG_FILTER.to_owned()),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("ESTATE_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set ESTATE_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and keep settings under [data], [table], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                self.version,
                path.display()
            );
        }

        if let Some(rows) = self.table.page_size {
            if PageSize::from_rows(rows).is_none() {
                bail!(
                    "table.page_size in {} must be one of 5, 10, 25, got {}",
                    path.display(),
                    rows
                );
            }
        }

        if self
            .data
            .path
            .as_deref()
            .is_some_and(|data_path| data_path.trim().is_empty())
        {
            bail!("data.path in {} must not be empty", path.display());
        }

        if let Some(filter) = &self.log.filter {
            EnvFilter::try_new(filter).with_context(|| {
                format!("log.filter in {} is not a valid filter: {filter:?}", path.display())
            })?;
        }

        Ok(())
    }

    /// `[data].path`, then `ESTATE_DATA_PATH`, then the platform data dir.
    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data.path {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = env::var_os("ESTATE_DATA_PATH") {
            return Ok(PathBuf::from(path));
        }
        Ok(data_dir()?.join(DATA_FILE_NAME))
    }

    pub fn page_size(&self) -> PageSize {
        self.table
            .page_size
            .and_then(PageSize::from_rows)
            .unwrap_or_default()
    }

    pub fn channel_retention(&self) -> ChannelRetention {
        if self.table.keep_channel_choices.unwrap_or(false) {
            ChannelRetention::KeepById
        } else {
            ChannelRetention::ResetOnNewList
        }
    }

    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(data_dir()?.join(LOG_FILE_NAME)),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# estate config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Optional. Default is platform data dir (for example ~/.local/share/estate/{})\n# path = \"/absolute/path/to/properties.json\"\n\n[table]\n# One of 5, 10, 25\npage_size = {}\n# Keep each row's channel choice across reloads when the property is still listed\nkeep_channel_choices = false\n\n[log]\n# tracing filter; ESTATE_LOG overrides it\nfilter = \"{}\"\n# path = \"/absolute/path/to/estate.log\"\n",
            path.display(),
            DATA_FILE_NAME,
            DEFAULT_PAGE_SIZE,
            DEFAULT_LOG_FILTER,
        )
    }
}

fn data_dir() -> Result<PathBuf> {
    let root = dirs::data_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set [data].path or ESTATE_DATA_PATH")
    })?;
    Ok(root.join(APP_NAME))
}
