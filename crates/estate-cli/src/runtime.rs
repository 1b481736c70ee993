// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use estate_app::{Property, PropertyId};
use estate_tui::{PropertyBatch, PropertyRuntime};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Properties stored as a JSON array on disk. Every load re-reads the file.
pub struct FileRuntime {
    path: PathBuf,
}

impl FileRuntime {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<Vec<Property>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "data file missing; starting empty");
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read data file {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).with_context(|| {
            format!(
                "parse data file {} -- expected a JSON array of properties",
                self.path.display()
            )
        })
    }

    fn write(&self, records: &[Property]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create data directory {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string_pretty(records).context("encode properties")?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, raw)
            .with_context(|| format!("write data file {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .with_context(|| format!("replace data file {}", self.path.display()))
    }
}

impl PropertyRuntime for FileRuntime {
    fn load_properties(&mut self) -> Result<PropertyBatch> {
        Ok(PropertyBatch::complete(self.read()?))
    }

    fn delete_properties(&mut self, ids: &BTreeSet<PropertyId>) -> Result<usize> {
        let mut records = self.read()?;
        let before = records.len();
        records.retain(|record| !ids.contains(&record.id));
        let removed = before - records.len();
        if removed > 0 {
            self.write(&records)?;
        }
        info!(path = %self.path.display(), removed, "deleted properties");
        Ok(removed)
    }
}

/// In-memory list for `--demo`; deletions last until exit.
pub struct MemoryRuntime {
    records: Vec<Property>,
}

impl MemoryRuntime {
    pub fn new(records: Vec<Property>) -> Self {
        Self { records }
    }

    pub fn demo() -> Self {
        Self::new(estate_testkit::demo_properties())
    }
}

impl PropertyRuntime for MemoryRuntime {
    fn load_properties(&mut self) -> Result<PropertyBatch> {
        Ok(PropertyBatch::complete(self.records.clone()))
    }

    fn delete_properties(&mut self, ids: &BTreeSet<PropertyId>) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|record| !ids.contains(&record.id));
        Ok(before - self.records.len())
    }
}
