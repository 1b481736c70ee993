// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// The terminal belongs to the TUI, so events go to an append-only file.
pub fn init_tracing(configured_filter: &str, log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create log directory {}", parent.display()))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(resolve_filter(configured_filter)?)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("install tracing subscriber")
}

/// `ESTATE_LOG`, then `RUST_LOG`, then the configured directive.
fn resolve_filter(configured_filter: &str) -> Result<EnvFilter> {
    let estate_log = env::var("ESTATE_LOG").ok();
    let rust_log = env::var("RUST_LOG").ok();
    choose_filter(estate_log.as_deref(), rust_log.as_deref(), configured_filter)
}

/// A bad `ESTATE_LOG` is an error; a bad `RUST_LOG` may belong to another
/// tool, so it falls through to the configured directive.
fn choose_filter(
    estate_log: Option<&str>,
    rust_log: Option<&str>,
    configured_filter: &str,
) -> Result<EnvFilter> {
    if let Some(directive) = estate_log {
        return EnvFilter::try_new(directive)
            .with_context(|| format!("invalid ESTATE_LOG filter {directive:?}"));
    }
    if let Some(filter) = rust_log.and_then(|directive| EnvFilter::try_new(directive).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(configured_filter)
        .with_context(|| format!("invalid log filter {configured_filter:?}"))
}
