//! JSON Export
//! Serializes the aggregate tables and conclusions for external consumers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::{SlotCount, ValueCount};
use crate::report::Conclusions;

/// The derived output surface of one dashboard build.
#[derive(Debug, Serialize)]
pub struct DashboardData<'a> {
    pub respondents: usize,
    pub availability: &'a [SlotCount],
    /// `None` when the source column was absent, `[]` when it was empty.
    pub satisfaction: Option<&'a [ValueCount]>,
    pub challenges: Option<&'a [ValueCount]>,
    pub conclusions: Option<&'a Conclusions>,
}

pub fn write_json(path: &Path, data: &DashboardData<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("failed to serialize the dashboard data")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
