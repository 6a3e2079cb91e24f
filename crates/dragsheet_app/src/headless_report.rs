//! Report output model for headless scenario runs.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

/// Report status for a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub steps_run: usize,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
}

impl ScenarioReport {
    pub fn passed(steps_run: usize, elapsed_frames: u64, elapsed_ms: u64) -> Self {
        Self {
            scenario: None,
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            code: None,
            message: None,
            steps_run,
            elapsed_frames,
            elapsed_ms,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        code: String,
        message: String,
        elapsed_frames: u64,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            scenario: None,
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            code: Some(code),
            message: Some(message),
            steps_run: failed_step_index + 1,
            elapsed_frames,
            elapsed_ms,
        }
    }

    /// Attach the scenario's name
    pub fn named(mut self, name: Option<String>) -> Self {
        self.scenario = name;
        self
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    /// Write pretty JSON to a relative path, creating parent directories
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(path, payload)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
