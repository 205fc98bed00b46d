//! # scout-settings
//!
//! Configuration for the Scout pipeline, loaded once at startup and
//! immutable for the life of the process.
//!
//! Settings come from three layers (in priority order):
//!
//! 1. **Compiled defaults** — [`ScoutSettings::default()`], which describes
//!    the complete four-agent lead-generation pipeline
//! 2. **Settings file** — a JSON file deep-merged over the defaults
//! 3. **Environment variables** — `SCOUT_*` overrides (highest priority),
//!    the normal channel for API keys
//!
//! [`ScoutSettings::validate`] checks pipeline wiring (agent references,
//! context ordering, contracts) at load time so a bad configuration fails
//! at startup, never mid-run.

#![deny(unsafe_code)]

pub mod errors;
pub mod types;

pub use errors::{Result, SettingsError};
pub use types::*;

use std::path::Path;

use serde_json::Value;

/// Load settings, optionally merging a JSON file over compiled defaults.
///
/// `path = None` loads defaults plus env overrides. A missing file is an
/// error — pass `None` for "no file", a path only when one should exist.
pub fn load_settings(path: Option<&Path>) -> Result<ScoutSettings> {
    let mut settings = match path {
        Some(path) => load_settings_from_path(path)?,
        None => ScoutSettings::default(),
    };
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Load settings from a specific file, deep-merged over defaults.
///
/// Does not apply env overrides or validate — [`load_settings`] is the
/// full entry point.
pub fn load_settings_from_path(path: &Path) -> Result<ScoutSettings> {
    let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file_value: Value = serde_json::from_str(&raw)?;
    let default_value = serde_json::to_value(ScoutSettings::default())?;
    let merged = deep_merge(default_value, file_value);
    Ok(serde_json::from_value(merged)?)
}

/// Deep-merge `overlay` into `base`.
///
/// Objects merge key-by-key recursively; any other value in `overlay`
/// (including arrays and `null`) replaces the base value wholesale.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Apply `SCOUT_*` environment overrides.
fn apply_env_overrides(settings: &mut ScoutSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides from an arbitrary lookup (injectable for tests).
fn apply_overrides_from(
    settings: &mut ScoutSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(model) = lookup("SCOUT_MODEL") {
        settings.provider.model = model;
    }
    if let Some(key) = lookup("SCOUT_OPENAI_API_KEY") {
        settings.provider.api_key = Some(key);
    }
    if let Some(key) = lookup("SCOUT_SERPER_API_KEY") {
        settings.tools.search.api_key = Some(key);
    }
    if let Some(bind) = lookup("SCOUT_BIND") {
        settings.server.bind = bind;
    }
    if let Some(port) = lookup("SCOUT_PORT") {
        match port.parse() {
            Ok(port) => settings.server.port = port,
            Err(_) => tracing::warn!(port = %port, "SCOUT_PORT is not a valid port, ignored"),
        }
    }
}

impl ScoutSettings {
    /// Validate pipeline wiring.
    ///
    /// Checks that tasks exist, stage ids are unique, every task names a
    /// defined agent, context references point only at earlier stages, and
    /// the final stage produces lead records (the pipeline's result type).
    pub fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            return Err(SettingsError::Invalid("pipeline has no tasks".to_string()));
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if task.id.trim().is_empty() {
                return Err(SettingsError::Invalid("task with empty id".to_string()));
            }
            if seen.contains(&task.id.as_str()) {
                return Err(SettingsError::Invalid(format!(
                    "duplicate task id '{}'",
                    task.id
                )));
            }
            if !self.agents.contains_key(&task.agent) {
                return Err(SettingsError::Invalid(format!(
                    "task '{}' references unknown agent '{}'",
                    task.id, task.agent
                )));
            }
            for context_id in &task.context {
                if !seen.contains(&context_id.as_str()) {
                    return Err(SettingsError::Invalid(format!(
                        "task '{}' references '{}' which is not an earlier task",
                        task.id, context_id
                    )));
                }
            }
            seen.push(&task.id);
        }

        let last = self.tasks.last().expect("checked non-empty");
        if last.output != OutputKind::LeadRecords {
            return Err(SettingsError::Invalid(format!(
                "final task '{}' must produce lead records",
                last.id
            )));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
