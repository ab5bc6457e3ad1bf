use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use tank_editor_core::{EditorSink, Route, StageConfig};

/// Reads a single stage stored as JSON.
pub(crate) fn read_stage(path: &Path) -> Result<StageConfig> {
    read_json(path).with_context(|| format!("failed to load stage from {}", path.display()))
}

/// Reads a JSON array of stages.
pub(crate) fn read_catalog(path: &Path) -> Result<Vec<StageConfig>> {
    read_json(path).with_context(|| format!("failed to load catalog from {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).context("failed to read file")?;
    serde_json::from_str(&contents).context("failed to parse JSON")
}

/// Writes `value` as pretty-printed JSON.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialise JSON")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Stage catalog that records everything an editing session hands out.
#[derive(Debug, Default)]
pub(crate) struct CatalogSink {
    /// Built-in and custom stages, updated by every save.
    pub(crate) stages: Vec<StageConfig>,
    /// Last stage saved during the session.
    pub(crate) saved: Option<StageConfig>,
    /// Last draft parked by the session.
    pub(crate) draft: Option<StageConfig>,
    /// Navigation requests in the order they were issued.
    pub(crate) routes: Vec<Route>,
}

impl CatalogSink {
    pub(crate) fn new(stages: Vec<StageConfig>) -> Self {
        Self {
            stages,
            ..Self::default()
        }
    }
}

impl EditorSink for CatalogSink {
    fn persist_stage(&mut self, stage: StageConfig) {
        let existing = self
            .stages
            .iter_mut()
            .find(|entry| entry.custom && entry.name == stage.name);
        match existing {
            Some(entry) => {
                log::info!("replacing custom stage {:?}", stage.name);
                *entry = stage.clone();
            }
            None => {
                log::info!("adding custom stage {:?}", stage.name);
                self.stages.push(stage.clone());
            }
        }
        self.saved = Some(stage);
    }

    fn stash_draft(&mut self, stage: StageConfig) {
        log::info!("parking draft {:?}", stage.name);
        self.draft = Some(stage);
    }

    fn navigate(&mut self, route: Route) {
        log::info!("navigating to {route:?}");
        self.routes.push(route);
    }
}
