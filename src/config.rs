use anyhow::{Context, Result};
use glam::IVec2;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::{PlacementRect, PlacementSink, SurfaceError, SurfaceRegistry, SurfaceResult};

/// Integer pair as stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Xy {
    pub x: i32,
    pub y: i32,
}

impl From<IVec2> for Xy {
    fn from(v: IVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Xy> for IVec2 {
    fn from(v: Xy) -> Self {
        IVec2::new(v.x, v.y)
    }
}

/// One configured LED screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRecord {
    pub id: String,
    pub position: Xy,
    pub size: Xy,
}

impl ScreenRecord {
    pub fn new(id: impl Into<String>, placement: PlacementRect) -> Self {
        Self {
            id: id.into(),
            position: placement.position().into(),
            size: placement.size().into(),
        }
    }

    pub fn placement(&self) -> PlacementRect {
        PlacementRect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }
}

/// Persisted list of screens, in listing order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default)]
    pub screens: Vec<ScreenRecord>,
}

impl ScreenConfig {
    /// Placeholder added when nothing is configured yet
    pub const DEFAULT_ID: &'static str = "LED-0";
    pub const DEFAULT_SIZE: IVec2 = IVec2::new(64, 32);

    /// Load from a JSON file. A missing file yields an empty config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No screen config at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read screen config: {:?}", path))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse screen config: {:?}", path))?;

        info!("Loaded {} screens from {:?}", config.screens.len(), path);
        Ok(config)
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let text = serde_json::to_string_pretty(self).context("Failed to serialize screen config")?;
        std::fs::write(path, text).with_context(|| format!("Failed to write screen config: {:?}", path))
    }

    /// Add the placeholder screen when the list is empty.
    /// Returns true if the config changed and should be saved.
    pub fn ensure_default(&mut self) -> bool {
        if !self.screens.is_empty() {
            return false;
        }

        let size = Self::DEFAULT_SIZE;
        self.screens.push(ScreenRecord::new(
            Self::DEFAULT_ID,
            PlacementRect::new(0, 0, size.x, size.y),
        ));
        true
    }

    /// Registry with one surface per record, in record order
    pub fn build_registry(&self) -> SurfaceResult<SurfaceRegistry> {
        let mut registry = SurfaceRegistry::new();
        for record in &self.screens {
            registry.add(record.id.clone(), record.placement())?;
        }
        Ok(registry)
    }

    /// Snapshot of a registry's surfaces as records
    pub fn from_registry(registry: &SurfaceRegistry) -> Self {
        Self {
            screens: registry
                .list()
                .map(|(id, placement)| ScreenRecord::new(id, placement))
                .collect(),
        }
    }

    /// Update the stored position of a screen
    pub fn set_position(&mut self, id: &str, position: IVec2) -> SurfaceResult<()> {
        let record = self
            .screens
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| SurfaceError::NotFound(id.to_string()))?;
        record.position = position.into();
        Ok(())
    }
}

/// Screen config bound to the file it lives in; saves on every persisted move
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    config: ScreenConfig,
}

impl ConfigFile {
    /// Load `path`, adding and saving the placeholder screen if none exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut config = ScreenConfig::load(&path)?;

        if config.ensure_default() {
            warn!("No screens configured, adding placeholder '{}'", ScreenConfig::DEFAULT_ID);
            config.save(&path)?;
        }

        Ok(Self { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn save(&self) -> Result<()> {
        self.config.save(&self.path)
    }
}

impl PlacementSink for ConfigFile {
    fn persist(&mut self, id: &str, placement: PlacementRect) -> Result<()> {
        self.config
            .set_position(id, placement.position())
            .with_context(|| format!("Screen '{}' is not in {:?}", id, self.path))?;
        self.save()
    }
}
