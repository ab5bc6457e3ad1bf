use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use serde::Deserialize;
use tank_editor_core::{BLOCK_SIZE, ZOOM_LEVEL};
use tank_editor_system_painter::resolver::{GridGeometry, SurfaceOffset};

/// Settings read from `editor.toml`.
///
/// ```toml
/// [geometry]
/// block_size = 16.0
/// zoom_level = 2.0
///
/// [surface]
/// chain = [
///     { border = [2.0, 2.0] },
///     { scroll = [0.0, 120.0] },
/// ]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EditorConfig {
    geometry: GeometrySection,
    surface: SurfaceSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GeometrySection {
    block_size: f32,
    zoom_level: f32,
}

impl Default for GeometrySection {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            zoom_level: ZOOM_LEVEL,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SurfaceSection {
    chain: Vec<OffsetEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OffsetEntry {
    scroll: [f32; 2],
    border: [f32; 2],
}

impl EditorConfig {
    /// Loads the configuration, falling back to defaults when the file is missing.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!(
                "editor config {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read editor config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid editor config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse editor config toml contents")?;
        let GridGeometry {
            block_size,
            zoom_level,
        } = config.geometry();
        if !(block_size > 0.0 && zoom_level > 0.0) {
            bail!("block_size ({block_size}) and zoom_level ({zoom_level}) must be positive");
        }
        Ok(config)
    }

    /// Tile scale used to resolve pointer positions.
    pub(crate) fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.geometry.block_size, self.geometry.zoom_level)
    }

    /// Offsets from the rendering surface up to the root.
    pub(crate) fn chain(&self) -> Vec<SurfaceOffset> {
        self.surface
            .chain
            .iter()
            .map(|entry| SurfaceOffset::new(Vec2::from(entry.scroll), Vec2::from(entry.border)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = EditorConfig::parse("").expect("empty config is valid");
        assert_eq!(config.geometry(), GridGeometry::default());
        assert!(config.chain().is_empty());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = EditorConfig::load(Path::new("definitely/not/here.toml"))
            .expect("missing file falls back");
        assert_eq!(config.geometry(), GridGeometry::default());
    }

    #[test]
    fn reads_geometry_and_surface_chain() {
        let config = EditorConfig::parse(
            r#"
            [geometry]
            zoom_level = 3.0

            [surface]
            chain = [
                { border = [2.0, 2.0] },
                { scroll = [0.0, 120.0] },
            ]
            "#,
        )
        .expect("config parses");

        assert_eq!(config.geometry(), GridGeometry::new(BLOCK_SIZE, 3.0));
        assert_eq!(
            config.chain(),
            vec![
                SurfaceOffset::new(Vec2::ZERO, Vec2::new(2.0, 2.0)),
                SurfaceOffset::new(Vec2::new(0.0, 120.0), Vec2::ZERO),
            ]
        );
    }

    #[test]
    fn rejects_degenerate_geometry() {
        let result = EditorConfig::parse("[geometry]\nzoom_level = 0.0\n");
        assert!(result.is_err(), "zero zoom must be rejected");
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = EditorConfig::parse("[geometry]\ntile_size = 8.0\n");
        assert!(result.is_err(), "unknown keys must be rejected");
    }
}
