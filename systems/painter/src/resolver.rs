//! Maps pointer positions reported in viewport space onto field tiles.

use glam::Vec2;
use tank_editor_core::{TileIndex, BLOCK_SIZE, FIELD_BLOCK_SIZE, ZOOM_LEVEL};

/// Scroll position and border thickness of one element on the path from the
/// rendering surface up to the document root.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceOffset {
    /// Distance the element's content is scrolled.
    pub scroll: Vec2,
    /// Thickness of the element's left and top borders.
    pub border: Vec2,
}

impl SurfaceOffset {
    /// Creates an offset from scroll and border components.
    #[must_use]
    pub const fn new(scroll: Vec2, border: Vec2) -> Self {
        Self { scroll, border }
    }
}

/// Scale of the tiles drawn by the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    /// Unzoomed edge length of a tile in surface pixels.
    pub block_size: f32,
    /// Magnification applied by the surface.
    pub zoom_level: f32,
}

impl GridGeometry {
    /// Creates a geometry descriptor.
    #[must_use]
    pub const fn new(block_size: f32, zoom_level: f32) -> Self {
        Self {
            block_size,
            zoom_level,
        }
    }

    /// Edge length of a tile in viewport pixels.
    #[must_use]
    pub fn tile_extent(&self) -> f32 {
        self.block_size * self.zoom_level
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(BLOCK_SIZE, ZOOM_LEVEL)
    }
}

/// Resolves the tile under a pointer.
///
/// `chain` starts with the rendering surface itself and continues through its
/// ancestors up to the root. Offsets change whenever anything scrolls, so the
/// chain must be sampled afresh for every pointer event. Returns `None` when
/// the pointer lies outside the field.
#[must_use]
pub fn resolve_tile(
    pointer: Vec2,
    chain: &[SurfaceOffset],
    geometry: GridGeometry,
) -> Option<TileIndex> {
    let extent = geometry.tile_extent();
    if !(extent > f32::EPSILON) {
        return None;
    }

    let accumulated = chain
        .iter()
        .fold(Vec2::ZERO, |total, offset| total + offset.scroll + offset.border);
    let surface_border = chain.first().map_or(Vec2::ZERO, |surface| surface.border);
    let local = pointer + accumulated - surface_border;

    let row = (local.y / extent).floor();
    let column = (local.x / extent).floor();
    let bound = FIELD_BLOCK_SIZE as f32;
    if !(row >= 0.0 && row < bound && column >= 0.0 && column < bound) {
        return None;
    }

    TileIndex::from_position(row as u32, column as u32)
}
