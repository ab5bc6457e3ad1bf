#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tank stage editor.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! editor world, and pure systems. Adapters and systems submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! what actually changed. Commands that would not change anything produce no
//! events, so consumers never observe redundant notifications.
//!
//! The persisted [`StageConfig`] schema and the two collaborator seams the
//! editor talks to ([`StageLookup`] and [`EditorSink`]) also live here so that
//! every crate agrees on them without reaching for ambient global state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of tiles along each edge of the square battle field.
pub const FIELD_BLOCK_SIZE: u32 = 13;

/// Total number of tiles stored in a [`TileGrid`].
pub const TILE_COUNT: usize = (FIELD_BLOCK_SIZE * FIELD_BLOCK_SIZE) as usize;

/// Edge length of a single tile in unzoomed surface pixels.
pub const BLOCK_SIZE: f32 = 16.0;

/// Default magnification applied by the rendering surface.
pub const ZOOM_LEVEL: f32 = 2.0;

/// Largest number of tanks a single roster slot may hold.
pub const MAX_ENEMY_COUNT: u32 = 99;

/// Longest stage name accepted by the editor, counted in characters.
pub const MAX_NAME_LENGTH: usize = 12;

/// Direction of a single stepper adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Move one step up the ordered range.
    Increase,
    /// Move one step down the ordered range.
    Decrease,
}

/// Commands that express all permissible editor mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the whole editable content, typically once at session start.
    LoadContent {
        /// Content expanded from a persisted stage.
        content: EditorContent,
    },
    /// Replaces the stage name. Names longer than [`MAX_NAME_LENGTH`] are truncated.
    SetName {
        /// Requested name.
        name: String,
    },
    /// Moves the stage difficulty by one step, clamped to its range.
    StepDifficulty {
        /// Direction of the adjustment.
        step: Step,
    },
    /// Moves the tank level of a roster slot by one step, clamped to the level order.
    StepEnemyLevel {
        /// Zero-based roster slot.
        slot: usize,
        /// Direction of the adjustment.
        step: Step,
    },
    /// Moves the tank count of a roster slot by one, clamped to `0..=MAX_ENEMY_COUNT`.
    StepEnemyCount {
        /// Zero-based roster slot.
        slot: usize,
        /// Direction of the adjustment.
        step: Step,
    },
    /// Chooses the item kind used by subsequent paints.
    SelectItemKind {
        /// Kind that becomes the active brush.
        kind: ItemKind,
    },
    /// Flips one quadrant of the live mask of the selected wall kind.
    ToggleMaskQuadrant {
        /// Quadrant whose bit is flipped.
        quadrant: Quadrant,
    },
    /// Resets the live mask of the selected wall kind to fully solid.
    FillMask,
    /// Moves the highlighted cursor tile.
    MoveCursor {
        /// Tile under the pointer, or `None` when the pointer is off the grid.
        tile: Option<TileIndex>,
    },
    /// Writes the current brush item into a tile.
    PaintTile {
        /// Target tile, or `None` when the pointer is off the grid.
        tile: Option<TileIndex>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the editable content was replaced wholesale.
    ContentLoaded,
    /// Confirms that the stage name changed.
    NameChanged {
        /// Name after truncation.
        name: String,
    },
    /// Confirms that the stage difficulty changed.
    DifficultyChanged {
        /// Difficulty after the adjustment.
        difficulty: StageDifficulty,
    },
    /// Confirms that a roster slot changed.
    EnemySlotChanged {
        /// Zero-based roster slot.
        slot: usize,
        /// Slot contents after the adjustment.
        enemy: EnemySlot,
    },
    /// Confirms that a new brush kind is active.
    ItemKindSelected {
        /// Kind that became the active brush.
        kind: ItemKind,
    },
    /// Confirms that the live mask of a wall kind changed.
    MaskChanged {
        /// Wall kind owning the mask.
        kind: ItemKind,
        /// Mask after the change.
        mask: WallMask,
    },
    /// Confirms that the highlighted cursor tile moved.
    CursorMoved {
        /// Tile now highlighted, if any.
        tile: Option<TileIndex>,
    },
    /// Confirms that a tile received a new item.
    TilePainted {
        /// Tile that was written.
        tile: TileIndex,
        /// Item now stored in the tile.
        item: MapItem,
    },
    /// Reports that a tile was reset to empty to keep a single eagle on the field.
    EagleDisplaced {
        /// Tile that previously held the eagle.
        tile: TileIndex,
    },
}

/// One of the four sub-tile quadrants of a wall tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper-left quarter, bit `0b0001`.
    TopLeft,
    /// Upper-right quarter, bit `0b0010`.
    TopRight,
    /// Lower-left quarter, bit `0b0100`.
    BottomLeft,
    /// Lower-right quarter, bit `0b1000`.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in bit order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Bit representing the quadrant inside a [`WallMask`].
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::TopLeft => 0b0001,
            Self::TopRight => 0b0010,
            Self::BottomLeft => 0b0100,
            Self::BottomRight => 0b1000,
        }
    }
}

/// Four-bit mask describing which quadrants of a brick or steel tile are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallMask(u8);

impl WallMask {
    /// Mask with every quadrant present.
    pub const FULL: WallMask = WallMask(0b1111);

    /// Mask with no quadrant present.
    pub const EMPTY: WallMask = WallMask(0);

    /// Creates a mask from raw bits, discarding everything above the low nibble.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    /// Raw mask bits in the range `0..=0xf`.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reports whether the quadrant is present.
    #[must_use]
    pub const fn contains(self, quadrant: Quadrant) -> bool {
        self.0 & quadrant.bit() != 0
    }

    /// Returns the mask with the quadrant's bit flipped.
    #[must_use]
    pub const fn toggled(self, quadrant: Quadrant) -> Self {
        Self(self.0 ^ quadrant.bit())
    }
}

impl Default for WallMask {
    fn default() -> Self {
        Self::FULL
    }
}

/// Brush kinds offered by the editor palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Clears a tile.
    Empty,
    /// Destructible brick wall, shaped by the brick mask.
    Brick,
    /// Indestructible steel wall, shaped by the steel mask.
    Steel,
    /// Water that blocks tanks.
    River,
    /// Ice that makes tanks slide.
    Snow,
    /// Foliage drawn above tanks.
    Forest,
    /// The base that must be defended.
    Eagle,
}

impl ItemKind {
    /// Palette order used by the editor toolbar.
    pub const ALL: [ItemKind; 7] = [
        ItemKind::Empty,
        ItemKind::Brick,
        ItemKind::Steel,
        ItemKind::River,
        ItemKind::Snow,
        ItemKind::Forest,
        ItemKind::Eagle,
    ];

    /// Reports whether the kind carries a [`WallMask`].
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Brick | Self::Steel)
    }
}

/// Content of a single tile. Equality is structural, including wall masks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MapItem {
    /// Nothing occupies the tile.
    #[default]
    Empty,
    /// Brick wall with the quadrants present in the mask.
    Brick(WallMask),
    /// Steel wall with the quadrants present in the mask.
    Steel(WallMask),
    /// Water.
    River,
    /// Ice.
    Snow,
    /// Foliage.
    Forest,
    /// The base.
    Eagle,
}

impl MapItem {
    /// Palette kind of the item.
    #[must_use]
    pub const fn kind(self) -> ItemKind {
        match self {
            Self::Empty => ItemKind::Empty,
            Self::Brick(_) => ItemKind::Brick,
            Self::Steel(_) => ItemKind::Steel,
            Self::River => ItemKind::River,
            Self::Snow => ItemKind::Snow,
            Self::Forest => ItemKind::Forest,
            Self::Eagle => ItemKind::Eagle,
        }
    }

    /// Reports whether the item is the eagle.
    #[must_use]
    pub const fn is_eagle(self) -> bool {
        matches!(self, Self::Eagle)
    }
}

/// Row-major index of a tile inside the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileIndex(u16);

impl TileIndex {
    /// Creates an index, returning `None` when it lies outside the field.
    #[must_use]
    pub fn new(value: usize) -> Option<Self> {
        if value < TILE_COUNT {
            u16::try_from(value).ok().map(Self)
        } else {
            None
        }
    }

    /// Creates an index from a row and column, returning `None` outside the field.
    #[must_use]
    pub fn from_position(row: u32, column: u32) -> Option<Self> {
        if row < FIELD_BLOCK_SIZE && column < FIELD_BLOCK_SIZE {
            let value = usize::try_from(row * FIELD_BLOCK_SIZE + column).ok()?;
            Self::new(value)
        } else {
            None
        }
    }

    /// Numeric position inside the row-major tile sequence.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Zero-based row of the tile.
    #[must_use]
    pub const fn row(self) -> u32 {
        self.0 as u32 / FIELD_BLOCK_SIZE
    }

    /// Zero-based column of the tile.
    #[must_use]
    pub const fn column(self) -> u32 {
        self.0 as u32 % FIELD_BLOCK_SIZE
    }
}

/// Reasons a tile sequence cannot form a [`TileGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The sequence does not contain exactly [`TILE_COUNT`] items.
    #[error("expected {expected} tiles, found {found}")]
    WrongLength {
        /// Required number of tiles.
        expected: usize,
        /// Number of tiles supplied.
        found: usize,
    },
    /// More than one tile holds the eagle.
    #[error("a stage holds at most one eagle, found {count}")]
    MultipleEagles {
        /// Number of eagle tiles supplied.
        count: usize,
    },
}

/// Fixed-size, row-major field of [`MapItem`] values holding at most one eagle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    items: Vec<MapItem>,
}

impl TileGrid {
    /// Creates a field where every tile is empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: vec![MapItem::Empty; TILE_COUNT],
        }
    }

    /// Builds a field from a complete row-major item sequence.
    pub fn from_items(items: Vec<MapItem>) -> Result<Self, GridError> {
        if items.len() != TILE_COUNT {
            return Err(GridError::WrongLength {
                expected: TILE_COUNT,
                found: items.len(),
            });
        }

        let count = items.iter().filter(|item| item.is_eagle()).count();
        if count > 1 {
            return Err(GridError::MultipleEagles { count });
        }

        Ok(Self { items })
    }

    /// Item stored at the provided tile.
    #[must_use]
    pub fn get(&self, tile: TileIndex) -> MapItem {
        self.items[tile.get()]
    }

    /// Row-major slice of every tile.
    #[must_use]
    pub fn items(&self) -> &[MapItem] {
        &self.items
    }

    /// Iterator over the rows of the field, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[MapItem]> {
        self.items.chunks(FIELD_BLOCK_SIZE as usize)
    }

    /// Tile currently holding the eagle, if any.
    #[must_use]
    pub fn eagle(&self) -> Option<TileIndex> {
        self.items
            .iter()
            .position(|item| item.is_eagle())
            .and_then(TileIndex::new)
    }

    /// Writes `item` into `tile`.
    ///
    /// Returns `false` without touching the field when the tile already holds a
    /// structurally equal item. Painting an eagle first resets every other
    /// eagle tile to [`MapItem::Empty`], pushing each reset tile into
    /// `displaced`.
    pub fn paint(
        &mut self,
        tile: TileIndex,
        item: MapItem,
        displaced: &mut Vec<TileIndex>,
    ) -> bool {
        if self.items[tile.get()] == item {
            return false;
        }

        if item.is_eagle() {
            for (index, slot) in self.items.iter_mut().enumerate() {
                if slot.is_eagle() {
                    *slot = MapItem::Empty;
                    if let Some(previous) = TileIndex::new(index) {
                        displaced.push(previous);
                    }
                }
            }
        }

        self.items[tile.get()] = item;
        true
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::empty()
    }
}

/// Enemy tank levels ordered from weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TankLevel {
    /// Slow, weak tank.
    Basic,
    /// Fast tank.
    Fast,
    /// Tank with fast bullets.
    Power,
    /// Heavily armoured tank.
    Armor,
}

impl TankLevel {
    /// All levels in ascending order.
    pub const ALL: [TankLevel; 4] = [
        TankLevel::Basic,
        TankLevel::Fast,
        TankLevel::Power,
        TankLevel::Armor,
    ];

    /// Name used by the persisted stage format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Fast => "fast",
            Self::Power => "power",
            Self::Armor => "armor",
        }
    }

    /// Parses a persisted level name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.name() == name)
    }

    /// Level one step along the order, or the same level at either end.
    #[must_use]
    pub fn stepped(self, step: Step) -> Self {
        let position = self as usize;
        let next = match step {
            Step::Increase => position.saturating_add(1).min(Self::ALL.len() - 1),
            Step::Decrease => position.saturating_sub(1),
        };
        Self::ALL[next]
    }
}

/// One wave entry of the enemy roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnemySlot {
    /// Level of every tank in the slot.
    pub level: TankLevel,
    /// Number of tanks, always within `0..=MAX_ENEMY_COUNT`.
    pub count: u32,
}

impl EnemySlot {
    /// Creates a slot, clamping the count to [`MAX_ENEMY_COUNT`].
    #[must_use]
    pub fn new(level: TankLevel, count: u32) -> Self {
        Self {
            level,
            count: count.min(MAX_ENEMY_COUNT),
        }
    }

    /// Slot with the level moved one step, clamped to the level order.
    #[must_use]
    pub fn with_level_step(self, step: Step) -> Self {
        Self {
            level: self.level.stepped(step),
            ..self
        }
    }

    /// Slot with the count moved by one, clamped to `0..=MAX_ENEMY_COUNT`.
    #[must_use]
    pub fn with_count_step(self, step: Step) -> Self {
        let count = match step {
            Step::Increase => self.count.saturating_add(1).min(MAX_ENEMY_COUNT),
            Step::Decrease => self.count.saturating_sub(1),
        };
        Self { count, ..self }
    }
}

/// Roster used for a stage that has never been edited.
#[must_use]
pub fn default_enemies() -> Vec<EnemySlot> {
    vec![
        EnemySlot::new(TankLevel::Basic, 10),
        EnemySlot::new(TankLevel::Fast, 4),
        EnemySlot::new(TankLevel::Power, 4),
        EnemySlot::new(TankLevel::Armor, 2),
    ]
}

/// Sum of the tank counts across a roster.
#[must_use]
pub fn total_enemy_count(enemies: &[EnemySlot]) -> u32 {
    enemies.iter().map(|slot| slot.count).sum()
}

/// Stage difficulty in the range `1..=4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StageDifficulty(u8);

impl StageDifficulty {
    /// Easiest difficulty.
    pub const MIN: StageDifficulty = StageDifficulty(1);

    /// Hardest difficulty.
    pub const MAX: StageDifficulty = StageDifficulty(4);

    /// Creates a difficulty, returning `None` outside `1..=4`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Numeric difficulty.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Difficulty moved one step, clamped to `1..=4`.
    #[must_use]
    pub fn stepped(self, step: Step) -> Self {
        match step {
            Step::Increase => Self(self.0.saturating_add(1).min(Self::MAX.0)),
            Step::Decrease => Self(self.0.saturating_sub(1).max(Self::MIN.0)),
        }
    }
}

impl Default for StageDifficulty {
    fn default() -> Self {
        Self::MIN
    }
}

/// Error returned when a raw difficulty lies outside `1..=4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("difficulty must lie within 1..=4 (received {0})")]
pub struct DifficultyOutOfRange(pub u8);

impl TryFrom<u8> for StageDifficulty {
    type Error = DifficultyOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(DifficultyOutOfRange(value))
    }
}

impl From<StageDifficulty> for u8 {
    fn from(value: StageDifficulty) -> Self {
        value.get()
    }
}

/// Editable portion of a stage as held by the editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorContent {
    /// Stage name.
    pub name: String,
    /// Stage difficulty.
    pub difficulty: StageDifficulty,
    /// Fixed-length enemy roster.
    pub enemies: Vec<EnemySlot>,
    /// Tile field.
    pub grid: TileGrid,
}

impl EditorContent {
    /// Content of a brand-new stage: no name, default roster, empty field.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            difficulty: StageDifficulty::MIN,
            enemies: default_enemies(),
            grid: TileGrid::empty(),
        }
    }
}

/// Persisted stage schema exchanged with the stage catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConfig {
    /// Stage name, unique within built-in and within custom stages.
    pub name: String,
    /// Stage difficulty.
    pub difficulty: StageDifficulty,
    /// Whether the stage was authored in the editor.
    pub custom: bool,
    /// Enemy roster, one `"<count>*<level>"` entry per slot.
    pub enemies: Vec<String>,
    /// Field rows, top to bottom, each a space-separated list of tile tokens.
    pub tile_grid: Vec<String>,
}

/// Views exposed by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorView {
    /// Field painting view.
    Map,
    /// Name, difficulty and roster view.
    Config,
}

impl EditorView {
    /// Route segment naming the view.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::Config => "config",
        }
    }

    /// Parses a route segment, returning `None` for anything but `map` or `config`.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "map" => Some(Self::Map),
            "config" => Some(Self::Config),
            _ => None,
        }
    }
}

/// Navigation requests the editor hands to its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Show one of the editor views, replacing the current location.
    Editor(EditorView),
    /// Show the list of custom stages, replacing the current location.
    CustomStageList,
    /// Return to wherever the editor was opened from.
    Back,
}

/// Blocking dialog shown to the author.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Modal {
    /// Message that can only be acknowledged.
    Alert {
        /// Text shown to the author.
        message: String,
    },
    /// Question answered with accept or decline.
    Confirm {
        /// Text shown to the author.
        message: String,
    },
}

impl Modal {
    /// Text shown to the author.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Alert { message } | Self::Confirm { message } => message,
        }
    }
}

/// Author response that resolves a pending [`Modal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Answer {
    /// An alert was acknowledged.
    Acknowledged,
    /// A confirm was accepted.
    Accepted,
    /// A confirm was declined.
    Declined,
}

/// Read-only access to the stages that already exist.
pub trait StageLookup {
    /// Reports whether a stage with exactly this name exists among the
    /// custom (`custom == true`) or built-in (`custom == false`) stages.
    fn has_stage(&self, name: &str, custom: bool) -> bool;
}

impl StageLookup for [StageConfig] {
    fn has_stage(&self, name: &str, custom: bool) -> bool {
        self.iter()
            .any(|stage| stage.custom == custom && stage.name == name)
    }
}

impl StageLookup for Vec<StageConfig> {
    fn has_stage(&self, name: &str, custom: bool) -> bool {
        self.as_slice().has_stage(name, custom)
    }
}

/// Outgoing requests issued by an editing session.
pub trait EditorSink {
    /// Stores a finished custom stage.
    fn persist_stage(&mut self, stage: StageConfig);

    /// Parks an unfinished edit so it can be resumed later.
    fn stash_draft(&mut self, stage: StageConfig);

    /// Moves the host to another location.
    fn navigate(&mut self, route: Route);
}

#[cfg(test)]
mod tests {
    use super::{
        EnemySlot, GridError, MapItem, Quadrant, StageConfig, StageDifficulty, StageLookup, Step,
        TankLevel, TileGrid, TileIndex, WallMask, FIELD_BLOCK_SIZE, MAX_ENEMY_COUNT, TILE_COUNT,
    };

    #[test]
    fn tile_index_maps_rows_and_columns() {
        let tile = TileIndex::from_position(2, 5).expect("inside field");
        assert_eq!(tile.get(), 2 * FIELD_BLOCK_SIZE as usize + 5);
        assert_eq!(tile.row(), 2);
        assert_eq!(tile.column(), 5);
        assert!(TileIndex::from_position(FIELD_BLOCK_SIZE, 0).is_none());
        assert!(TileIndex::from_position(0, FIELD_BLOCK_SIZE).is_none());
        assert!(TileIndex::new(TILE_COUNT).is_none());
    }

    #[test]
    fn toggling_a_quadrant_twice_restores_the_mask() {
        let original = WallMask::from_bits(0b0110);
        for quadrant in Quadrant::ALL {
            let once = original.toggled(quadrant);
            assert_ne!(once, original);
            assert_eq!(once.toggled(quadrant), original);
        }
    }

    #[test]
    fn quadrant_bits_follow_position() {
        let mask = WallMask::EMPTY
            .toggled(Quadrant::TopRight)
            .toggled(Quadrant::BottomLeft);
        assert_eq!(mask.bits(), 0b0110);
        assert!(mask.contains(Quadrant::TopRight));
        assert!(!mask.contains(Quadrant::TopLeft));
    }

    #[test]
    fn map_item_equality_includes_mask() {
        assert_eq!(MapItem::Brick(WallMask::FULL), MapItem::Brick(WallMask::FULL));
        assert_ne!(
            MapItem::Brick(WallMask::FULL),
            MapItem::Brick(WallMask::from_bits(0b0011))
        );
        assert_ne!(MapItem::Brick(WallMask::FULL), MapItem::Steel(WallMask::FULL));
    }

    #[test]
    fn painting_eagle_keeps_a_single_eagle() {
        let mut grid = TileGrid::empty();
        let first = TileIndex::new(10).expect("inside field");
        let second = TileIndex::new(99).expect("inside field");
        let mut displaced = Vec::new();

        assert!(grid.paint(first, MapItem::Eagle, &mut displaced));
        assert!(displaced.is_empty());
        assert!(grid.paint(second, MapItem::Eagle, &mut displaced));

        assert_eq!(displaced, vec![first]);
        assert_eq!(grid.eagle(), Some(second));
        assert_eq!(grid.get(first), MapItem::Empty);
        assert_eq!(
            grid.items().iter().filter(|item| item.is_eagle()).count(),
            1
        );
    }

    #[test]
    fn painting_an_equal_item_is_a_no_op() {
        let mut grid = TileGrid::empty();
        let tile = TileIndex::new(3).expect("inside field");
        let mut displaced = Vec::new();
        let item = MapItem::Steel(WallMask::from_bits(0b1001));

        assert!(grid.paint(tile, item, &mut displaced));
        let snapshot = grid.clone();
        assert!(!grid.paint(tile, item, &mut displaced));
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn grid_rejects_wrong_length_and_extra_eagles() {
        assert_eq!(
            TileGrid::from_items(vec![MapItem::Empty; 4]),
            Err(GridError::WrongLength {
                expected: TILE_COUNT,
                found: 4,
            })
        );

        let mut items = vec![MapItem::Empty; TILE_COUNT];
        items[0] = MapItem::Eagle;
        items[1] = MapItem::Eagle;
        assert_eq!(
            TileGrid::from_items(items),
            Err(GridError::MultipleEagles { count: 2 })
        );
    }

    #[test]
    fn enemy_steppers_clamp_at_bounds() {
        let slot = EnemySlot::new(TankLevel::Basic, 0);
        assert_eq!(slot.with_count_step(Step::Decrease).count, 0);
        assert_eq!(slot.with_level_step(Step::Decrease).level, TankLevel::Basic);

        let slot = EnemySlot::new(TankLevel::Armor, MAX_ENEMY_COUNT);
        assert_eq!(slot.with_count_step(Step::Increase).count, MAX_ENEMY_COUNT);
        assert_eq!(slot.with_level_step(Step::Increase).level, TankLevel::Armor);

        let slot = EnemySlot::new(TankLevel::Fast, 500);
        assert_eq!(slot.count, MAX_ENEMY_COUNT);
        assert_eq!(slot.with_level_step(Step::Increase).level, TankLevel::Power);
    }

    #[test]
    fn difficulty_stepper_stays_in_range() {
        assert_eq!(StageDifficulty::MIN.stepped(Step::Decrease), StageDifficulty::MIN);
        assert_eq!(StageDifficulty::MAX.stepped(Step::Increase), StageDifficulty::MAX);
        assert_eq!(
            StageDifficulty::MIN.stepped(Step::Increase).get(),
            2,
            "stepping up from the minimum should reach 2"
        );
        assert!(StageDifficulty::new(0).is_none());
        assert!(StageDifficulty::new(5).is_none());
    }

    #[test]
    fn stage_config_uses_camel_case_schema() {
        let stage = StageConfig {
            name: "Desert".to_owned(),
            difficulty: StageDifficulty::MAX,
            custom: true,
            enemies: vec!["20*basic".to_owned()],
            tile_grid: vec!["X E".to_owned()],
        };

        let json = serde_json::to_value(&stage).expect("serialize");
        assert_eq!(json["tileGrid"][0], "X E");
        assert_eq!(json["difficulty"], 4);

        let restored: StageConfig = serde_json::from_value(json).expect("deserialize");
        assert_eq!(restored, stage);
    }

    #[test]
    fn stage_config_rejects_out_of_range_difficulty() {
        let json = r#"{"name":"a","difficulty":9,"custom":false,"enemies":[],"tileGrid":[]}"#;
        assert!(serde_json::from_str::<StageConfig>(json).is_err());
    }

    #[test]
    fn lookup_distinguishes_custom_and_built_in_stages() {
        let stages = vec![StageConfig {
            name: "Desert".to_owned(),
            difficulty: StageDifficulty::MIN,
            custom: false,
            enemies: Vec::new(),
            tile_grid: Vec::new(),
        }];

        assert!(stages.has_stage("Desert", false));
        assert!(!stages.has_stage("Desert", true));
        assert!(!stages.has_stage("desert", false));
    }
}
