#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Translation between editor content and the persisted stage schema.
//!
//! Field rows are stored as space-separated tile tokens:
//!
//! | Token      | Item                 |
//! |------------|----------------------|
//! | `X`        | empty                |
//! | `B<hex>`   | brick with mask      |
//! | `T<hex>`   | steel with mask      |
//! | `R`        | river                |
//! | `S`        | snow                 |
//! | `F`        | forest               |
//! | `E`        | eagle                |
//!
//! Roster entries read `"<count>*<level>"`, e.g. `"10*basic"`.
//!
//! Tokens are separated by single spaces and mask digits are lower-case.
//! Decoding only accepts text in exactly the form encoding produces, so every
//! stage that loads is saved back unchanged.

use tank_editor_core::{
    EditorContent, EnemySlot, GridError, MapItem, StageConfig, TankLevel, TileGrid, WallMask,
    FIELD_BLOCK_SIZE, MAX_ENEMY_COUNT,
};
use thiserror::Error;

/// Reasons a persisted stage cannot be loaded into the editor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StageFormatError {
    /// The field does not have the expected number of rows.
    #[error("expected {expected} field rows, found {found}")]
    WrongRowCount {
        /// Rows a field must have.
        expected: usize,
        /// Rows present in the stage.
        found: usize,
    },
    /// A field row does not have the expected number of tiles.
    #[error("field row {row} has {found} tiles, expected {expected}")]
    WrongRowLength {
        /// Zero-based row.
        row: usize,
        /// Tiles a row must have.
        expected: usize,
        /// Tiles present in the row.
        found: usize,
    },
    /// A tile token names no known item.
    #[error("unknown tile token {token:?} in field row {row}")]
    UnknownTile {
        /// Zero-based row.
        row: usize,
        /// Offending token.
        token: String,
    },
    /// A wall token carries something other than a single hex digit.
    #[error("invalid wall mask in tile token {token:?} in field row {row}")]
    InvalidMask {
        /// Zero-based row.
        row: usize,
        /// Offending token.
        token: String,
    },
    /// A roster entry is not of the form `<count>*<level>`.
    #[error("roster entry {entry:?} is not of the form <count>*<level>")]
    InvalidEnemy {
        /// Offending entry.
        entry: String,
    },
    /// A roster entry names an unknown tank level.
    #[error("roster entry {entry:?} names an unknown tank level")]
    UnknownLevel {
        /// Offending entry.
        entry: String,
    },
    /// A roster entry asks for more tanks than a slot may hold.
    #[error("roster entry {entry:?} exceeds {MAX_ENEMY_COUNT} tanks")]
    EnemyCountOutOfRange {
        /// Offending entry.
        entry: String,
    },
    /// Text that decodes but is not in the form encoding would write back.
    #[error("{found:?} is not in canonical form, expected {expected:?}")]
    NonCanonical {
        /// Text as stored.
        found: String,
        /// Canonical spelling of the same value.
        expected: String,
    },
    /// The decoded tiles do not form a valid field.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Bundles `content` and the caller's `custom` flag into the persisted schema.
#[must_use]
pub fn to_stage_config(content: &EditorContent, custom: bool) -> StageConfig {
    StageConfig {
        name: content.name.clone(),
        difficulty: content.difficulty,
        custom,
        enemies: content.enemies.iter().map(|slot| encode_enemy(*slot)).collect(),
        tile_grid: content.grid.rows().map(encode_row).collect(),
    }
}

/// Expands a persisted stage into editor content, discarding its `custom` flag.
pub fn to_editor_content(stage: &StageConfig) -> Result<EditorContent, StageFormatError> {
    let enemies = stage
        .enemies
        .iter()
        .map(|entry| decode_enemy(entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EditorContent {
        name: stage.name.clone(),
        difficulty: stage.difficulty,
        enemies,
        grid: decode_grid(&stage.tile_grid)?,
    })
}

/// Token of a single tile.
#[must_use]
pub fn encode_tile(item: MapItem) -> String {
    match item {
        MapItem::Empty => "X".to_owned(),
        MapItem::Brick(mask) => format!("B{:x}", mask.bits()),
        MapItem::Steel(mask) => format!("T{:x}", mask.bits()),
        MapItem::River => "R".to_owned(),
        MapItem::Snow => "S".to_owned(),
        MapItem::Forest => "F".to_owned(),
        MapItem::Eagle => "E".to_owned(),
    }
}

/// Item denoted by a tile token of field row `row`.
pub fn decode_tile(token: &str, row: usize) -> Result<MapItem, StageFormatError> {
    let mut chars = token.chars();
    let item = match chars.next() {
        Some('X') => MapItem::Empty,
        Some('R') => MapItem::River,
        Some('S') => MapItem::Snow,
        Some('F') => MapItem::Forest,
        Some('E') => MapItem::Eagle,
        Some('B') => return decode_mask(chars.as_str(), token, row).map(MapItem::Brick),
        Some('T') => return decode_mask(chars.as_str(), token, row).map(MapItem::Steel),
        _ => {
            return Err(StageFormatError::UnknownTile {
                row,
                token: token.to_owned(),
            })
        }
    };

    if chars.as_str().is_empty() {
        Ok(item)
    } else {
        Err(StageFormatError::UnknownTile {
            row,
            token: token.to_owned(),
        })
    }
}

fn decode_mask(digits: &str, token: &str, row: usize) -> Result<WallMask, StageFormatError> {
    let mut chars = digits.chars();
    let bits = match (chars.next().and_then(|c| c.to_digit(16)), chars.next()) {
        (Some(bits), None) => bits,
        _ => {
            return Err(StageFormatError::InvalidMask {
                row,
                token: token.to_owned(),
            })
        }
    };

    let mask = WallMask::from_bits(bits as u8);
    let canonical = format!("{}{:x}", &token[..1], mask.bits());
    if canonical == token {
        Ok(mask)
    } else {
        Err(StageFormatError::NonCanonical {
            found: token.to_owned(),
            expected: canonical,
        })
    }
}

fn encode_row(items: &[MapItem]) -> String {
    let mut row = String::with_capacity(items.len() * 3);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            row.push(' ');
        }
        row.push_str(&encode_tile(*item));
    }
    row
}

fn decode_grid(rows: &[String]) -> Result<TileGrid, StageFormatError> {
    let edge = FIELD_BLOCK_SIZE as usize;
    if rows.len() != edge {
        return Err(StageFormatError::WrongRowCount {
            expected: edge,
            found: rows.len(),
        });
    }

    let mut items = Vec::with_capacity(edge * edge);
    for (row, line) in rows.iter().enumerate() {
        let before = items.len();
        for token in line.split_whitespace() {
            items.push(decode_tile(token, row)?);
        }

        let found = items.len() - before;
        if found != edge {
            return Err(StageFormatError::WrongRowLength {
                row,
                expected: edge,
                found,
            });
        }

        let canonical = encode_row(&items[before..]);
        if *line != canonical {
            return Err(StageFormatError::NonCanonical {
                found: line.clone(),
                expected: canonical,
            });
        }
    }

    Ok(TileGrid::from_items(items)?)
}

/// Roster entry of a single slot.
#[must_use]
pub fn encode_enemy(slot: EnemySlot) -> String {
    format!("{}*{}", slot.count, slot.level.name())
}

/// Slot denoted by a roster entry.
pub fn decode_enemy(entry: &str) -> Result<EnemySlot, StageFormatError> {
    let invalid = || StageFormatError::InvalidEnemy {
        entry: entry.to_owned(),
    };

    let (count, level) = entry.split_once('*').ok_or_else(invalid)?;
    let count: u32 = count.trim().parse().map_err(|_| invalid())?;
    if count > MAX_ENEMY_COUNT {
        return Err(StageFormatError::EnemyCountOutOfRange {
            entry: entry.to_owned(),
        });
    }
    let level = TankLevel::from_name(level.trim()).ok_or_else(|| StageFormatError::UnknownLevel {
        entry: entry.to_owned(),
    })?;

    let slot = EnemySlot::new(level, count);
    let canonical = encode_enemy(slot);
    if entry != canonical {
        return Err(StageFormatError::NonCanonical {
            found: entry.to_owned(),
            expected: canonical,
        });
    }
    Ok(slot)
}
