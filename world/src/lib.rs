#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative editor state for a single stage editing session.

use tank_editor_core::{
    Command, EditorContent, EnemySlot, Event, ItemKind, MapItem, TileIndex, WallMask,
    MAX_NAME_LENGTH,
};

/// Represents the document being edited together with the brush configuration.
#[derive(Clone, Debug)]
pub struct World {
    content: EditorContent,
    selected: ItemKind,
    brick_mask: WallMask,
    steel_mask: WallMask,
    cursor: Option<TileIndex>,
}

impl World {
    /// Creates a world holding a blank stage with the empty brush selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: EditorContent::blank(),
            selected: ItemKind::Empty,
            brick_mask: WallMask::FULL,
            steel_mask: WallMask::FULL,
            cursor: None,
        }
    }

    fn brush_item(&self) -> MapItem {
        match self.selected {
            ItemKind::Empty => MapItem::Empty,
            ItemKind::Brick => MapItem::Brick(self.brick_mask),
            ItemKind::Steel => MapItem::Steel(self.steel_mask),
            ItemKind::River => MapItem::River,
            ItemKind::Snow => MapItem::Snow,
            ItemKind::Forest => MapItem::Forest,
            ItemKind::Eagle => MapItem::Eagle,
        }
    }

    fn live_mask_mut(&mut self) -> Option<&mut WallMask> {
        match self.selected {
            ItemKind::Brick => Some(&mut self.brick_mask),
            ItemKind::Steel => Some(&mut self.steel_mask),
            _ => None,
        }
    }

    fn update_mask<F>(&mut self, update: F, out_events: &mut Vec<Event>)
    where
        F: FnOnce(WallMask) -> WallMask,
    {
        let kind = self.selected;
        let Some(mask) = self.live_mask_mut() else {
            log::debug!("mask edit ignored while {kind:?} is selected");
            return;
        };

        let next = update(*mask);
        if next != *mask {
            *mask = next;
            out_events.push(Event::MaskChanged { kind, mask: next });
        }
    }

    fn update_slot<F>(&mut self, slot: usize, update: F, out_events: &mut Vec<Event>)
    where
        F: FnOnce(EnemySlot) -> EnemySlot,
    {
        let slots = self.content.enemies.len();
        let Some(enemy) = self.content.enemies.get_mut(slot) else {
            log::debug!("roster slot {slot} does not exist (roster holds {slots} slots)");
            return;
        };

        let next = update(*enemy);
        if next != *enemy {
            *enemy = next;
            out_events.push(Event::EnemySlotChanged { slot, enemy: next });
        }
    }

    fn paint(&mut self, tile: Option<TileIndex>, out_events: &mut Vec<Event>) {
        let Some(tile) = tile else {
            return;
        };

        let item = self.brush_item();
        let mut displaced = Vec::new();
        if !self.content.grid.paint(tile, item, &mut displaced) {
            return;
        }

        for previous in displaced {
            out_events.push(Event::EagleDisplaced { tile: previous });
        }
        out_events.push(Event::TilePainted { tile, item });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, broadcasting an event for every change.
///
/// Commands that leave the world untouched (clamped steppers, repeated paints,
/// mask edits without a wall brush) emit nothing.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadContent { content } => {
            world.content = content;
            if world.cursor.take().is_some() {
                out_events.push(Event::CursorMoved { tile: None });
            }
            out_events.push(Event::ContentLoaded);
        }
        Command::SetName { name } => {
            let name: String = name.chars().take(MAX_NAME_LENGTH).collect();
            if name != world.content.name {
                world.content.name = name.clone();
                out_events.push(Event::NameChanged { name });
            }
        }
        Command::StepDifficulty { step } => {
            let difficulty = world.content.difficulty.stepped(step);
            if difficulty != world.content.difficulty {
                world.content.difficulty = difficulty;
                out_events.push(Event::DifficultyChanged { difficulty });
            }
        }
        Command::StepEnemyLevel { slot, step } => {
            world.update_slot(slot, |enemy| enemy.with_level_step(step), out_events);
        }
        Command::StepEnemyCount { slot, step } => {
            world.update_slot(slot, |enemy| enemy.with_count_step(step), out_events);
        }
        Command::SelectItemKind { kind } => {
            if kind != world.selected {
                world.selected = kind;
                out_events.push(Event::ItemKindSelected { kind });
            }
        }
        Command::ToggleMaskQuadrant { quadrant } => {
            world.update_mask(|mask| mask.toggled(quadrant), out_events);
        }
        Command::FillMask => {
            world.update_mask(|_| WallMask::FULL, out_events);
        }
        Command::MoveCursor { tile } => {
            if tile != world.cursor {
                world.cursor = tile;
                out_events.push(Event::CursorMoved { tile });
            }
        }
        Command::PaintTile { tile } => world.paint(tile, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use tank_editor_core::{
        total_enemy_count as roster_total, EditorContent, EnemySlot, ItemKind, MapItem,
        StageDifficulty, TileGrid, TileIndex, WallMask,
    };

    /// Complete editable content, as handed to the stage converter.
    #[must_use]
    pub fn content(world: &World) -> &EditorContent {
        &world.content
    }

    /// Current stage name.
    #[must_use]
    pub fn name(world: &World) -> &str {
        &world.content.name
    }

    /// Current stage difficulty.
    #[must_use]
    pub fn difficulty(world: &World) -> StageDifficulty {
        world.content.difficulty
    }

    /// Enemy roster in slot order.
    #[must_use]
    pub fn enemies(world: &World) -> &[EnemySlot] {
        &world.content.enemies
    }

    /// Sum of every roster slot, recomputed on each call.
    #[must_use]
    pub fn total_enemy_count(world: &World) -> u32 {
        roster_total(&world.content.enemies)
    }

    /// Tile field.
    #[must_use]
    pub fn grid(world: &World) -> &TileGrid {
        &world.content.grid
    }

    /// Reports whether any tile holds the eagle.
    #[must_use]
    pub fn has_eagle(world: &World) -> bool {
        world.content.grid.eagle().is_some()
    }

    /// Kind used by subsequent paints.
    #[must_use]
    pub fn selected_kind(world: &World) -> ItemKind {
        world.selected
    }

    /// Live mask of a wall kind, or `None` for kinds without a mask.
    #[must_use]
    pub fn mask(world: &World, kind: ItemKind) -> Option<WallMask> {
        match kind {
            ItemKind::Brick => Some(world.brick_mask),
            ItemKind::Steel => Some(world.steel_mask),
            _ => None,
        }
    }

    /// Item the next paint will write, bundling the live mask for wall kinds.
    #[must_use]
    pub fn brush_item(world: &World) -> MapItem {
        world.brush_item()
    }

    /// Highlighted tile, if the pointer is over the field.
    #[must_use]
    pub fn cursor(world: &World) -> Option<TileIndex> {
        world.cursor
    }
}
