#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure paint system translating pointer input into cursor and paint commands.

pub mod resolver;

use tank_editor_core::{Command, EditorView, TileIndex};

/// Whether the pointer is currently dragging paint across the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaintState {
    /// No button is held over the field.
    #[default]
    Idle,
    /// A press landed on the field and every move writes the brush item.
    Painting,
}

/// Pointer interaction reported by the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Primary button went down.
    Press,
    /// Pointer moved.
    Move,
    /// Primary button went up.
    Release,
    /// Pointer left the rendering surface.
    Leave,
}

/// Single pointer event after tile resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerInput {
    /// Kind of interaction.
    pub action: PointerAction,
    /// Tile under the pointer, or `None` when it lies outside the field.
    pub tile: Option<TileIndex>,
}

impl PointerInput {
    /// Creates a new pointer input descriptor.
    #[must_use]
    pub const fn new(action: PointerAction, tile: Option<TileIndex>) -> Self {
        Self { action, tile }
    }
}

/// Editor facts the paint system needs to decide whether input may write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintContext {
    /// View currently shown by the editor. Only the map view accepts paint.
    pub view: EditorView,
    /// Whether a dialog is waiting for the author.
    pub modal_active: bool,
    /// Tile currently highlighted by the world.
    pub cursor: Option<TileIndex>,
}

/// Press/drag/release state machine for painting tiles.
#[derive(Clone, Debug, Default)]
pub struct Painter {
    state: PaintState,
}

impl Painter {
    /// Creates an idle painter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: PaintState::Idle,
        }
    }

    /// Current drag state.
    #[must_use]
    pub const fn state(&self) -> PaintState {
        self.state
    }

    /// Consumes one pointer event and emits the resulting world commands.
    ///
    /// Cursor tracking happens in every view and while dialogs are open; writes
    /// only happen in the map view with no dialog pending.
    pub fn handle(&mut self, input: PointerInput, context: PaintContext, out: &mut Vec<Command>) {
        let may_write = context.view == EditorView::Map && !context.modal_active;

        match input.action {
            PointerAction::Press => {
                if may_write && input.tile.is_some() {
                    self.state = PaintState::Painting;
                }
            }
            PointerAction::Move => {
                if input.tile != context.cursor {
                    out.push(Command::MoveCursor { tile: input.tile });
                }
                if may_write && self.state == PaintState::Painting {
                    out.push(Command::PaintTile { tile: input.tile });
                }
            }
            PointerAction::Release => {
                self.state = PaintState::Idle;
                if may_write {
                    out.push(Command::PaintTile { tile: input.tile });
                }
            }
            PointerAction::Leave => {
                self.state = PaintState::Idle;
                if context.cursor.is_some() {
                    out.push(Command::MoveCursor { tile: None });
                }
            }
        }
    }
}
