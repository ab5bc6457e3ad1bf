use tank_editor_core::{Command, EditorView, TileIndex};
use tank_editor_system_painter::{PaintContext, PaintState, Painter, PointerAction, PointerInput};

fn tile(value: usize) -> TileIndex {
    TileIndex::new(value).expect("tile inside field")
}

fn map_context(cursor: Option<TileIndex>) -> PaintContext {
    PaintContext {
        view: EditorView::Map,
        modal_active: false,
        cursor,
    }
}

#[test]
fn press_on_field_starts_painting_without_writing() {
    let mut painter = Painter::new();
    let mut commands = Vec::new();

    painter.handle(
        PointerInput::new(PointerAction::Press, Some(tile(3))),
        map_context(Some(tile(3))),
        &mut commands,
    );

    assert_eq!(painter.state(), PaintState::Painting);
    assert!(commands.is_empty(), "press alone must not paint");
}

#[test]
fn press_outside_field_stays_idle() {
    let mut painter = Painter::new();
    let mut commands = Vec::new();

    painter.handle(
        PointerInput::new(PointerAction::Press, None),
        map_context(None),
        &mut commands,
    );

    assert_eq!(painter.state(), PaintState::Idle);
}

#[test]
fn press_is_ignored_while_modal_active() {
    let mut painter = Painter::new();
    let mut commands = Vec::new();

    painter.handle(
        PointerInput::new(PointerAction::Press, Some(tile(3))),
        PaintContext {
            modal_active: true,
            ..map_context(None)
        },
        &mut commands,
    );

    assert_eq!(painter.state(), PaintState::Idle);
}

#[test]
fn drag_moves_cursor_and_paints_each_tile() {
    let mut painter = Painter::new();
    let mut commands = Vec::new();

    painter.handle(
        PointerInput::new(PointerAction::Press, Some(tile(3))),
        map_context(Some(tile(3))),
        &mut commands,
    );
    painter.handle(
        PointerInput::new(PointerAction::Move, Some(tile(4))),
        map_context(Some(tile(3))),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::MoveCursor {
                tile: Some(tile(4)),
            },
            Command::PaintTile {
                tile: Some(tile(4)),
            },
        ]
    );
}

#[test]
fn hover_tracks_cursor_without_painting() {
    let mut painter = Painter::new();
    let mut commands = Vec::new();

    painter.handle(
        PointerInput::new(PointerAction::Move, Some(tile(8))),
        map_context(None),
        &mut commands,
    );
    painter.handle(
        PointerInput::new(PointerAction::Move, Some(tile(8))),
        map_context(Some(tile(8))),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::MoveCursor {
            tile: Some(tile(8)),
        }],
        "cursor updates only when the tile changes",
    );
}

#[test]
fn modal_gates_drag_writes_but_not_cursor() {
    let mut painter = Painter::new();
    let mut commands = Vec::new();

    painter.handle(
        PointerInput::new(PointerAction::Press, Some(tile(3))),
        map_context(Some(tile(3))),
        &mut commands,
    );
    painter.handle(
        PointerInput::new(PointerAction::Move, Some(tile(5))),
        PaintContext {
            modal_active: true,
            ..map_context(Some(tile(3)))
        },
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::MoveCursor {
            tile: Some(tile(5)),
        }]
    );
}

#[test]
fn release_writes_once_and_returns_to_idle() {
    let mut painter = Painter::new();
    let mut commands = Vec::new();

    painter.handle(
        PointerInput::new(PointerAction::Press, Some(tile(3))),
        map_context(Some(tile(3))),
        &mut commands,
    );
    painter.handle(
        PointerInput::new(PointerAction::Release, Some(tile(3))),
        map_context(Some(tile(3))),
        &mut commands,
    );

    assert_eq!(painter.state(), PaintState::Idle);
    assert_eq!(
        commands,
        vec![Command::PaintTile {
            tile: Some(tile(3)),
        }]
    );
}

#[test]
fn release_in_config_view_does_not_write() {
    let mut painter = Painter::new();
    let mut commands = Vec::new();

    painter.handle(
        PointerInput::new(PointerAction::Release, Some(tile(3))),
        PaintContext {
            view: EditorView::Config,
            ..map_context(Some(tile(3)))
        },
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn leave_clears_cursor_without_writing() {
    let mut painter = Painter::new();
    let mut commands = Vec::new();

    painter.handle(
        PointerInput::new(PointerAction::Press, Some(tile(3))),
        map_context(Some(tile(3))),
        &mut commands,
    );
    painter.handle(
        PointerInput::new(PointerAction::Leave, None),
        map_context(Some(tile(3))),
        &mut commands,
    );

    assert_eq!(painter.state(), PaintState::Idle);
    assert_eq!(commands, vec![Command::MoveCursor { tile: None }]);

    painter.handle(
        PointerInput::new(PointerAction::Move, Some(tile(4))),
        map_context(None),
        &mut commands,
    );
    assert!(
        !commands.contains(&Command::PaintTile {
            tile: Some(tile(4)),
        }),
        "moves after leaving must not paint"
    );
}
