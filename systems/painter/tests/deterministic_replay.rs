use tank_editor_core::{Command, EditorView, Event, ItemKind, MapItem, TileIndex};
use tank_editor_system_painter::{PaintContext, Painter, PointerAction, PointerInput};
use tank_editor_world::{self as world, query, World};

#[test]
fn replay_produces_expected_event_log() {
    let first = replay(scripted_inputs());
    let second = replay(scripted_inputs());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(
        first,
        vec![
            Event::ItemKindSelected {
                kind: ItemKind::Eagle,
            },
            Event::TilePainted {
                tile: tile(4),
                item: MapItem::Eagle,
            },
            Event::CursorMoved { tile: Some(tile(5)) },
            Event::EagleDisplaced { tile: tile(4) },
            Event::TilePainted {
                tile: tile(5),
                item: MapItem::Eagle,
            },
            Event::CursorMoved { tile: None },
            Event::CursorMoved { tile: Some(tile(5)) },
            Event::CursorMoved { tile: None },
        ],
        "repainting an unchanged tile must stay silent"
    );
}

#[test]
fn replay_leaves_a_single_eagle() {
    let mut world = World::new();
    let _ = run(&mut world, scripted_inputs());

    assert_eq!(query::grid(&world).eagle(), Some(tile(5)));
    assert_eq!(
        query::grid(&world)
            .items()
            .iter()
            .filter(|item| item.is_eagle())
            .count(),
        1
    );
}

fn tile(value: usize) -> TileIndex {
    TileIndex::new(value).expect("tile inside field")
}

enum Input {
    Select(ItemKind),
    Pointer(PointerAction, Option<TileIndex>),
}

fn scripted_inputs() -> Vec<Input> {
    vec![
        Input::Select(ItemKind::Eagle),
        Input::Pointer(PointerAction::Release, Some(tile(4))),
        Input::Pointer(PointerAction::Press, Some(tile(4))),
        Input::Pointer(PointerAction::Move, Some(tile(5))),
        Input::Pointer(PointerAction::Move, None),
        Input::Pointer(PointerAction::Move, Some(tile(5))),
        Input::Pointer(PointerAction::Release, Some(tile(5))),
        Input::Pointer(PointerAction::Leave, None),
    ]
}

fn replay(inputs: Vec<Input>) -> Vec<Event> {
    let mut world = World::new();
    run(&mut world, inputs)
}

fn run(world: &mut World, inputs: Vec<Input>) -> Vec<Event> {
    let mut painter = Painter::new();
    let mut log = Vec::new();

    for input in inputs {
        let mut commands = Vec::new();
        match input {
            Input::Select(kind) => commands.push(Command::SelectItemKind { kind }),
            Input::Pointer(action, tile) => painter.handle(
                PointerInput::new(action, tile),
                PaintContext {
                    view: EditorView::Map,
                    modal_active: false,
                    cursor: query::cursor(world),
                },
                &mut commands,
            ),
        }

        for command in commands {
            world::apply(world, command, &mut log);
        }
    }

    log
}
