#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Editing session that wires pointer input, dialogs and save checks together.
//!
//! The session owns the world exclusively. Every input is handled to
//! completion before the next one arrives; the only suspension is a dialog,
//! which parks the remainder of the interrupted sequence in the modal
//! controller until the author answers.

use glam::Vec2;
use tank_editor_core::{
    Answer, Command, EditorContent, EditorSink, EditorView, Event, Modal, Route, StageConfig,
    StageLookup,
};
use tank_editor_system_converter::{to_editor_content, to_stage_config, StageFormatError};
use tank_editor_system_modal::ModalController;
use tank_editor_system_painter::{
    resolver::{resolve_tile, GridGeometry, SurfaceOffset},
    PaintContext, PaintState, Painter, PointerAction, PointerInput,
};
use tank_editor_system_validation::{begin, PendingCheck, Progress, StageSummary, Verdict};
use tank_editor_world::{self as world, query, World};

/// Alerts shown, in order, by the help tour.
pub const HELP_MESSAGES: [&str; 3] = [
    "1. Choose an item type below.",
    "2. Click or pan in the left.",
    "3. After selecting Brick or Steel you can change the item shape",
];

/// Work waiting on the open dialog.
#[derive(Debug)]
enum Suspended {
    Save(PendingCheck),
    Help { next: usize },
}

/// Single editing session over one stage.
#[derive(Debug)]
pub struct EditorSession<L, S> {
    world: World,
    painter: Painter,
    modal: ModalController<Suspended>,
    view: EditorView,
    geometry: GridGeometry,
    stages: L,
    sink: S,
    events: Vec<Event>,
}

impl<L: StageLookup, S: EditorSink> EditorSession<L, S> {
    /// Opens a session on a persisted stage.
    pub fn open(
        stage: &StageConfig,
        stages: L,
        sink: S,
        geometry: GridGeometry,
    ) -> Result<Self, StageFormatError> {
        let content = to_editor_content(stage)?;
        Ok(Self::with_content(content, stages, sink, geometry))
    }

    /// Opens a session on a brand-new stage.
    pub fn blank(stages: L, sink: S, geometry: GridGeometry) -> Self {
        Self::with_content(EditorContent::blank(), stages, sink, geometry)
    }

    fn with_content(content: EditorContent, stages: L, sink: S, geometry: GridGeometry) -> Self {
        let mut session = Self {
            world: World::new(),
            painter: Painter::new(),
            modal: ModalController::new(),
            view: EditorView::Config,
            geometry,
            stages,
            sink,
            events: Vec::new(),
        };
        world::apply(
            &mut session.world,
            Command::LoadContent { content },
            &mut session.events,
        );
        session
    }

    /// Document and brush state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// View currently shown.
    #[must_use]
    pub fn view(&self) -> EditorView {
        self.view
    }

    /// Dialog waiting for the author, if any.
    #[must_use]
    pub fn modal(&self) -> Option<&Modal> {
        self.modal.current()
    }

    /// Drag state of the paint engine.
    #[must_use]
    pub fn paint_state(&self) -> PaintState {
        self.painter.state()
    }

    /// Collaborator receiving persisted stages and navigation requests.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Ends the session, handing back its collaborators.
    pub fn into_parts(self) -> (L, S) {
        (self.stages, self.sink)
    }

    /// Takes the world events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Shows the view named by a location segment.
    ///
    /// Unknown segments redirect to the configuration view.
    pub fn select_view(&mut self, segment: &str) -> EditorView {
        if let Some(view) = EditorView::from_segment(segment) {
            self.view = view;
        } else {
            log::info!("unknown editor view {segment:?}, redirecting to config");
            self.show_view(EditorView::Config);
        }
        self.view
    }

    /// Switches to `view` and asks the host to follow.
    pub fn show_view(&mut self, view: EditorView) {
        self.view = view;
        self.sink.navigate(Route::Editor(view));
    }

    /// Handles one pointer event at `position` in viewport space.
    ///
    /// `chain` lists the scroll and border offsets from the rendering surface
    /// up to the root, sampled at the time of the event.
    pub fn pointer(&mut self, action: PointerAction, position: Vec2, chain: &[SurfaceOffset]) {
        let tile = resolve_tile(position, chain, self.geometry);
        let context = PaintContext {
            view: self.view,
            modal_active: self.modal.is_active(),
            cursor: query::cursor(&self.world),
        };

        let mut commands = Vec::new();
        self.painter
            .handle(PointerInput::new(action, tile), context, &mut commands);
        for command in commands {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    /// Applies an editing command unless a dialog is open.
    ///
    /// Returns whether the command reached the world.
    pub fn command(&mut self, command: Command) -> bool {
        if let Some(modal) = self.modal.current() {
            log::debug!("ignoring {command:?} while {modal:?} is open");
            return false;
        }

        world::apply(&mut self.world, command, &mut self.events);
        true
    }

    /// Runs the save checks and persists the stage when they pass.
    pub fn save(&mut self) {
        if self.modal.is_active() {
            log::warn!("save ignored while a dialog is open");
            return;
        }

        let summary = StageSummary::of(query::content(&self.world));
        log::debug!("saving {summary:?}");
        let progress = begin(&summary, &self.stages);
        self.advance_save(progress);
    }

    /// Parks the current edit with the caller and returns to it.
    pub fn back(&mut self) {
        if self.modal.is_active() {
            log::warn!("back ignored while a dialog is open");
            return;
        }

        let draft = to_stage_config(query::content(&self.world), false);
        self.sink.stash_draft(draft);
        self.sink.navigate(Route::Back);
    }

    /// Starts the help tour.
    pub fn show_help(&mut self) {
        self.open_dialog(
            Modal::Alert {
                message: HELP_MESSAGES[0].to_owned(),
            },
            Suspended::Help { next: 1 },
        );
    }

    /// Acknowledges the open alert.
    pub fn acknowledge(&mut self) {
        self.answer(Answer::Acknowledged);
    }

    /// Accepts (`true`) or declines (`false`) the open confirm.
    pub fn confirm(&mut self, accepted: bool) {
        self.answer(if accepted {
            Answer::Accepted
        } else {
            Answer::Declined
        });
    }

    /// Resolves the open dialog and resumes whatever waited on it.
    ///
    /// Answers that do not fit the open dialog are logged and ignored.
    pub fn answer(&mut self, answer: Answer) {
        let suspended = match self.modal.resolve(answer) {
            Ok(suspended) => suspended,
            Err(error) => {
                log::warn!("ignoring {answer:?}: {error}");
                return;
            }
        };
        log::debug!("dialog resolved with {answer:?}");

        match suspended {
            Suspended::Save(pending) => self.advance_save(pending.resume(answer)),
            Suspended::Help { next } => {
                if let Some(message) = HELP_MESSAGES.get(next) {
                    self.open_dialog(
                        Modal::Alert {
                            message: (*message).to_owned(),
                        },
                        Suspended::Help { next: next + 1 },
                    );
                }
            }
        }
    }

    fn advance_save(&mut self, progress: Progress) {
        match progress {
            Progress::Prompt { modal, pending } => {
                self.open_dialog(modal, Suspended::Save(pending));
            }
            Progress::Finished(Verdict::Accepted) => {
                let stage = to_stage_config(query::content(&self.world), true);
                log::info!("stage {:?} saved", stage.name);
                self.sink.persist_stage(stage);
                self.sink.navigate(Route::CustomStageList);
            }
            Progress::Finished(Verdict::Rejected(rejection)) => {
                log::info!("save rejected: {rejection:?}");
                if let Some(route) = rejection.redirect() {
                    if let Route::Editor(view) = route {
                        self.view = view;
                    }
                    self.sink.navigate(route);
                }
            }
        }
    }

    fn open_dialog(&mut self, modal: Modal, suspended: Suspended) {
        log::debug!("opening {modal:?}");
        if let Err(error) = self.modal.open(modal, suspended) {
            log::warn!("dialog request refused: {error}");
        }
    }
}
