#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Save-time checks for a stage under edit.
//!
//! The pipeline is a resumable state machine. [`begin`] runs checks until it
//! either reaches a verdict or needs the author to answer a dialog. In the
//! latter case it hands back the dialog together with a [`PendingCheck`], which
//! the caller parks until the dialog resolves and then feeds the answer into
//! [`PendingCheck::resume`].
//!
//! Checks only read the [`StageSummary`] captured when save started and the
//! stage lookup; they never touch the document.

use tank_editor_core::{
    total_enemy_count, Answer, EditorContent, EditorView, Modal, Route, StageLookup,
};

/// Roster size that saves without a warning.
pub const EXPECTED_ENEMY_TOTAL: u32 = 20;

/// Alert shown when the stage has no name.
pub const MISSING_NAME_MESSAGE: &str = "Please enter stage name.";
/// Alert shown when the roster is empty.
pub const NO_ENEMY_MESSAGE: &str = "no enemy";
/// Alert shown when the field has no eagle.
pub const NO_EAGLE_MESSAGE: &str = "no eagle.";
/// Confirm shown when a custom stage with the same name would be replaced.
pub const OVERRIDE_MESSAGE: &str = "Override existing custom stage. continue?";

/// Alert shown when a built-in stage already uses `name`.
#[must_use]
pub fn name_taken_message(name: &str) -> String {
    format!("Stage {name} already exists.")
}

/// Confirm shown when the roster does not add up to [`EXPECTED_ENEMY_TOTAL`].
#[must_use]
pub fn enemy_total_message() -> String {
    format!("total enemy count is not {EXPECTED_ENEMY_TOTAL}. continue?")
}

/// Facts about the document the checks look at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageSummary {
    /// Stage name.
    pub name: String,
    /// Sum of all roster counts.
    pub total_enemies: u32,
    /// Whether the field holds an eagle.
    pub has_eagle: bool,
}

impl StageSummary {
    /// Captures the summary of `content`.
    #[must_use]
    pub fn of(content: &EditorContent) -> Self {
        Self {
            name: content.name.clone(),
            total_enemies: total_enemy_count(&content.enemies),
            has_eagle: content.grid.eagle().is_some(),
        }
    }
}

/// Why a save was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The stage has no name.
    MissingName,
    /// A built-in stage already uses the name.
    BuiltInNameTaken,
    /// The roster is empty.
    NoEnemies,
    /// The field has no eagle.
    NoEagle,
    /// The author refused to replace an existing custom stage.
    OverrideDeclined,
    /// The author refused to save with an unusual roster size.
    EnemyTotalDeclined,
}

impl Rejection {
    /// Location the editor moves to after this rejection, if any.
    #[must_use]
    pub const fn redirect(self) -> Option<Route> {
        match self {
            Self::MissingName => Some(Route::Editor(EditorView::Config)),
            _ => None,
        }
    }
}

/// Outcome of a complete run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The stage may be persisted.
    Accepted,
    /// The stage must not be persisted.
    Rejected(Rejection),
}

/// Where a run stands.
#[derive(Debug, PartialEq, Eq)]
pub enum Progress {
    /// The run waits for the author to answer `modal`.
    Prompt {
        /// Dialog to show.
        modal: Modal,
        /// Remainder of the run, resumed with the author's answer.
        pending: PendingCheck,
    },
    /// The run is over.
    Finished(Verdict),
}

/// Suspended remainder of a run.
///
/// Consumed by [`PendingCheck::resume`], so each suspension is resumed at most
/// once.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingCheck {
    resume: Resume,
}

#[derive(Debug, PartialEq, Eq)]
enum Resume {
    /// A terminal alert was shown; any answer rejects.
    Reject(Rejection),
    /// The override confirm was shown; the enemy total check follows.
    AfterOverride { total_enemies: u32 },
    /// The enemy total confirm was shown; nothing follows.
    AfterEnemyTotal,
}

impl PendingCheck {
    /// Continues the run with the author's answer to the shown dialog.
    ///
    /// Only [`Answer::Accepted`] lets a confirm pass; an alert always ends
    /// the run with its rejection.
    #[must_use]
    pub fn resume(self, answer: Answer) -> Progress {
        let accepted = answer == Answer::Accepted;
        match self.resume {
            Resume::Reject(rejection) => Progress::Finished(Verdict::Rejected(rejection)),
            Resume::AfterOverride { total_enemies } => {
                if accepted {
                    check_enemy_total(total_enemies)
                } else {
                    Progress::Finished(Verdict::Rejected(Rejection::OverrideDeclined))
                }
            }
            Resume::AfterEnemyTotal => {
                if accepted {
                    Progress::Finished(Verdict::Accepted)
                } else {
                    Progress::Finished(Verdict::Rejected(Rejection::EnemyTotalDeclined))
                }
            }
        }
    }

    /// Whether this suspension ends in a rejection whatever the answer.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.resume, Resume::Reject(_))
    }
}

/// Starts a run over `summary`, consulting `stages` for name collisions.
pub fn begin<L: StageLookup + ?Sized>(summary: &StageSummary, stages: &L) -> Progress {
    if summary.name.is_empty() {
        return alert(MISSING_NAME_MESSAGE.to_owned(), Rejection::MissingName);
    }
    if stages.has_stage(&summary.name, false) {
        return alert(name_taken_message(&summary.name), Rejection::BuiltInNameTaken);
    }
    if summary.total_enemies == 0 {
        return alert(NO_ENEMY_MESSAGE.to_owned(), Rejection::NoEnemies);
    }
    if !summary.has_eagle {
        return alert(NO_EAGLE_MESSAGE.to_owned(), Rejection::NoEagle);
    }

    if stages.has_stage(&summary.name, true) {
        return Progress::Prompt {
            modal: Modal::Confirm {
                message: OVERRIDE_MESSAGE.to_owned(),
            },
            pending: PendingCheck {
                resume: Resume::AfterOverride {
                    total_enemies: summary.total_enemies,
                },
            },
        };
    }

    check_enemy_total(summary.total_enemies)
}

fn check_enemy_total(total_enemies: u32) -> Progress {
    if total_enemies == EXPECTED_ENEMY_TOTAL {
        return Progress::Finished(Verdict::Accepted);
    }

    Progress::Prompt {
        modal: Modal::Confirm {
            message: enemy_total_message(),
        },
        pending: PendingCheck {
            resume: Resume::AfterEnemyTotal,
        },
    }
}

fn alert(message: String, rejection: Rejection) -> Progress {
    Progress::Prompt {
        modal: Modal::Alert { message },
        pending: PendingCheck {
            resume: Resume::Reject(rejection),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_end_the_run_whatever_the_answer() {
        for answer in [Answer::Acknowledged, Answer::Accepted, Answer::Declined] {
            let pending = PendingCheck {
                resume: Resume::Reject(Rejection::NoEagle),
            };
            assert!(pending.is_terminal());
            assert_eq!(
                pending.resume(answer),
                Progress::Finished(Verdict::Rejected(Rejection::NoEagle))
            );
        }
    }

    #[test]
    fn only_missing_name_redirects() {
        assert_eq!(
            Rejection::MissingName.redirect(),
            Some(Route::Editor(EditorView::Config))
        );
        assert_eq!(Rejection::NoEnemies.redirect(), None);
        assert_eq!(Rejection::OverrideDeclined.redirect(), None);
    }

    #[test]
    fn enemy_total_message_names_the_expected_total() {
        assert_eq!(
            enemy_total_message(),
            "total enemy count is not 20. continue?"
        );
    }

    #[test]
    fn summary_reads_name_roster_and_eagle() {
        let content = EditorContent::blank();
        let summary = StageSummary::of(&content);
        assert_eq!(summary.name, "");
        assert_eq!(summary.total_enemies, 20);
        assert!(!summary.has_eagle);
    }
}
