//! Line-oriented input scripts replayed through an editing session.
//!
//! One step per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! view map
//! select brick
//! toggle top-left
//! press 40 40
//! move 72 40
//! release 104 40
//! name Canyon
//! count 0 down
//! save
//! yes
//! ```

use anyhow::{anyhow, bail, Context, Result};
use glam::Vec2;
use tank_editor_core::{Answer, Command, EditorSink, ItemKind, Quadrant, StageLookup, Step};
use tank_editor_system_painter::{resolver::SurfaceOffset, PointerAction};
use tank_editor_system_session::EditorSession;

/// Single scripted author input.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ScriptStep {
    /// Pointer event at a viewport position.
    Pointer {
        action: PointerAction,
        position: Vec2,
    },
    /// Editing command sent to the world.
    Edit(Command),
    /// Location change naming an editor view.
    View(String),
    /// Save button.
    Save,
    /// Back button.
    Back,
    /// Help button.
    Help,
    /// Answer to the open dialog.
    Answer(Answer),
}

/// Parses a whole script.
pub(crate) fn parse_script(source: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_step(line).with_context(|| format!("line {}: `{line}`", index + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_step(line: &str) -> Result<ScriptStep> {
    let (keyword, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(keyword, rest)| (keyword, rest.trim()));
    let mut args = rest.split_whitespace();

    let step = match keyword {
        "press" => pointer(PointerAction::Press, &mut args)?,
        "move" => pointer(PointerAction::Move, &mut args)?,
        "release" => pointer(PointerAction::Release, &mut args)?,
        "leave" => ScriptStep::Pointer {
            action: PointerAction::Leave,
            position: Vec2::ZERO,
        },
        "select" => ScriptStep::Edit(Command::SelectItemKind {
            kind: parse_kind(next(&mut args, "item kind")?)?,
        }),
        "toggle" => ScriptStep::Edit(Command::ToggleMaskQuadrant {
            quadrant: parse_quadrant(next(&mut args, "quadrant")?)?,
        }),
        "fill" => ScriptStep::Edit(Command::FillMask),
        // The name is the raw remainder so that it may contain spaces.
        "name" => {
            return Ok(ScriptStep::Edit(Command::SetName {
                name: rest.to_owned(),
            }))
        }
        "difficulty" => ScriptStep::Edit(Command::StepDifficulty {
            step: parse_step_direction(next(&mut args, "direction")?)?,
        }),
        "level" | "count" => {
            let slot = next(&mut args, "slot")?
                .parse::<usize>()
                .context("slot must be a non-negative integer")?;
            let step = parse_step_direction(next(&mut args, "direction")?)?;
            if keyword == "level" {
                ScriptStep::Edit(Command::StepEnemyLevel { slot, step })
            } else {
                ScriptStep::Edit(Command::StepEnemyCount { slot, step })
            }
        }
        "view" => ScriptStep::View(next(&mut args, "view")?.to_owned()),
        "save" => ScriptStep::Save,
        "back" => ScriptStep::Back,
        "help" => ScriptStep::Help,
        "ok" => ScriptStep::Answer(Answer::Acknowledged),
        "yes" => ScriptStep::Answer(Answer::Accepted),
        "no" => ScriptStep::Answer(Answer::Declined),
        _ => bail!("unknown step `{keyword}`"),
    };

    if let Some(extra) = args.next() {
        bail!("unexpected argument `{extra}`");
    }
    Ok(step)
}

fn next<'a>(args: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<&'a str> {
    args.next().ok_or_else(|| anyhow!("missing {what}"))
}

fn pointer<'a>(
    action: PointerAction,
    args: &mut impl Iterator<Item = &'a str>,
) -> Result<ScriptStep> {
    let x = next(args, "x coordinate")?
        .parse::<f32>()
        .context("x coordinate must be a number")?;
    let y = next(args, "y coordinate")?
        .parse::<f32>()
        .context("y coordinate must be a number")?;
    Ok(ScriptStep::Pointer {
        action,
        position: Vec2::new(x, y),
    })
}

fn parse_kind(value: &str) -> Result<ItemKind> {
    Ok(match value {
        "empty" => ItemKind::Empty,
        "brick" => ItemKind::Brick,
        "steel" => ItemKind::Steel,
        "river" => ItemKind::River,
        "snow" => ItemKind::Snow,
        "forest" => ItemKind::Forest,
        "eagle" => ItemKind::Eagle,
        _ => bail!("unknown item kind `{value}`"),
    })
}

fn parse_quadrant(value: &str) -> Result<Quadrant> {
    Ok(match value {
        "top-left" => Quadrant::TopLeft,
        "top-right" => Quadrant::TopRight,
        "bottom-left" => Quadrant::BottomLeft,
        "bottom-right" => Quadrant::BottomRight,
        _ => bail!("unknown quadrant `{value}`"),
    })
}

fn parse_step_direction(value: &str) -> Result<Step> {
    Ok(match value {
        "up" => Step::Increase,
        "down" => Step::Decrease,
        _ => bail!("direction must be `up` or `down`, got `{value}`"),
    })
}

/// Feeds every step into `session`, resolving pointers against `chain`.
pub(crate) fn replay<L: StageLookup, S: EditorSink>(
    session: &mut EditorSession<L, S>,
    steps: &[ScriptStep],
    chain: &[SurfaceOffset],
) {
    for step in steps {
        match step {
            ScriptStep::Pointer { action, position } => session.pointer(*action, *position, chain),
            ScriptStep::Edit(command) => {
                if !session.command(command.clone()) {
                    log::warn!("{command:?} ignored while a dialog is open");
                }
            }
            ScriptStep::View(segment) => {
                let _ = session.select_view(segment);
            }
            ScriptStep::Save => session.save(),
            ScriptStep::Back => session.back(),
            ScriptStep::Help => session.show_help(),
            ScriptStep::Answer(answer) => session.answer(*answer),
        }

        if let Some(modal) = session.modal() {
            log::info!("dialog: {}", modal.message());
        }
        for event in session.drain_events() {
            log::debug!("{event:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let steps = parse_script(
            "# paint a wall\n\
             view map\n\
             select steel\n\
             toggle bottom-right\n\
             fill\n\
             press 1 2.5\n\
             move 3 4\n\
             release 5 6\n\
             leave\n\
             \n\
             name  Big Canyon \n\
             difficulty up\n\
             level 2 down\n\
             count 0 up\n\
             save\n\
             yes\n\
             no\n\
             ok\n\
             help\n\
             back\n",
        )
        .expect("script parses");

        assert_eq!(steps.len(), 18);
        assert_eq!(steps[0], ScriptStep::View("map".to_owned()));
        assert_eq!(
            steps[2],
            ScriptStep::Edit(Command::ToggleMaskQuadrant {
                quadrant: Quadrant::BottomRight,
            })
        );
        assert_eq!(
            steps[4],
            ScriptStep::Pointer {
                action: PointerAction::Press,
                position: Vec2::new(1.0, 2.5),
            }
        );
        assert_eq!(
            steps[8],
            ScriptStep::Edit(Command::SetName {
                name: "Big Canyon".to_owned(),
            })
        );
        assert_eq!(
            steps[10],
            ScriptStep::Edit(Command::StepEnemyLevel {
                slot: 2,
                step: Step::Decrease,
            })
        );
        assert_eq!(steps[13], ScriptStep::Answer(Answer::Accepted));
    }

    #[test]
    fn empty_name_clears_the_name() {
        assert_eq!(
            parse_script("name").expect("script parses"),
            vec![ScriptStep::Edit(Command::SetName {
                name: String::new(),
            })]
        );
    }

    #[test]
    fn reports_the_offending_line() {
        let error = parse_script("save\nselect lava\n").expect_err("unknown kind");
        let message = format!("{error:#}");
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("lava"), "{message}");
    }

    #[test]
    fn rejects_malformed_steps() {
        assert!(parse_script("press 1").is_err());
        assert!(parse_script("press one two").is_err());
        assert!(parse_script("count x up").is_err());
        assert!(parse_script("difficulty sideways").is_err());
        assert!(parse_script("save now").is_err());
        assert!(parse_script("jump").is_err());
    }
}
