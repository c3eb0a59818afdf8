//! Action scripts for headless runs
//!
//! One character per step: `L` left, `R` right, `D` down, `C` rotate clockwise,
//! `A` rotate counter-clockwise, `.` one gravity interval. Whitespace is ignored.

use thiserror::Error;

use crate::types::BrickAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Action(BrickAction),
    /// Let one full gravity interval pass
    Gravity,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown script step {found:?} at position {index}")]
    UnknownStep { index: usize, found: char },
}

pub fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(index, c)| match c {
            '.' => Ok(Step::Gravity),
            _ => BrickAction::from_char(c)
                .map(Step::Action)
                .ok_or(ScriptError::UnknownStep { index, found: c }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_and_gravity() {
        let steps = parse_script("LR d.\nCA").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Action(BrickAction::MoveLeft),
                Step::Action(BrickAction::MoveRight),
                Step::Action(BrickAction::MoveDown),
                Step::Gravity,
                Step::Action(BrickAction::RotateClockWise),
                Step::Action(BrickAction::RotateCounterClockWise),
            ]
        );
    }

    #[test]
    fn reports_position_of_unknown_step() {
        let err = parse_script("LLx").unwrap_err();
        assert_eq!(err, ScriptError::UnknownStep { index: 2, found: 'x' });
        assert_eq!(err.to_string(), "unknown script step 'x' at position 2");
    }

    #[test]
    fn empty_script_is_fine() {
        assert!(parse_script("  ").unwrap().is_empty());
    }
}
