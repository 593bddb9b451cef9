//! Scripted navigation steps for the `simulate` command.
//!
//! A step is `push:/path`, `replace:/path`, `back`, `forward` or `go:N`.

use std::str::FromStr;

use thiserror::Error;

use crate::navigation::controller::NavigationController;
use crate::navigation::history::MemoryHistory;

/// Errors parsing a step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("unknown step `{0}` (expected push:PATH, replace:PATH, back, forward or go:N)")]
    Unknown(String),

    #[error("invalid traversal delta `{0}`")]
    Delta(String),
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Push(String),
    Replace(String),
    Go(isize),
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("push", path)) => Ok(Step::Push(path.to_string())),
            Some(("replace", path)) => Ok(Step::Replace(path.to_string())),
            Some(("go", delta)) => delta
                .trim()
                .parse()
                .map(Step::Go)
                .map_err(|_| StepError::Delta(delta.to_string())),
            None if s == "back" => Ok(Step::Go(-1)),
            None if s == "forward" => Ok(Step::Go(1)),
            _ => Err(StepError::Unknown(s.to_string())),
        }
    }
}

impl Step {
    /// Perform the step. Returns true if the location changed.
    ///
    /// Traversals act on the history, as a user pressing back would, and
    /// reach the controller through its subscription.
    pub fn run<C: Clone>(&self, history: &MemoryHistory, controller: &mut NavigationController<C, MemoryHistory>) -> bool {
        match self {
            Step::Push(path) => controller.push(path),
            Step::Replace(path) => controller.replace(path),
            Step::Go(delta) => history.go(*delta) && controller.sync() > 0,
        }
    }
}
