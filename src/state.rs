//! Task lifecycle states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifecycle stage of a task.
///
/// Declaration order is the default listing order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Focus,
    #[default]
    Active,
    Later,
    Done,
}

impl State {
    pub const ALL: [State; 4] = [State::Focus, State::Active, State::Later, State::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            State::Focus => "focus",
            State::Active => "active",
            State::Later => "later",
            State::Done => "done",
        }
    }

    /// Position in the default listing order.
    pub fn rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        validate_state(s)
    }
}

/// Accept exactly one of the four lowercase state names.
pub fn validate_state(value: &str) -> Result<State> {
    State::ALL
        .into_iter()
        .find(|state| state.as_str() == value)
        .ok_or_else(|| Error::invalid("state", value))
}

/// CLI-boundary parsing: trims and ignores case before validating.
pub fn parse_state_arg(value: &str) -> Result<State> {
    validate_state(&value.trim().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_state_accepts_enumeration() {
        for state in State::ALL {
            assert_eq!(validate_state(state.as_str()).unwrap(), state);
        }
    }

    #[test]
    fn validate_state_is_case_sensitive() {
        assert!(matches!(validate_state("Focus"), Err(Error::Invalid { .. })));
        assert!(matches!(validate_state("blocked"), Err(Error::Invalid { .. })));
        assert!(matches!(validate_state(""), Err(Error::Invalid { .. })));
    }

    #[test]
    fn parse_state_arg_ignores_case() {
        assert_eq!(parse_state_arg(" LATER ").unwrap(), State::Later);
        assert_eq!(parse_state_arg("Done").unwrap(), State::Done);
    }

    #[test]
    fn order_is_focus_active_later_done() {
        let mut states = vec![State::Done, State::Later, State::Focus, State::Active];
        states.sort();
        assert_eq!(states, State::ALL.to_vec());
        assert_eq!(State::default(), State::Active);
    }
}
