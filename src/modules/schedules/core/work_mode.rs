use serde::{Deserialize, Serialize};
use std::fmt;

/// Shift category of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkMode {
    /// Full day, first kind.
    F,
    /// Full day, second kind.
    B,
    /// Absence.
    U,
    /// Leave that needs a substitute.
    UW,
    /// Sick leave that needs a substitute.
    ZL,
    /// Substitution inferred from the grid.
    S,
}

impl WorkMode {
    /// Modes an author may type into a mode row. `S` is only ever inferred.
    pub const FIXED: [WorkMode; 5] = [WorkMode::F, WorkMode::B, WorkMode::U, WorkMode::UW, WorkMode::ZL];

    /// Modes that get a synthetic late shift appended.
    pub const LATE_SHIFT: [WorkMode; 2] = [WorkMode::F, WorkMode::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkMode::F => "F",
            WorkMode::B => "B",
            WorkMode::U => "U",
            WorkMode::UW => "UW",
            WorkMode::ZL => "ZL",
            WorkMode::S => "S",
        }
    }

    /// Parses an uppercased cell value into one of the fixed modes.
    pub fn fixed(code: &str) -> Option<WorkMode> {
        Self::FIXED.into_iter().find(|mode| mode.as_str() == code)
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod work_mode_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("F", Some(WorkMode::F))]
    #[case("UW", Some(WorkMode::UW))]
    #[case("ZL", Some(WorkMode::ZL))]
    #[case("S", None)]
    #[case("f", None)]
    #[case("", None)]
    fn it_should_only_parse_fixed_modes(#[case] code: &str, #[case] expected: Option<WorkMode>) {
        assert_eq!(WorkMode::fixed(code), expected);
    }
}
