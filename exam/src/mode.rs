//! Strict vs. learning exam modes.

use std::fmt;
use std::str::FromStr;

use crate::error::ExamError;
use crate::question::{PracticeSet, StartedSession};

/// Mode-specific parameters needed to start an [`crate::ExamSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExamMode {
    /// Timed, graded by the server after submission.
    Strict { session_id: u64, duration_secs: u64 },
    /// Untimed practice, graded locally against embedded correctness flags.
    Learning { pass_mark: u8 },
}

impl ExamMode {
    #[must_use]
    pub fn strict_from(started: &StartedSession) -> Self {
        Self::Strict { session_id: started.session_id, duration_secs: u64::from(started.duration_minutes) * 60 }
    }

    #[must_use]
    pub fn learning_from(set: &PracticeSet) -> Self {
        Self::Learning { pass_mark: set.pass_mark }
    }

    #[must_use]
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Strict { .. } => ModeKind::Strict,
            Self::Learning { .. } => ModeKind::Learning,
        }
    }
}

/// Mode name as it appears in routes and CLI flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeKind {
    #[default]
    Strict,
    Learning,
}

impl ModeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Learning => "learning",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Strict => "Exam",
            Self::Learning => "Practice",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeKind {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "exam" => Ok(Self::Strict),
            "learning" | "practice" => Ok(Self::Learning),
            other => Err(ExamError::UnknownMode(other.to_owned())),
        }
    }
}
