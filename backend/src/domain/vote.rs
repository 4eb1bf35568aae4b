//! Thread votes.

use thiserror::Error;

use super::Error;

/// Raised when a vote is neither `1` nor `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("voice must be 1 or -1, got {value}")]
pub struct InvalidVoice {
    /// The rejected value.
    pub value: i32,
}

impl From<InvalidVoice> for Error {
    fn from(value: InvalidVoice) -> Self {
        Error::invalid_request(value.to_string())
    }
}

/// A single user's opinion of a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Voice {
    /// `+1`.
    Up,
    /// `-1`.
    Down,
}

impl Voice {
    /// Contribution to the thread's vote total.
    pub const fn value(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl TryFrom<i32> for Voice {
    type Error = InvalidVoice;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            _ => Err(InvalidVoice { value }),
        }
    }
}

/// A vote request before user resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteDraft {
    /// Voter nickname in any casing.
    pub nickname: String,
    /// Raw voice value.
    pub voice: i32,
}
