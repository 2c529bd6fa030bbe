//! Decoder session capabilities.
//!
//! The binary EDF decoder is an external collaborator. This module defines
//! the capabilities the trial reader consumes from it: opening a session
//! over a recording, configuring trial boundary markers, seeking trials,
//! and pulling records one at a time from a forward-only cursor.
//!
//! A session owns exactly one cursor and is not shareable; readers that
//! need a second pass open a second session. Sessions release their
//! underlying resources on drop.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{Record, TrialHeader};

/// Timestamp consistency checking performed by the decoder on open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsistencyCheck {
    /// No consistency check
    None,
    /// Check consistency and report
    Report,
    /// Check consistency and fix
    #[default]
    Fix,
}

impl ConsistencyCheck {
    /// The decoder-level numeric code for this mode.
    pub fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Report => 1,
            Self::Fix => 2,
        }
    }
}

/// Fatal session failures. Any of these aborts the whole read; no partial
/// bundle is returned.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The recording could not be opened.
    #[error("error opening file '{}', error code: {code}", .path.display())]
    Open {
        /// Path of the recording
        path: PathBuf,
        /// Decoder error code
        code: i32,
    },

    /// The decoder rejected the trial boundary markers.
    #[error("error while setting up trial navigation identifier")]
    Navigation,

    /// The decoder could not position the cursor at the given trial.
    /// Trial ordering is assumed monotonic, so a failed seek leaves the
    /// stream desynchronized and unsafe to continue from.
    #[error("error jumping to trial {0}")]
    TrialSeek(usize),

    /// The header for the given trial could not be obtained.
    #[error("error obtaining the header for trial {0}")]
    TrialHeader(usize),

    /// The device preamble text could not be read.
    #[error("error reading preamble for file '{}', error code: {code}", .path.display())]
    Preamble {
        /// Path of the recording
        path: PathBuf,
        /// Decoder error code
        code: i32,
    },
}

/// An open decoder session: one forward-only cursor over a recording.
pub trait EdfSession {
    /// Configures the marker strings that delimit trials. Must be called
    /// before any trial navigation.
    fn set_trial_identifier(&mut self, start_marker: &str, end_marker: &str)
        -> Result<(), SessionError>;

    /// Total number of trials delimited by the configured markers.
    fn trial_count(&self) -> usize;

    /// Positions the cursor at the start of the given trial.
    fn seek_trial(&mut self, index: usize) -> Result<(), SessionError>;

    /// Header of the trial the cursor is positioned at.
    fn trial_header(&mut self) -> Result<TrialHeader, SessionError>;

    /// Pulls the next record; yields [`Record::Exhausted`] at end of stream.
    fn next_record(&mut self) -> Record;

    /// The device preamble as a single string.
    fn preamble_text(&mut self) -> Result<String, SessionError>;
}

/// Opens decoder sessions over recordings on request.
pub trait EdfSource {
    /// The session type produced by this source.
    type Session: EdfSession;

    /// Opens a new session. `want_events` and `want_samples` control which
    /// record kinds the decoder emits.
    fn open(
        &self,
        path: &Path,
        consistency: ConsistencyCheck,
        want_events: bool,
        want_samples: bool,
    ) -> Result<Self::Session, SessionError>;
}

/// Reads the device preamble of a recording as a single string.
///
/// A simpler path than trial reading: opens a session with events and
/// samples disabled and returns the preamble text.
pub fn read_preamble<S: EdfSource>(source: &S, path: &Path) -> Result<String, SessionError> {
    let mut session = source.open(path, ConsistencyCheck::Fix, false, false)?;
    session.preamble_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistency_codes() {
        assert_eq!(ConsistencyCheck::None.code(), 0);
        assert_eq!(ConsistencyCheck::Report.code(), 1);
        assert_eq!(ConsistencyCheck::Fix.code(), 2);
        assert_eq!(ConsistencyCheck::default(), ConsistencyCheck::Fix);
    }

    #[test]
    fn test_error_messages() {
        let err = SessionError::Open {
            path: PathBuf::from("missing.edf"),
            code: -1,
        };
        assert_eq!(
            err.to_string(),
            "error opening file 'missing.edf', error code: -1"
        );
        assert_eq!(
            SessionError::TrialSeek(4).to_string(),
            "error jumping to trial 4"
        );
    }
}
