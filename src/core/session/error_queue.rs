/*!
Access to the engine's per-session error queue.

The engine keeps a ring of `MAX_ERROR_MESSAGES` records and reads it oldest
first. A read on an empty queue reports `ErrorCode::Ok`. Failed operations
only peek at the queue, so the records are still here for the caller.
*/

use std::fmt;

use crate::core::constants::MAX_ERROR_MESSAGES;
use crate::core::engine::{Engine, RawErrorLine};
use crate::core::error::Result;
use crate::core::types::ErrorCode;

use super::Session;

/// Source location the engine recorded for an error
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorLocation {
    pub file: String,
    pub line: i32,
}

/// One entry read from the error queue
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorRecord {
    pub code: ErrorCode,
    /// Absent when the engine was built without location tracking
    pub location: Option<ErrorLocation>,
}

impl From<RawErrorLine> for ErrorRecord {
    fn from(raw: RawErrorLine) -> Self {
        let location = raw
            .file
            .filter(|file| !file.is_empty())
            .map(|file| ErrorLocation { file, line: raw.line });
        Self {
            code: ErrorCode::from(raw.code),
            location,
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} at {}:{}", self.code, loc.file, loc.line),
            None => write!(f, "{}", self.code),
        }
    }
}

impl<E: Engine> Session<E> {
    /// Remove and return the oldest queued error
    pub fn get_error(&self) -> Result<ErrorCode> {
        let handle = self.live()?;
        Ok(ErrorCode::from(self.engine.err_get_error(handle)))
    }

    /// Return the oldest queued error without removing it
    pub fn peek_error(&self) -> Result<ErrorCode> {
        let handle = self.live()?;
        Ok(ErrorCode::from(self.engine.err_peek_error(handle)))
    }

    pub fn get_error_with_location(&self) -> Result<ErrorRecord> {
        let handle = self.live()?;
        Ok(self.engine.err_get_error_line(handle).into())
    }

    pub fn peek_error_with_location(&self) -> Result<ErrorRecord> {
        let handle = self.live()?;
        Ok(self.engine.err_peek_error_line(handle).into())
    }

    /// Empty the queue, read or not
    pub fn clear_errors(&self) -> Result<()> {
        let handle = self.live()?;
        self.engine.err_clear_error(handle);
        Ok(())
    }

    /// Read every queued error, oldest first, leaving the queue empty.
    ///
    /// At most `MAX_ERROR_MESSAGES` records are read; anything left after
    /// that is cleared.
    pub fn drain_errors(&self) -> Result<Vec<ErrorRecord>> {
        let handle = self.live()?;
        let mut records = Vec::new();
        for _ in 0..MAX_ERROR_MESSAGES {
            let record = ErrorRecord::from(self.engine.err_get_error_line(handle));
            if record.code.is_ok() {
                return Ok(records);
            }
            records.push(record);
        }
        self.engine.err_clear_error(handle);
        Ok(records)
    }
}
