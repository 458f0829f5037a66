#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the action crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Option translation never produces these errors; they originate from the
//! surrounding tasks (package installation, the release run, output writing).

use std::path::{Path, PathBuf};

/// Unified error type returned by the action tasks and CLI.
///
/// Instances are typically constructed through the [`io_error`] and
/// [`command_error`] helpers or by converting from [`serde_json::Error`].
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors raised while touching files in the workspace.
    #[error("failed to access {path:?}: {source}")]
    Io {
        /// Location of the file or directory.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps JSON encoding and decoding errors.
    #[error("failed to process release JSON: {source}")]
    Serialize {
        /// Underlying serde_json error.
        source: serde_json::Error
    },
    /// Returned when an input or output violates an invariant.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Returned when an external command cannot be spawned or exits with a
    /// failure status.
    #[error("command `{command}` failed: {message}")]
    Command {
        /// Command line that was executed.
        command: String,
        /// Description of the failure, usually the captured stderr.
        message: String
    },
    /// Returned when semantic-release itself reports a failure.
    #[error("semantic-release failed: {message}")]
    Release {
        /// Human readable message describing the release failure.
        message: String
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a release error from the provided displayable value.
    pub fn release<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Release {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Command`] variant for the given command line.
///
/// # Parameters
///
/// * `command` - Program and arguments joined for display.
/// * `message` - Failure description reported to the user.
pub fn command_error<C, M>(command: C, message: M) -> Error
where
    C: Into<String>,
    M: Into<String>
{
    Error::Command {
        command: command.into(),
        message: message.into()
    }
}
