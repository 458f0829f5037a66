// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Settings of the surrounding action tasks.
//!
//! These inputs never reach semantic-release directly. They steer where the
//! release runs, which packages get installed next to it and how the child
//! process environment looks.

use std::path::PathBuf;

use crate::inputs::{self, Inputs};

/// Action settings resolved from the inputs snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct ActionSettings
{
    /// Directory to switch into before running anything.
    pub working_directory: Option<PathBuf,>,
    /// Extra npm packages, as given by the user.
    pub extra_plugins:     String,
    /// Shareable configurations to install, as given by the user.
    pub extends:           String,
    /// Requested semantic-release version, empty for the latest.
    pub semantic_version:  String,
    /// Remove `GITHUB_ACTIONS` from the release process environment.
    pub unset_gha_env:     bool,
    /// Runner debug logging is enabled (`RUNNER_DEBUG=1`).
    pub runner_debug:      bool,
}

impl ActionSettings
{
    /// Reads the settings from the inputs snapshot.
    ///
    /// # Examples
    ///
    /// ```
    /// use semrel_action::{ActionSettings, Inputs};
    ///
    /// let inputs = Inputs::from_inputs([("unset_gha_env", "true",), ("semantic_version", "19",),],);
    /// let settings = ActionSettings::from_inputs(&inputs,);
    /// assert!(settings.unset_gha_env);
    /// assert_eq!(settings.semantic_version, "19");
    /// ```
    pub fn from_inputs(inputs: &Inputs,) -> Self
    {
        let working_directory = inputs.get(inputs::WORKING_DIRECTORY,);

        Self {
            working_directory: (!working_directory.is_empty())
                .then(|| PathBuf::from(working_directory,),),
            extra_plugins:     inputs.get(inputs::EXTRA_PLUGINS,),
            extends:           inputs.get(inputs::EXTENDS,),
            semantic_version:  inputs.get(inputs::SEMANTIC_VERSION,),
            unset_gha_env:     inputs.get(inputs::UNSET_GHA_ENV,) == "true",
            runner_debug:      inputs.var("RUNNER_DEBUG",) == Some("1",),
        }
    }
}
