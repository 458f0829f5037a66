// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Explicit snapshot of the action inputs.
//!
//! The Actions runner exposes every `with:` input as an environment variable
//! named `INPUT_<NAME>`, where the name is upper-cased and spaces become
//! underscores. [`Inputs`] captures those variables once at the boundary so
//! option translation can work against a plain map instead of ambient process
//! state.

use std::collections::BTreeMap;

/// Input name holding the JSON or literal branch configuration.
pub const BRANCHES: &str = "branches";
/// Input name holding the single-branch fallback.
pub const BRANCH: &str = "branch";
/// Input name toggling dry-run mode.
pub const DRY_RUN: &str = "dry_run";
/// Input name toggling CI verification.
pub const CI: &str = "ci";
/// Input name listing shareable configurations, one per line.
pub const EXTENDS: &str = "extends";
/// Input name overriding the git tag format.
pub const TAG_FORMAT: &str = "tag_format";
/// Input name overriding the repository URL.
pub const REPOSITORY_URL: &str = "repository_url";
/// Input name selecting the directory semantic-release runs in.
pub const WORKING_DIRECTORY: &str = "working_directory";
/// Input name listing additional npm packages to install.
pub const EXTRA_PLUGINS: &str = "extra_plugins";
/// Input name pinning the semantic-release version.
pub const SEMANTIC_VERSION: &str = "semantic_version";
/// Input name requesting removal of `GITHUB_ACTIONS` for the release run.
pub const UNSET_GHA_ENV: &str = "unset_gha_env";

/// Options applied when reading a single input.
#[derive(Debug, Clone, Copy,)]
pub struct InputOptions
{
    /// Strip leading and trailing whitespace from the value.
    pub trim_whitespace: bool,
}

impl Default for InputOptions
{
    fn default() -> Self
    {
        Self {
            trim_whitespace: true,
        }
    }
}

/// Snapshot of environment-style key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct Inputs
{
    vars: BTreeMap<String, String,>,
}

impl Inputs
{
    /// Captures the current process environment.
    pub fn from_env() -> Self
    {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Builds a snapshot from raw environment variable pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use semrel_action::Inputs;
    ///
    /// let inputs = Inputs::from_vars([("INPUT_DRY_RUN", "true",),],);
    /// assert_eq!(inputs.get("dry_run"), "true");
    /// ```
    pub fn from_vars<I, K, V,>(vars: I,) -> Self
    where
        I: IntoIterator<Item = (K, V,),>,
        K: Into<String,>,
        V: Into<String,>,
    {
        Self {
            vars: vars.into_iter().map(|(key, value,)| (key.into(), value.into(),),).collect(),
        }
    }

    /// Builds a snapshot from action input names, translating each name into
    /// its `INPUT_` variable.
    pub fn from_inputs<I, K, V,>(inputs: I,) -> Self
    where
        I: IntoIterator<Item = (K, V,),>,
        K: AsRef<str,>,
        V: Into<String,>,
    {
        Self::from_vars(
            inputs.into_iter().map(|(name, value,)| (input_variable(name.as_ref(),), value,),),
        )
    }

    /// Returns the trimmed value of an action input, or an empty string when
    /// it is not set.
    pub fn get(&self, name: &str,) -> String
    {
        self.get_with(name, InputOptions::default(),)
    }

    /// Returns the value of an action input using explicit read options.
    pub fn get_with(&self, name: &str, options: InputOptions,) -> String
    {
        let raw = self.vars.get(&input_variable(name,),).map(String::as_str,).unwrap_or_default();

        if options.trim_whitespace { raw.trim().to_owned() } else { raw.to_owned() }
    }

    /// Returns a raw environment variable from the snapshot.
    pub fn var(&self, key: &str,) -> Option<&str,>
    {
        self.vars.get(key,).map(String::as_str,)
    }
}

/// Maps an input name onto the environment variable the runner sets for it.
pub fn input_variable(name: &str,) -> String
{
    format!("INPUT_{}", name.replace(' ', "_",).to_uppercase())
}

#[cfg(test)]
mod tests
{
    use super::{InputOptions, Inputs, input_variable};

    #[test]
    fn input_variable_uppercases_and_replaces_spaces()
    {
        assert_eq!(input_variable("dry_run"), "INPUT_DRY_RUN");
        assert_eq!(input_variable("tag format"), "INPUT_TAG_FORMAT");
    }

    #[test]
    fn missing_input_reads_as_empty_string()
    {
        let inputs = Inputs::default();
        assert_eq!(inputs.get("branches"), "");
    }

    #[test]
    fn values_are_trimmed_by_default()
    {
        let inputs = Inputs::from_inputs([("tag_format", "  v${version}\n",),],);
        assert_eq!(inputs.get("tag_format"), "v${version}");
    }

    #[test]
    fn trimming_can_be_disabled()
    {
        let inputs = Inputs::from_inputs([("extends", " foo \n",),],);
        let raw = inputs.get_with(
            "extends",
            InputOptions {
                trim_whitespace: false,
            },
        );
        assert_eq!(raw, " foo \n");
    }

    #[test]
    fn raw_variables_are_available()
    {
        let inputs = Inputs::from_vars([("RUNNER_DEBUG", "1",),],);
        assert_eq!(inputs.var("RUNNER_DEBUG"), Some("1"));
        assert_eq!(inputs.var("GITHUB_OUTPUT"), None);
    }
}
