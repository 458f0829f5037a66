// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Invocation of semantic-release and decoding of its result.
///
/// semantic-release is a Node.js library, so the run goes through a small ES
/// module loader evaluated by `node`. The loader resolves the package from the
/// action directory, passes the serialized options and writes the JSON result
/// to a file handed over through the environment.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::{
    error::{Error, io_error},
    exec::{Invocation, run_command},
    options::ReleaseConfig,
};

/// Variable carrying the action directory semantic-release is resolved from.
pub const ROOT_VAR: &str = "SEMREL_ACTION_ROOT";
/// Variable carrying the serialized options.
pub const OPTIONS_VAR: &str = "SEMREL_ACTION_OPTIONS";
/// Variable carrying the path the result is written to.
pub const RESULT_VAR: &str = "SEMREL_ACTION_RESULT";

/// Name of the result file inside the private temporary directory.
const RESULT_FILE: &str = "result.json";

/// ES module evaluated by `node`. A falsy result (no release) is written as
/// `null`.
const LOADER: &str = r#"
import { createRequire } from 'node:module';
import { writeFile } from 'node:fs/promises';
import { join } from 'node:path';
import { pathToFileURL } from 'node:url';

const require = createRequire(join(process.env.SEMREL_ACTION_ROOT, 'package.json'));
const entry = pathToFileURL(require.resolve('semantic-release')).href;
const { default: semanticRelease } = await import(entry);
const result = await semanticRelease(JSON.parse(process.env.SEMREL_ACTION_OPTIONS));
await writeFile(process.env.SEMREL_ACTION_RESULT, JSON.stringify(result || null));
"#;

/// Previous release found by semantic-release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(default, rename_all = "camelCase")]
pub struct LastRelease
{
    /// Version of the previous release.
    pub version:  Option<String,>,
    /// Commit of the previous release.
    pub git_head: Option<String,>,
    /// Tag of the previous release.
    pub git_tag:  Option<String,>,
}

/// Release published by the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(default, rename_all = "camelCase")]
pub struct NextRelease
{
    /// Bump type (`major`, `minor`, `patch`, `prerelease`).
    #[serde(rename = "type")]
    pub release_type: Option<String,>,
    /// Published version.
    pub version:      String,
    /// Distribution channel, `None` for the default channel.
    pub channel:      Option<String,>,
    /// Generated release notes.
    pub notes:        Option<String,>,
    /// Released commit.
    pub git_head:     Option<String,>,
    /// Created tag.
    pub git_tag:      Option<String,>,
}

/// Release entry reported by a publish plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(default, rename_all = "camelCase")]
pub struct PublishedRelease
{
    /// Plugin that published the release.
    pub plugin_name: Option<String,>,
    /// Location of the published release, when the plugin reports one.
    pub url:         Option<String,>,
}

/// Structured result of a semantic-release run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize,)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaseResult
{
    /// Previous release.
    pub last_release: LastRelease,
    /// Commits included in the release.
    pub commits:      Vec<Value,>,
    /// Release published by this run, if any.
    pub next_release: Option<NextRelease,>,
    /// Releases reported by publish plugins.
    pub releases:     Vec<PublishedRelease,>,
}

/// Decodes the loader output; `null` means no release happened.
///
/// # Errors
///
/// Returns [`Error::Serialize`] when the payload is not a valid result.
pub fn decode_result(payload: &str,) -> Result<Option<ReleaseResult,>, Error,>
{
    Ok(serde_json::from_str(payload,)?,)
}

/// Creates a private directory, readable only by the current user, that
/// receives the loader output.
fn result_dir() -> Result<TempDir, Error,>
{
    tempfile::Builder::new()
        .prefix("semrel-action-",)
        .tempdir()
        .map_err(|source| io_error(&std::env::temp_dir(), source,),)
}

async fn read_result(path: &Path,) -> Result<String, Error,>
{
    tokio::fs::read_to_string(path,).await.map_err(|source| io_error(path, source,),)
}

/// Runs semantic-release with merged options.
#[derive(Debug, Clone,)]
pub struct ReleaseRunner
{
    action_dir:    PathBuf,
    unset_gha_env: bool,
}

impl ReleaseRunner
{
    /// Creates a runner resolving semantic-release from `action_dir`.
    pub fn new(action_dir: impl Into<PathBuf,>, unset_gha_env: bool,) -> Self
    {
        Self {
            action_dir: action_dir.into(),
            unset_gha_env,
        }
    }

    /// Builds the `node` invocation for the given options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] when the options cannot be encoded.
    pub fn invocation(&self, config: &ReleaseConfig, result_path: &Path,) -> Result<Invocation, Error,>
    {
        let options = serde_json::to_string(config,)?;
        debug!("semantic-release options: {options}");

        let mut invocation = Invocation::new("node", ["--input-type=module", "--eval", LOADER],)
            .env(ROOT_VAR, self.action_dir.to_string_lossy(),)
            .env(OPTIONS_VAR, options,)
            .env(RESULT_VAR, result_path.to_string_lossy(),)
            .passthrough();

        if self.unset_gha_env {
            debug!("unsetting GITHUB_ACTIONS env variable");
            invocation = invocation.env_remove("GITHUB_ACTIONS",);
        }

        Ok(invocation,)
    }

    /// Runs semantic-release in the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Release`] when the run fails and [`Error::Io`] or
    /// [`Error::Serialize`] when its result cannot be read back.
    pub async fn run(&self, config: &ReleaseConfig,) -> Result<Option<ReleaseResult,>, Error,>
    {
        let directory = result_dir()?;
        let result_path = directory.path().join(RESULT_FILE,);
        let invocation = self.invocation(config, &result_path,)?;

        info!("running semantic-release");
        run_command(&invocation,).await.map_err(|error| Error::release(error.to_display_string(),),)?;

        let payload = read_result(&result_path,).await?;
        if let Err(error,) = directory.close() {
            debug!("failed to remove result directory: {error}");
        }

        decode_result(&payload,)
    }
}

#[cfg(test)]
mod tests
{
    use serde_json::json;

    use super::*;
    use crate::options::DryRunOption;

    #[test]
    fn null_payload_means_no_release()
    {
        assert_eq!(decode_result("null",).expect("valid payload",), None);
    }

    #[test]
    fn decodes_full_result()
    {
        let payload = json!({
            "lastRelease": {"version": "1.0.0", "gitHead": "abc", "gitTag": "v1.0.0", "channels": [null]},
            "commits": [{"hash": "def"}, {"hash": "ghi"}],
            "nextRelease": {
                "type": "minor",
                "version": "1.1.0",
                "channel": null,
                "notes": "## Features",
                "gitHead": "ghi",
                "gitTag": "v1.1.0",
                "name": "v1.1.0"
            },
            "releases": [{"pluginName": "@semantic-release/github", "url": "https://example.com"}]
        });

        let result = decode_result(&payload.to_string(),)
            .expect("valid payload",)
            .expect("release expected",);

        assert_eq!(result.last_release.version.as_deref(), Some("1.0.0"));
        assert_eq!(result.commits.len(), 2);
        let next = result.next_release.expect("next release",);
        assert_eq!(next.release_type.as_deref(), Some("minor"));
        assert_eq!(next.version, "1.1.0");
        assert_eq!(next.channel, None);
        assert_eq!(result.releases[0].plugin_name.as_deref(), Some("@semantic-release/github"));
    }

    #[test]
    fn empty_last_release_is_accepted()
    {
        let result = decode_result(r#"{"lastRelease": {}, "commits": [], "releases": []}"#,)
            .expect("valid payload",)
            .expect("result expected",);
        assert_eq!(result.last_release, LastRelease::default());
        assert!(result.next_release.is_none());
    }

    #[test]
    fn malformed_payload_is_an_error()
    {
        let error = decode_result("{",).expect_err("expected decode failure",);
        assert!(matches!(error, Error::Serialize { .. }));
    }

    #[test]
    fn invocation_passes_options_and_paths()
    {
        let runner = ReleaseRunner::new("/action", false,);
        let config = ReleaseConfig {
            dry_run: DryRunOption {
                dry_run: Some(true,),
            },
            ..ReleaseConfig::default()
        };

        let invocation = runner
            .invocation(&config, Path::new("/tmp/result.json",),)
            .expect("options serialize",);

        assert_eq!(invocation.program, "node");
        assert_eq!(invocation.args[0], "--input-type=module");
        assert!(invocation.envs.contains(&(ROOT_VAR.to_owned(), "/action".to_owned())));
        assert!(invocation.envs.contains(&(OPTIONS_VAR.to_owned(), r#"{"dryRun":true}"#.to_owned())));
        assert!(invocation.envs.contains(&(RESULT_VAR.to_owned(), "/tmp/result.json".to_owned())));
        assert!(invocation.env_remove.is_empty());
        assert!(invocation.passthrough);
    }

    #[test]
    fn unset_gha_env_removes_variable_from_child_only()
    {
        let runner = ReleaseRunner::new("/action", true,);
        let invocation = runner
            .invocation(&ReleaseConfig::default(), Path::new("/tmp/result.json",),)
            .expect("options serialize",);

        assert_eq!(invocation.env_remove, vec!["GITHUB_ACTIONS".to_owned()]);
    }

    #[test]
    fn result_directories_are_unique_and_removed()
    {
        let first = result_dir().expect("first directory",);
        let second = result_dir().expect("second directory",);
        assert_ne!(first.path(), second.path());

        let path = first.path().to_path_buf();
        let name = path.file_name().and_then(|name| name.to_str(),).expect("utf-8 name",);
        assert!(name.starts_with("semrel-action-"));
        first.close().expect("directory removed",);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn result_is_read_back_from_directory()
    {
        let dir = result_dir().expect("result directory",);
        let path = dir.path().join(RESULT_FILE,);
        std::fs::write(&path, "null",).expect("write result",);

        let payload = read_result(&path,).await.expect("read result",);
        assert_eq!(decode_result(&payload,).expect("valid payload",), None);
    }

    #[tokio::test]
    async fn missing_result_is_an_io_error()
    {
        let dir = result_dir().expect("result directory",);
        let error = read_result(&dir.path().join(RESULT_FILE,),).await.expect_err("expected missing file",);
        assert!(matches!(error, Error::Io { .. }));
    }
}
