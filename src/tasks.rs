// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Tasks surrounding the semantic-release run.
///
/// Setup seeds the outputs, the install tasks add semantic-release and extra
/// packages to the action directory through `npm`, cleanup removes the
/// `.npmrc` written by the npm plugin and the output task reports the result.
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use crate::{
    error::{Error, io_error},
    exec::{Invocation, run_command},
    outputs::{self, OutputSink},
    release::ReleaseResult,
};

/// Oldest semantic-release major honored when pinning a version.
const MINIMUM_PINNED_MAJOR: u64 = 16;

/// Seeds `new_release_published` with `false` and logs the directories in
/// use.
///
/// # Errors
///
/// Returns [`Error`] when the output cannot be written.
pub fn setup_task<S: OutputSink + ?Sized,>(sink: &mut S, action_dir: &Path,) -> Result<(), Error,>
{
    sink.set_output(outputs::NEW_RELEASE_PUBLISHED, "false",)?;
    debug!("workspace: {}", action_dir.display());
    match std::env::current_dir() {
        Ok(cwd,) => debug!("process.cwd: {}", cwd.display()),
        Err(error,) => debug!("process.cwd unavailable: {error}"),
    }
    Ok((),)
}

/// Package specification for the requested semantic-release version.
///
/// Majors below 16 are not supported and resolve to the latest release.
///
/// # Examples
///
/// ```
/// use semrel_action::semantic_release_package;
///
/// assert_eq!(semantic_release_package(""), "semantic-release");
/// assert_eq!(semantic_release_package("19.0.5"), "semantic-release@19.0.5");
/// assert_eq!(semantic_release_package("15"), "semantic-release");
/// ```
pub fn semantic_release_package(version: &str,) -> String
{
    let major = version.split('.',).next().unwrap_or_default();
    let unsupported = major.parse::<u64,>().is_ok_and(|major| major < MINIMUM_PINNED_MAJOR,);

    if version.is_empty() || unsupported {
        "semantic-release".to_owned()
    } else {
        format!("semantic-release@{version}")
    }
}

/// Splits a user supplied package list into `npm install` arguments.
///
/// Quotes are stripped and line breaks separate packages like spaces do.
/// Returns `None` when there is nothing to install.
pub fn install_arguments(packages: &str, silent: bool,) -> Option<Vec<String,>,>
{
    let cleaned: String = packages.chars().filter(|ch| !matches!(ch, '\'' | '"'),).collect();
    let names: Vec<&str,> = cleaned.split_whitespace().collect();
    if names.is_empty() {
        return None;
    }

    let mut args = Vec::with_capacity(names.len() + 3,);
    args.push("install".to_owned(),);
    args.extend(names.into_iter().map(str::to_owned,),);
    args.push("--no-audit".to_owned(),);
    if silent {
        args.push("--silent".to_owned(),);
    }
    Some(args,)
}

/// Installs semantic-release into the action directory.
///
/// # Errors
///
/// Returns [`Error::Command`] when `npm` fails.
pub async fn install_semantic_release_task(version: &str, action_dir: &Path,) -> Result<(), Error,>
{
    let package = semantic_release_package(version,);
    let invocation = Invocation::new("npm", ["install", package.as_str(), "--no-audit", "--silent"],)
        .current_dir(action_dir,);

    install(&invocation, &package,).await
}

/// Installs additional packages (plugins, shareable configurations) into the
/// action directory. Empty input is a no-op.
///
/// # Errors
///
/// Returns [`Error::Command`] when `npm` fails.
pub async fn install_task(packages: &str, action_dir: &Path, silent: bool,) -> Result<(), Error,>
{
    let Some(args,) = install_arguments(packages, silent,) else {
        return Ok((),);
    };

    let invocation = Invocation::new("npm", args,).current_dir(action_dir,);
    install(&invocation, packages.trim(),).await
}

async fn install(invocation: &Invocation, label: &str,) -> Result<(), Error,>
{
    let pb = ProgressBar::new_spinner();
    if let Ok(style,) = ProgressStyle::default_spinner().template("{spinner:.yellow} [{elapsed_precise}] {msg}",) {
        pb.set_style(style,);
    }
    pb.set_message(format!("Installing {label}..."),);

    let output = match run_command(invocation,).await {
        Ok(output,) => output,
        Err(error,) => {
            pb.abandon_with_message(format!("Failed to install {label}"),);
            return Err(error,);
        }
    };

    debug!("{}", output.stdout);
    if !output.stderr.is_empty() {
        error!("{}", output.stderr);
    }
    pb.finish_with_message(format!("Installed {label}"),);

    Ok((),)
}

/// Removes `.npmrc` from `directory` so registry credentials do not
/// outlive the run.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file exists but cannot be removed.
pub async fn cleanup_task(directory: &Path,) -> Result<(), Error,>
{
    let npmrc = directory.join(".npmrc",);
    match tokio::fs::remove_file(&npmrc,).await {
        Ok((),) => {
            debug!("removed {}", npmrc.display());
            Ok((),)
        }
        Err(source,) if source.kind() == std::io::ErrorKind::NotFound => Ok((),),
        Err(source,) => Err(io_error(&npmrc, source,),),
    }
}

/// Splits a version into major, minor and patch on `.`, `-` or whitespace.
///
/// Missing components are empty strings.
///
/// # Examples
///
/// ```
/// use semrel_action::version_components;
///
/// assert_eq!(version_components("2.0.0-beta.1"), ["2", "0", "0"]);
/// assert_eq!(version_components("3"), ["3", "", ""]);
/// ```
pub fn version_components(version: &str,) -> [&str; 3]
{
    let mut parts = version.split(|ch: char| ch == '.' || ch == '-' || ch.is_whitespace(),);
    [
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    ]
}

/// Reports the release result through `sink`.
///
/// # Errors
///
/// Returns [`Error`] when an output cannot be written.
pub fn output_task<S: OutputSink + ?Sized,>(
    result: Option<&ReleaseResult,>,
    sink: &mut S,
) -> Result<(), Error,>
{
    let Some(result,) = result else {
        debug!("no release published");
        return Ok((),);
    };

    let last = &result.last_release;
    if let Some(version,) = last.version.as_deref() {
        debug!("last release was \"{version}\"");
        sink.set_output(outputs::LAST_RELEASE_VERSION, version,)?;
        sink.set_output(outputs::LAST_RELEASE_GIT_HEAD, last.git_head.as_deref().unwrap_or_default(),)?;
        sink.set_output(outputs::LAST_RELEASE_GIT_TAG, last.git_tag.as_deref().unwrap_or_default(),)?;
    }

    let Some(next,) = result.next_release.as_ref() else {
        debug!("no release published");
        return Ok((),);
    };

    debug!(
        "published {} release version {} containing {} commits",
        next.release_type.as_deref().unwrap_or("unknown"),
        next.version,
        result.commits.len()
    );
    for release in &result.releases {
        debug!(
            "release was published with plugin \"{}\"",
            release.plugin_name.as_deref().unwrap_or("unknown")
        );
    }

    let [major, minor, patch,] = version_components(&next.version,);
    sink.set_output(outputs::NEW_RELEASE_PUBLISHED, "true",)?;
    sink.set_output(outputs::NEW_RELEASE_VERSION, &next.version,)?;
    sink.set_output(outputs::NEW_RELEASE_MAJOR_VERSION, major,)?;
    sink.set_output(outputs::NEW_RELEASE_MINOR_VERSION, minor,)?;
    sink.set_output(outputs::NEW_RELEASE_PATCH_VERSION, patch,)?;
    sink.set_output(outputs::NEW_RELEASE_CHANNEL, next.channel.as_deref().unwrap_or_default(),)?;
    sink.set_output(outputs::NEW_RELEASE_NOTES, next.notes.as_deref().unwrap_or_default(),)?;
    sink.set_output(outputs::NEW_RELEASE_GIT_HEAD, next.git_head.as_deref().unwrap_or_default(),)?;
    sink.set_output(outputs::NEW_RELEASE_GIT_TAG, next.git_tag.as_deref().unwrap_or_default(),)?;

    Ok((),)
}
