// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Action outputs and the writers that publish them.
///
/// Outputs are appended to the file named by `GITHUB_OUTPUT` using the
/// runner's `name<<delimiter` block syntax. Runners that predate the file
/// protocol receive the legacy `::set-output` workflow command instead.
use std::{
    collections::BTreeMap,
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::error::{Error, io_error};

/// Version of the previous release.
pub const LAST_RELEASE_VERSION: &str = "last_release_version";
/// Commit of the previous release.
pub const LAST_RELEASE_GIT_HEAD: &str = "last_release_git_head";
/// Tag of the previous release.
pub const LAST_RELEASE_GIT_TAG: &str = "last_release_git_tag";
/// `"true"` when a release was published, `"false"` otherwise.
pub const NEW_RELEASE_PUBLISHED: &str = "new_release_published";
/// Version of the published release.
pub const NEW_RELEASE_VERSION: &str = "new_release_version";
/// Major component of the published version.
pub const NEW_RELEASE_MAJOR_VERSION: &str = "new_release_major_version";
/// Minor component of the published version.
pub const NEW_RELEASE_MINOR_VERSION: &str = "new_release_minor_version";
/// Patch component of the published version.
pub const NEW_RELEASE_PATCH_VERSION: &str = "new_release_patch_version";
/// Distribution channel of the published release.
pub const NEW_RELEASE_CHANNEL: &str = "new_release_channel";
/// Release notes of the published release.
pub const NEW_RELEASE_NOTES: &str = "new_release_notes";
/// Commit of the published release.
pub const NEW_RELEASE_GIT_HEAD: &str = "new_release_git_head";
/// Tag of the published release.
pub const NEW_RELEASE_GIT_TAG: &str = "new_release_git_tag";

/// Destination for named action outputs.
pub trait OutputSink
{
    /// Publishes a single output value.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] when the value cannot be written.
    fn set_output(&mut self, name: &str, value: &str,) -> Result<(), Error,>;
}

impl OutputSink for BTreeMap<String, String,>
{
    fn set_output(&mut self, name: &str, value: &str,) -> Result<(), Error,>
    {
        self.insert(name.to_owned(), value.to_owned(),);
        Ok((),)
    }
}

/// Writes outputs for the Actions runner.
#[derive(Debug, Clone,)]
pub enum GithubOutput
{
    /// Appends blocks to the `GITHUB_OUTPUT` file.
    File(PathBuf,),
    /// Prints `::set-output` commands to stdout.
    Command,
}

impl GithubOutput
{
    /// Selects the file protocol when `GITHUB_OUTPUT` names a file.
    pub fn new(path: Option<PathBuf,>,) -> Self
    {
        match path {
            Some(path,) if !path.as_os_str().is_empty() => Self::File(path,),
            _ => Self::Command,
        }
    }
}

impl OutputSink for GithubOutput
{
    fn set_output(&mut self, name: &str, value: &str,) -> Result<(), Error,>
    {
        match &*self {
            Self::File(path,) => {
                let block = file_command(name, value, &delimiter(),)?;
                let mut file = OpenOptions::new()
                    .create(true,)
                    .append(true,)
                    .open(path,)
                    .map_err(|source| io_error(path, source,),)?;
                file.write_all(block.as_bytes(),).map_err(|source| io_error(path, source,),)
            }
            Self::Command => {
                println!("{}", set_output_command(name, value,));
                Ok((),)
            }
        }
    }
}

fn delimiter() -> String
{
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH,).map(|d| d.as_nanos(),).unwrap_or_default();
    format!("ghadelimiter_{}_{nanos}", std::process::id())
}

/// Formats one output block for the `GITHUB_OUTPUT` file.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the delimiter occurs in the name or the
/// value, since the runner would split the block there.
pub fn file_command(name: &str, value: &str, delimiter: &str,) -> Result<String, Error,>
{
    if name.contains(delimiter,) {
        return Err(Error::validation(format!(
            "output name must not contain the delimiter {delimiter}"
        ),),);
    }
    if value.contains(delimiter,) {
        return Err(Error::validation(format!(
            "output value must not contain the delimiter {delimiter}"
        ),),);
    }

    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"),)
}

/// Formats the legacy `::set-output` workflow command.
pub fn set_output_command(name: &str, value: &str,) -> String
{
    let escaped_name = escape_property(name,);
    let escaped_value = escape_data(value,);
    format!("::set-output name={escaped_name}::{escaped_value}")
}

fn escape_data(value: &str,) -> String
{
    value.replace('%', "%25",).replace('\r', "%0D",).replace('\n', "%0A",)
}

fn escape_property(value: &str,) -> String
{
    escape_data(value,).replace(':', "%3A",).replace(',', "%2C",)
}

#[cfg(test)]
mod tests
{
    use std::{collections::BTreeMap, fs};

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn file_command_wraps_value_in_delimiters()
    {
        let block = file_command("new_release_notes", "line one\nline two", "EOF",)
            .expect("expected valid block",);
        assert_eq!(block, "new_release_notes<<EOF\nline one\nline two\nEOF\n");
    }

    #[test]
    fn file_command_rejects_delimiter_in_value()
    {
        let error = file_command("notes", "oops EOF", "EOF",).expect_err("expected rejection",);
        match error {
            Error::Validation {
                message,
            } => assert!(message.contains("value")),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn legacy_command_escapes_newlines_and_percent()
    {
        assert_eq!(
            set_output_command("new_release_notes", "100%\r\ndone",),
            "::set-output name=new_release_notes::100%25%0D%0Adone"
        );
        assert_eq!(set_output_command("a:b,c", "v",), "::set-output name=a%3Ab%2Cc::v");
    }

    #[test]
    fn github_output_appends_blocks_to_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("output",);
        let mut sink = GithubOutput::new(Some(path.clone(),),);

        sink.set_output(NEW_RELEASE_PUBLISHED, "false",).expect("first write",);
        sink.set_output(NEW_RELEASE_VERSION, "1.2.3",).expect("second write",);

        let written = fs::read_to_string(&path,).expect("failed to read output file",);
        let lines: Vec<&str,> = written.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("new_release_published<<ghadelimiter_"));
        assert_eq!(lines[1], "false");
        assert!(lines[3].starts_with("new_release_version<<ghadelimiter_"));
        assert_eq!(lines[4], "1.2.3");
    }

    #[test]
    fn empty_output_path_selects_command_protocol()
    {
        assert!(matches!(GithubOutput::new(Some(PathBuf::new()),), GithubOutput::Command));
        assert!(matches!(GithubOutput::new(None), GithubOutput::Command));
    }

    #[test]
    fn map_sink_overwrites_previous_value()
    {
        let mut sink: BTreeMap<String, String,> = BTreeMap::new();
        sink.set_output(NEW_RELEASE_PUBLISHED, "false",).expect("insert",);
        sink.set_output(NEW_RELEASE_PUBLISHED, "true",).expect("overwrite",);
        assert_eq!(sink.get(NEW_RELEASE_PUBLISHED).map(String::as_str), Some("true"));
    }
}
