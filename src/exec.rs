// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Execution of external programs (`npm`, `node`).
///
/// Commands run without a shell; arguments are passed verbatim.
use std::path::PathBuf;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, command_error};

/// Captured streams of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct CommandOutput
{
    /// Standard output decoded lossily as UTF-8.
    pub stdout: String,
    /// Standard error decoded lossily as UTF-8.
    pub stderr: String,
}

/// Description of a program invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct Invocation
{
    /// Program looked up on `PATH`.
    pub program:     String,
    /// Arguments passed verbatim.
    pub args:        Vec<String,>,
    /// Working directory; inherits the current one when `None`.
    pub cwd:         Option<PathBuf,>,
    /// Variables added to the child environment.
    pub envs:        Vec<(String, String,),>,
    /// Variables removed from the child environment.
    pub env_remove:  Vec<String,>,
    /// Let the child write directly to the parent's stdout and stderr.
    pub passthrough: bool,
}

impl Invocation
{
    /// Creates an invocation of `program` with `args`.
    pub fn new<P, I, A,>(program: P, args: I,) -> Self
    where
        P: Into<String,>,
        I: IntoIterator<Item = A,>,
        A: Into<String,>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into,).collect(),
            ..Self::default()
        }
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, cwd: impl Into<PathBuf,>,) -> Self
    {
        self.cwd = Some(cwd.into(),);
        self
    }

    /// Adds an environment variable for the child.
    pub fn env(mut self, key: impl Into<String,>, value: impl Into<String,>,) -> Self
    {
        self.envs.push((key.into(), value.into(),),);
        self
    }

    /// Removes an environment variable from the child.
    pub fn env_remove(mut self, key: impl Into<String,>,) -> Self
    {
        self.env_remove.push(key.into(),);
        self
    }

    /// Streams child output straight to the parent instead of capturing it.
    pub fn passthrough(mut self,) -> Self
    {
        self.passthrough = true;
        self
    }

    /// Program and arguments joined for logs and error messages.
    pub fn display(&self,) -> String
    {
        std::iter::once(self.program.as_str(),)
            .chain(self.args.iter().map(String::as_str,),)
            .collect::<Vec<_,>>()
            .join(" ",)
    }

    fn to_command(&self,) -> Command
    {
        let mut command = Command::new(&self.program,);
        command.args(&self.args,);
        if let Some(cwd,) = &self.cwd {
            command.current_dir(cwd,);
        }
        for (key, value,) in &self.envs {
            command.env(key, value,);
        }
        for key in &self.env_remove {
            command.env_remove(key,);
        }
        command
    }
}

/// Runs the invocation to completion.
///
/// # Errors
///
/// Returns [`Error::Command`] when the program cannot be spawned or exits with
/// a failure status; the message carries the captured stderr when available.
pub async fn run_command(invocation: &Invocation,) -> Result<CommandOutput, Error,>
{
    let command_line = invocation.display();
    debug!("running {command_line}");

    let mut command = invocation.to_command();

    if invocation.passthrough {
        let status = command
            .status()
            .await
            .map_err(|error| command_error(command_line.as_str(), error.to_string(),),)?;
        if !status.success() {
            return Err(command_error(command_line, status.to_string(),),);
        }
        return Ok(CommandOutput::default(),);
    }

    let output = command
        .output()
        .await
        .map_err(|error| command_error(command_line.as_str(), error.to_string(),),)?;

    let captured = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout,).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr,).trim().to_string(),
    };

    if !output.status.success() {
        let message =
            if captured.stderr.is_empty() { output.status.to_string() } else { captured.stderr };
        return Err(command_error(command_line, message,),);
    }

    Ok(captured,)
}
