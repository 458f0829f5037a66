// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Command-line interface for the semantic-release action binary.
//!
//! Without a subcommand the binary performs the full action run. The
//! `config` subcommand prints the options that would be passed to
//! semantic-release, which helps when debugging workflow inputs.

use std::{
    io,
    path::{Path, PathBuf},
    process,
};

use clap::{ArgAction, Args, Parser, Subcommand};
use semrel_action::{
    ActionSettings, Error, GithubOutput, Inputs, ReleaseConfig, ReleaseRunner, cleanup_task,
    init_tracing, install_semantic_release_task, install_task, io_error, output_task, setup_task,
};
use tracing::debug;

/// Command line interface for running semantic-release from action inputs.
#[derive(Debug, Parser,)]
#[command(name = "semrel-action", version, about = "Run semantic-release from GitHub Actions inputs")]
/// Top-level CLI options parsed from user input.
struct Cli
{
    #[command(subcommand)]
    command: Option<Command,>,

    /// Arguments of the default run.
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Install semantic-release, run it and publish the outputs.
    Run(RunArgs,),
    /// Print the semantic-release options derived from the inputs.
    Config(ConfigArgs,),
}

/// Arguments accepted by the release run.
#[derive(Debug, Args, Default, Clone,)]
struct RunArgs
{
    /// Directory semantic-release and plugins are installed into.
    #[arg(long = "action-dir", value_name = "DIR", env = "GITHUB_ACTION_PATH")]
    action_dir: Option<PathBuf,>,

    /// File receiving the action outputs.
    #[arg(long = "output-file", value_name = "PATH", env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf,>,
}

#[derive(Debug, Args,)]
struct ConfigArgs
{
    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    if let Err(error,) = run().await {
        println!("{}", error_annotation(&error.to_display_string(),));
        process::exit(1,);
    }
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates failures of the installation tasks, the release run and output
/// publishing.
async fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();
    let inputs = Inputs::from_env();
    let settings = ActionSettings::from_inputs(&inputs,);
    init_tracing(settings.runner_debug,);

    match cli.command {
        Some(Command::Run(args,),) => run_release(&args, &inputs, &settings,).await,
        Some(Command::Config(args,),) => run_config(&args, &inputs,),
        None => run_release(&cli.run, &inputs, &settings,).await,
    }
}

async fn run_release(args: &RunArgs, inputs: &Inputs, settings: &ActionSettings,) -> Result<(), Error,>
{
    debug!("initializing semantic-release action");

    let action_dir = resolve_action_dir(args.action_dir.as_deref(),)?;

    if let Some(directory,) = &settings.working_directory {
        std::env::set_current_dir(directory,).map_err(|source| io_error(directory, source,),)?;
    }

    let mut sink = GithubOutput::new(args.output_file.clone(),);
    setup_task(&mut sink, &action_dir,)?;

    let silent = !settings.runner_debug;
    install_semantic_release_task(&settings.semantic_version, &action_dir,).await?;
    install_task(&settings.extra_plugins, &action_dir, silent,).await?;
    install_task(&settings.extends, &action_dir, silent,).await?;

    let config = ReleaseConfig::from_inputs(inputs,);
    let result = ReleaseRunner::new(action_dir.clone(), settings.unset_gha_env,).run(&config,).await?;

    cleanup_task(Path::new(".",),).await?;
    output_task(result.as_ref(), &mut sink,)?;

    debug!("completed semantic-release action");
    Ok((),)
}

/// Makes the action directory absolute before the working directory changes.
fn resolve_action_dir(action_dir: Option<&Path,>,) -> Result<PathBuf, Error,>
{
    let cwd = std::env::current_dir().map_err(|source| io_error(Path::new(".",), source,),)?;
    Ok(match action_dir {
        Some(dir,) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir,) => cwd.join(dir,),
        None => cwd,
    },)
}

fn run_config(args: &ConfigArgs, inputs: &Inputs,) -> Result<(), Error,>
{
    let config = ReleaseConfig::from_inputs(inputs,);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_config(&mut handle, &config, args.pretty,)
}

fn write_config<W: io::Write,>(writer: &mut W, config: &ReleaseConfig, pretty: bool,) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, config,)?;
    } else {
        serde_json::to_writer(writer, config,)?;
    }

    Ok((),)
}

/// Formats the `::error::` workflow command that fails the step.
fn error_annotation(message: &str,) -> String
{
    let escaped = message.replace('%', "%25",).replace('\r', "%0D",).replace('\n', "%0A",);
    format!("::error::{escaped}")
}

#[cfg(test)]
mod tests
{
    use std::{io::Cursor, path::Path};

    use clap::Parser;
    use semrel_action::{Inputs, ReleaseConfig};

    use super::{Cli, Command, error_annotation, resolve_action_dir, write_config};

    #[test]
    fn cli_defaults_to_release_run()
    {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "--action-dir", "/opt/action",],)
            .expect("failed to parse CLI",);

        assert!(cli.command.is_none());
        assert_eq!(cli.run.action_dir.as_deref(), Some(Path::new("/opt/action")));
    }

    #[test]
    fn config_subcommand_accepts_pretty_flag()
    {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "config", "--pretty",],)
            .expect("failed to parse CLI",);

        match cli.command.expect("missing config command",) {
            Command::Config(args,) => assert!(args.pretty),
            other => panic!("unexpected command variant: {other:?}"),
        }
    }

    #[test]
    fn run_subcommand_accepts_output_file()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "run",
            "--output-file",
            "/tmp/github_output",
        ],)
        .expect("failed to parse CLI",);

        match cli.command.expect("missing run command",) {
            Command::Run(args,) => {
                assert_eq!(args.output_file.as_deref(), Some(Path::new("/tmp/github_output")));
            }
            other => panic!("unexpected command variant: {other:?}"),
        }
    }

    #[test]
    fn write_config_compact_and_pretty()
    {
        let inputs = Inputs::from_inputs([("branches", r#"["main"]"#,), ("ci", "false",),],);
        let config = ReleaseConfig::from_inputs(&inputs,);

        let mut compact = Cursor::new(Vec::new(),);
        write_config(&mut compact, &config, false,).expect("failed to serialize config",);
        let output = String::from_utf8(compact.into_inner(),).expect("invalid UTF-8",);
        assert_eq!(output, r#"{"branches":["main"],"ci":false,"noCI":true}"#);

        let mut pretty = Cursor::new(Vec::new(),);
        write_config(&mut pretty, &ReleaseConfig::default(), true,).expect("failed to serialize config",);
        let output = String::from_utf8(pretty.into_inner(),).expect("invalid UTF-8",);
        assert_eq!(output, "{}");
    }

    #[test]
    fn action_dir_is_made_absolute()
    {
        let absolute = resolve_action_dir(Some(Path::new("/opt/action",),),).expect("absolute path",);
        assert_eq!(absolute, Path::new("/opt/action"));

        let relative = resolve_action_dir(Some(Path::new("action",),),).expect("relative path",);
        assert!(relative.is_absolute());
        assert!(relative.ends_with("action"));

        let default = resolve_action_dir(None,).expect("current directory",);
        assert!(default.is_absolute());
    }

    #[test]
    fn error_annotation_escapes_line_breaks()
    {
        assert_eq!(error_annotation("failed\nbadly 100%"), "::error::failed%0Abadly 100%25");
    }
}
