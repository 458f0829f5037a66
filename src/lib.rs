//! Adapter between GitHub Actions inputs and semantic-release.
//!
//! The library translates string inputs into the structured options accepted
//! by semantic-release, runs the release through `node` and maps the result
//! back onto action outputs. Option translation is pure and total: every input
//! string yields a configuration fragment and an empty input never overrides
//! semantic-release defaults.

mod config;
mod error;
mod exec;
mod inputs;
mod logging;
mod options;
mod outputs;
mod release;
mod shorthand;
mod tasks;

pub use config::ActionSettings;
pub use error::{Error, command_error, io_error};
pub use exec::{CommandOutput, Invocation, run_command};
pub use inputs::{InputOptions, Inputs, input_variable};
pub use logging::init_tracing;
pub use options::{
    BranchConfig, BranchOption, BranchSpec, Branches, CiOption, DryRunOption, ExtendsOption,
    Prerelease, ReleaseConfig, RepositoryUrlOption, TagFormatOption, parse_json,
    resolve_branches_option, resolve_ci_option, resolve_dry_run_option, resolve_extends_option,
    resolve_repository_url_option, resolve_tag_format_option,
};
pub use outputs::{GithubOutput, OutputSink};
pub use release::{LastRelease, NextRelease, PublishedRelease, ReleaseResult, ReleaseRunner};
pub use shorthand::{parse_reference, parse_references};
pub use tasks::{
    cleanup_task, install_semantic_release_task, install_task, output_task,
    semantic_release_package, setup_task, version_components,
};

/// Names of the action inputs.
pub mod input_names {
    pub use crate::inputs::{
        BRANCH, BRANCHES, CI, DRY_RUN, EXTENDS, EXTRA_PLUGINS, REPOSITORY_URL, SEMANTIC_VERSION,
        TAG_FORMAT, UNSET_GHA_ENV, WORKING_DIRECTORY,
    };
}

/// Names of the action outputs.
pub mod output_names {
    pub use crate::outputs::{
        LAST_RELEASE_GIT_HEAD, LAST_RELEASE_GIT_TAG, LAST_RELEASE_VERSION, NEW_RELEASE_CHANNEL,
        NEW_RELEASE_GIT_HEAD, NEW_RELEASE_GIT_TAG, NEW_RELEASE_MAJOR_VERSION,
        NEW_RELEASE_MINOR_VERSION, NEW_RELEASE_NOTES, NEW_RELEASE_PATCH_VERSION,
        NEW_RELEASE_PUBLISHED, NEW_RELEASE_VERSION,
    };
}
