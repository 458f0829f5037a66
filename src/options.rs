// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Translation of action inputs into semantic-release options.
//!
//! Each `resolve_*` function reads its own inputs and returns a fragment whose
//! fields are all optional. A missing or empty input always yields a fragment
//! with no keys so semantic-release keeps its own defaults; fragments never
//! share keys, which lets [`ReleaseConfig`] merge them by flattening.
//!
//! Translation is total: malformed values degrade to a literal interpretation
//! instead of failing the run, and well-formed JSON is never rewritten.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    inputs::{self, Inputs},
    shorthand::parse_references,
};

/// Prerelease setting of a release branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(untagged)]
pub enum Prerelease
{
    /// `true` uses the branch name as prerelease identifier.
    Flag(bool,),
    /// Explicit prerelease identifier template.
    Identifier(String,),
}

/// Detailed release branch description.
///
/// Only a JSON record decodes into this type. Keys other than the known ones
/// are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct BranchSpec
{
    /// Branch name or glob.
    pub name:       String,
    /// Marks the branch as a prerelease branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<Prerelease,>,
    /// Distribution channel for releases from this branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel:    Option<String,>,
    /// Version range allowed on maintenance branches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range:      Option<String,>,
    /// Remaining keys of the record.
    #[serde(flatten)]
    pub extra:      Map<String, Value,>,
}

/// A release branch given either by name or by a detailed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(untagged)]
pub enum BranchConfig
{
    /// Bare branch name.
    Name(String,),
    /// Record form.
    Detailed(BranchSpec,),
}

/// Value of the `branches` option.
///
/// Variants are tried in order: a sequence first, then a single branch. Any
/// other JSON value is kept as [`Branches::Raw`] and passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(untagged)]
pub enum Branches
{
    /// Ordered branches; order defines release channel precedence.
    Many(Vec<BranchConfig,>,),
    /// A single branch.
    One(BranchConfig,),
    /// JSON that does not fit the typed shapes, kept verbatim.
    Raw(Value,),
}

impl Branches
{
    fn from_value(value: Value,) -> Self
    {
        serde_json::from_value(value.clone(),).unwrap_or(Self::Raw(value,),)
    }

    fn literal(name: &str,) -> Self
    {
        Self::One(BranchConfig::Name(name.to_owned(),),)
    }
}

/// Fragment carrying the `branches` option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
pub struct BranchOption
{
    /// Release branches override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Branches,>,
}

/// Fragment carrying the `dryRun` option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize,)]
pub struct DryRunOption
{
    /// Skip publishing when `true`.
    #[serde(rename = "dryRun", skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool,>,
}

/// Fragment carrying the `ci` and `noCI` options.
///
/// Both fields are either set together, with `no_ci == !ci`, or both unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize,)]
pub struct CiOption
{
    /// Enforce CI environment verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci:    Option<bool,>,
    /// Negation of `ci`, kept for older semantic-release versions.
    #[serde(rename = "noCI", skip_serializing_if = "Option::is_none")]
    pub no_ci: Option<bool,>,
}

/// Fragment carrying the `extends` option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
pub struct ExtendsOption
{
    /// Bare shareable configuration module identifiers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String,>,>,
}

/// Fragment carrying the `tagFormat` option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
pub struct TagFormatOption
{
    /// Git tag template.
    #[serde(rename = "tagFormat", skip_serializing_if = "Option::is_none")]
    pub tag_format: Option<String,>,
}

/// Fragment carrying the repository `url` option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
pub struct RepositoryUrlOption
{
    /// Repository URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String,>,
}

/// Union of every option fragment, serialized as the options object passed to
/// semantic-release.
///
/// # Examples
///
/// ```
/// use semrel_action::{Inputs, ReleaseConfig};
///
/// let inputs = Inputs::from_inputs([("branch", "main",), ("dry_run", "false",),],);
/// let config = ReleaseConfig::from_inputs(&inputs,);
/// let json = serde_json::to_string(&config,)?;
/// assert_eq!(json, r#"{"branches":"main","dryRun":false}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
pub struct ReleaseConfig
{
    /// Branches fragment.
    #[serde(flatten)]
    pub branches:       BranchOption,
    /// Dry-run fragment.
    #[serde(flatten)]
    pub dry_run:        DryRunOption,
    /// CI fragment.
    #[serde(flatten)]
    pub ci:             CiOption,
    /// Extends fragment.
    #[serde(flatten)]
    pub extends:        ExtendsOption,
    /// Tag format fragment.
    #[serde(flatten)]
    pub tag_format:     TagFormatOption,
    /// Repository URL fragment.
    #[serde(flatten)]
    pub repository_url: RepositoryUrlOption,
}

impl ReleaseConfig
{
    /// Runs every translator against the same inputs.
    pub fn from_inputs(inputs: &Inputs,) -> Self
    {
        Self {
            branches:       resolve_branches_option(inputs,),
            dry_run:        resolve_dry_run_option(inputs,),
            ci:             resolve_ci_option(inputs,),
            extends:        resolve_extends_option(inputs,),
            tag_format:     resolve_tag_format_option(inputs,),
            repository_url: resolve_repository_url_option(inputs,),
        }
    }
}

/// Resolves `branches`, preferring the plural input over `branch`.
pub fn resolve_branches_option(inputs: &Inputs,) -> BranchOption
{
    let branches = inputs.get(inputs::BRANCHES,);
    let branch = inputs.get(inputs::BRANCH,);

    debug!("branches input: {branches}");
    debug!("branch input: {branch}");

    let winner = if branches.is_empty() { branch } else { branches };
    if winner.is_empty() {
        return BranchOption::default();
    }

    BranchOption {
        branches: Some(parse_json(&winner,),),
    }
}

/// Resolves `dryRun`; any non-empty value other than `"true"` disables it.
pub fn resolve_dry_run_option(inputs: &Inputs,) -> DryRunOption
{
    let dry_run = inputs.get(inputs::DRY_RUN,);
    debug!("dry_run input: {}", if dry_run.is_empty() { "unset" } else { dry_run.as_str() });

    if dry_run.is_empty() {
        return DryRunOption::default();
    }

    DryRunOption {
        dry_run: Some(dry_run == "true",),
    }
}

/// Resolves `ci` together with its `noCI` negation.
pub fn resolve_ci_option(inputs: &Inputs,) -> CiOption
{
    let ci = inputs.get(inputs::CI,);
    debug!("ci input: {}", if ci.is_empty() { "unset" } else { ci.as_str() });

    if ci.is_empty() {
        return CiOption::default();
    }

    let enabled = ci == "true";
    CiOption {
        ci:    Some(enabled,),
        no_ci: Some(!enabled,),
    }
}

/// Resolves `extends` from newline separated shareable config references.
///
/// # Examples
///
/// ```
/// use semrel_action::{Inputs, resolve_extends_option};
///
/// let inputs = Inputs::from_inputs([("extends", "github:@scope/config@v2\nother#main",),],);
/// let option = resolve_extends_option(&inputs,);
/// assert_eq!(option.extends, Some(vec!["@scope/config".to_owned(), "other".to_owned()]));
/// ```
pub fn resolve_extends_option(inputs: &Inputs,) -> ExtendsOption
{
    let extends = inputs.get(inputs::EXTENDS,);
    debug!("extends input raw:\n{extends}");

    if extends.is_empty() {
        return ExtendsOption::default();
    }

    let modules = parse_references(&extends,);
    debug!("extends modules: {modules:?}");

    ExtendsOption {
        extends: Some(modules,),
    }
}

/// Resolves `tagFormat` verbatim.
pub fn resolve_tag_format_option(inputs: &Inputs,) -> TagFormatOption
{
    let tag_format = inputs.get(inputs::TAG_FORMAT,);
    debug!("tag_format input: {tag_format}");

    TagFormatOption {
        tag_format: non_empty(tag_format,),
    }
}

/// Resolves the repository `url` verbatim.
pub fn resolve_repository_url_option(inputs: &Inputs,) -> RepositoryUrlOption
{
    let repository_url = inputs.get(inputs::REPOSITORY_URL,);
    debug!("repository_url input: {repository_url}");

    RepositoryUrlOption {
        url: non_empty(repository_url,),
    }
}

/// Parses branch configuration given as JSON, double-encoded JSON or a bare
/// name.
///
/// A JSON string is decoded once more, so `"\"[\\\"main\\\"]\""` yields the
/// array. Exactly one extra level is unwrapped. Input that is not JSON falls
/// back to the string it came from; any other JSON value is kept as parsed.
///
/// # Examples
///
/// ```
/// use semrel_action::{BranchConfig, Branches, parse_json};
///
/// assert_eq!(parse_json("main"), Branches::One(BranchConfig::Name("main".to_owned())));
/// assert_eq!(
///     parse_json(r#"["main"]"#),
///     Branches::Many(vec![BranchConfig::Name("main".to_owned())])
/// );
/// ```
pub fn parse_json(raw: &str,) -> Branches
{
    match serde_json::from_str::<Value,>(raw,) {
        Ok(Value::String(inner,),) => match serde_json::from_str::<Value,>(&inner,) {
            Ok(value,) => Branches::from_value(value,),
            Err(_,) => Branches::literal(&inner,),
        },
        Ok(value,) => Branches::from_value(value,),
        Err(_,) => Branches::literal(raw,),
    }
}

fn non_empty(value: String,) -> Option<String,>
{
    if value.is_empty() { None } else { Some(value,) }
}
