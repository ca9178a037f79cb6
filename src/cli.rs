//! CLI argument parsing and forge connection configuration.
use clap::Parser;
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::env;

use crate::{
    error::{HeraldError, Result},
    forge::config::{Remote, RemoteConfig},
};

/// Message template used when none is supplied on the command line.
pub const DEFAULT_MESSAGE_TEMPLATE: &str =
    ":tada: This PR is included in [{{ releaseTag }}]({{ releaseUrl }}) :tada:";

/// CLI arguments for a comment run.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "")]
    /// GitHub repository URL (https://github.com/owner/repo).
    pub github_repo: String,

    #[arg(long, default_value = "")]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value = DEFAULT_MESSAGE_TEMPLATE)]
    /// Message template rendered as the comment on each pull request.
    pub message: String,

    #[arg(long, default_value = "")]
    /// Release tag to scan. Empty selects the latest published release.
    pub release_tag: String,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Configure remote repository connection from CLI arguments.
    pub fn get_remote(&self) -> Result<Remote> {
        if self.github_repo.is_empty() {
            return Err(HeraldError::invalid_args(
                "must configure a github repo",
            ));
        }

        get_github_remote(&self.github_repo, &self.github_token)
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(HeraldError::invalid_args(
            "only http and https schemes are supported for repo urls",
        )),
    }
}

/// Configure GitHub remote with URL parsing and token resolution.
fn get_github_remote(github_repo: &str, github_token: &str) -> Result<Remote> {
    let parsed = GitUrl::parse(github_repo)?;

    validate_scheme(parsed.scheme)?;

    let mut token = github_token.to_string();

    if token.is_empty()
        && let Some(parsed_token) = parsed.token
    {
        token = parsed_token;
    }

    if token.is_empty()
        && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
    {
        token = env_var_token;
    }

    if token.is_empty() {
        return Err(HeraldError::invalid_args("must set github token"));
    }

    let host = parsed.host.ok_or(HeraldError::invalid_args(
        "unable to parse host from github repo",
    ))?;

    let owner = parsed.owner.ok_or(HeraldError::invalid_args(
        "unable to parse owner from github repo",
    ))?;

    let project_path = parsed
        .path
        .strip_prefix("/")
        .ok_or(HeraldError::invalid_args("failed to process project path"))?
        .to_string();

    let remote_config = RemoteConfig {
        host,
        scheme: parsed.scheme.to_string(),
        owner,
        repo: parsed.name,
        path: project_path,
        token: SecretString::from(token),
    };

    Ok(Remote::Github(remote_config))
}
