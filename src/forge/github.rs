//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;

use crate::{
    error::{HeraldError, Result},
    forge::{
        config::RemoteConfig,
        request::{PullRequest, Release},
        traits::Forge,
    },
};

/// GitHub forge implementation using Octocrab for API interactions with
/// releases, pull requests, and issue comments.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and
    /// API base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = format!("{}://api.{}", config.scheme, config.host);
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri)?;
        let instance = builder.build()?;

        Ok(Self { config, instance })
    }

    fn map_release(
        &self,
        release: octocrab::models::repos::Release,
    ) -> Release {
        Release {
            tag: release.tag_name,
            name: release.name.unwrap_or_default(),
            link: release.html_url.to_string(),
            notes: release.body.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn get_release_by_tag(&self, tag: &str) -> Result<Release> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .get_by_tag(tag)
            .await;

        match result {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                Err(HeraldError::release_not_found(format!(
                    "no release found for tag: {tag}"
                )))
            }
            Err(err) => Err(err.into()),
            Ok(release) => Ok(self.map_release(release)),
        }
    }

    async fn get_latest_release(&self) -> Result<Release> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .get_latest()
            .await;

        match result {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                Err(HeraldError::release_not_found(format!(
                    "no published releases for repo: {}",
                    self.config.path
                )))
            }
            Err(err) => Err(err.into()),
            Ok(release) => Ok(self.map_release(release)),
        }
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        // The issues endpoint resolves both pull requests and plain issues,
        // so issue references in release notes also work.
        let issue = self
            .instance
            .issues(&self.config.owner, &self.config.repo)
            .get(number)
            .await?;

        Ok(PullRequest {
            number: issue.number,
            title: issue.title,
            link: issue.html_url.to_string(),
        })
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<()> {
        debug!("posting comment on #{number}");

        self.instance
            .issues(&self.config.owner, &self.config.repo)
            .create_comment(number, body)
            .await?;

        Ok(())
    }
}
