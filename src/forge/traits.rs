//! Traits related to remote git forges
use async_trait::async_trait;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        request::{PullRequest, Release},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forge {
    fn remote_config(&self) -> RemoteConfig;
    async fn get_release_by_tag(&self, tag: &str) -> Result<Release>;
    async fn get_latest_release(&self) -> Result<Release>;
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest>;
    async fn create_comment(&self, number: u64, body: &str) -> Result<()>;
}
