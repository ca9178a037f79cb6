//! Release-notes comment command implementation.
use log::*;
use std::time::Duration;

use crate::{
    cli,
    commenter::Commenter,
    error::{HeraldError, Result},
    forge::{
        config::DEFAULT_COMMENT_DELAY_MS,
        request::Release,
        traits::Forge,
        util,
    },
};

/// Execute the comment command against the configured remote.
pub async fn execute(args: &cli::Args) -> Result<()> {
    let remote = args.get_remote()?;
    let forge = remote.get_forge()?;

    run(forge.as_ref(), args).await
}

async fn run(forge: &dyn Forge, args: &cli::Args) -> Result<()> {
    let release = fetch_release(forge, &args.release_tag).await?;

    info!(
        "scanning notes for release {} of {}",
        release.tag,
        forge.remote_config().path
    );

    let numbers = util::parse_pr_references(&release.notes);

    if numbers.is_empty() {
        info!("no pull request references found in release notes");
    }

    let commenter = Commenter::new(
        release,
        &args.message,
        Duration::from_millis(DEFAULT_COMMENT_DELAY_MS),
    )?;

    let report = commenter.run(forge, &numbers).await;

    info!("commented on pull requests included in release:");
    for link in &report.links {
        println!("{link}");
    }

    if report.failures > 0 {
        return Err(HeraldError::CommentFailures(report.failures));
    }

    Ok(())
}

async fn fetch_release(forge: &dyn Forge, tag: &str) -> Result<Release> {
    if tag.is_empty() {
        forge.get_latest_release().await
    } else {
        forge.get_release_by_tag(tag).await
    }
}
