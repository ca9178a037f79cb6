//! Sequential comment dispatch for pull requests referenced in a release.
use log::*;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;

use crate::{
    error::{HeraldError, Result},
    forge::{
        request::{PullRequest, Release},
        traits::Forge,
    },
};

const COMMENT_TEMPLATE_NAME: &str = "comment";

/// Values exposed to the message template. Key names match the camelCase
/// placeholders documented for user-supplied templates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentContext<'a> {
    release_name: &'a str,
    release_tag: &'a str,
    release_url: &'a str,
    pull_request_title: &'a str,
    pull_request_url: &'a str,
    pull_request_number: u64,
}

/// Outcome of a single dispatch attempt.
#[derive(Debug)]
enum DispatchOutcome {
    /// Comment posted; carries the pull request's public URL.
    Posted { link: String },
    /// Fetching, rendering, or posting failed for this one reference.
    Failed { number: u64, error: HeraldError },
}

/// Aggregate result of a dispatch run.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// URLs of successfully commented pull requests, in processing order.
    pub links: Vec<String>,
    /// Count of references that failed to receive a comment.
    pub failures: u64,
}

/// Posts the rendered message template as a comment on each referenced
/// pull request, one at a time.
pub struct Commenter {
    template: tera::Tera,
    release: Release,
    delay: Duration,
}

impl Commenter {
    /// Compile the message template and prepare a dispatcher for the given
    /// release.
    pub fn new(
        release: Release,
        template: &str,
        delay: Duration,
    ) -> Result<Self> {
        // Compile template once before the loop to avoid per-item
        // template compilation
        let mut tera = tera::Tera::default();
        tera.add_raw_template(COMMENT_TEMPLATE_NAME, template)?;

        Ok(Self {
            template: tera,
            release,
            delay,
        })
    }

    /// Dispatch comments for each reference strictly sequentially, pausing
    /// the fixed delay before every call to stay under secondary rate
    /// limits. A failed reference never aborts the remaining dispatches.
    pub async fn run(
        &self,
        forge: &dyn Forge,
        numbers: &[u64],
    ) -> DispatchReport {
        let mut outcomes = vec![];

        for number in numbers {
            sleep(self.delay).await;
            outcomes.push(self.dispatch(forge, *number).await);
        }

        fold_outcomes(outcomes)
    }

    async fn dispatch(
        &self,
        forge: &dyn Forge,
        number: u64,
    ) -> DispatchOutcome {
        match self.comment_on_pr(forge, number).await {
            Ok(link) => DispatchOutcome::Posted { link },
            Err(error) => DispatchOutcome::Failed { number, error },
        }
    }

    async fn comment_on_pr(
        &self,
        forge: &dyn Forge,
        number: u64,
    ) -> Result<String> {
        let pr = forge.get_pull_request(number).await?;
        let message = self.render(&pr)?;

        forge.create_comment(number, &message).await?;

        Ok(pr.link)
    }

    fn render(&self, pr: &PullRequest) -> Result<String> {
        let context = tera::Context::from_serialize(CommentContext {
            release_name: &self.release.name,
            release_tag: &self.release.tag,
            release_url: &self.release.link,
            pull_request_title: &pr.title,
            pull_request_url: &pr.link,
            pull_request_number: pr.number,
        })?;

        Ok(self.template.render(COMMENT_TEMPLATE_NAME, &context)?)
    }
}

fn fold_outcomes(outcomes: Vec<DispatchOutcome>) -> DispatchReport {
    let mut report = DispatchReport::default();

    for outcome in outcomes {
        match outcome {
            DispatchOutcome::Posted { link } => report.links.push(link),
            DispatchOutcome::Failed { number, error } => {
                error!("failed to comment on #{number}: {error}");
                report.failures += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::traits::MockForge;
    use mockall::predicate::eq;

    fn test_release() -> Release {
        Release {
            tag: "v1.0".to_string(),
            name: "Release v1.0".to_string(),
            link: "http://x/r/1.0".to_string(),
            notes: "".to_string(),
        }
    }

    fn test_pr(number: u64) -> PullRequest {
        PullRequest {
            number,
            title: format!("change {number}"),
            link: format!("http://x/pr/{number}"),
        }
    }

    #[test_log::test(tokio::test)]
    async fn substitutes_release_placeholders() {
        let commenter = Commenter::new(
            test_release(),
            "This PR is included in [{{ releaseTag }}]({{ releaseUrl }})",
            Duration::ZERO,
        )
        .unwrap();

        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_pull_request()
            .with(eq(12u64))
            .times(1)
            .returning(|number| Ok(test_pr(number)));
        mock_forge
            .expect_create_comment()
            .withf(|number, body| {
                *number == 12
                    && body == "This PR is included in [v1.0](http://x/r/1.0)"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let report = commenter.run(&mock_forge, &[12]).await;

        assert_eq!(report.links, vec!["http://x/pr/12".to_string()]);
        assert_eq!(report.failures, 0);
    }

    #[test_log::test(tokio::test)]
    async fn substitutes_pull_request_placeholders() {
        let commenter = Commenter::new(
            test_release(),
            "{{ pullRequestNumber }}: {{ pullRequestTitle }}",
            Duration::ZERO,
        )
        .unwrap();

        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_pull_request()
            .returning(|number| Ok(test_pr(number)));
        mock_forge
            .expect_create_comment()
            .withf(|_, body| body == "8: change 8")
            .times(1)
            .returning(|_, _| Ok(()));

        let report = commenter.run(&mock_forge, &[8]).await;

        assert_eq!(report.failures, 0);
    }

    #[test_log::test(tokio::test)]
    async fn isolates_individual_failures() {
        let commenter = Commenter::new(
            test_release(),
            "{{ releaseTag }}",
            Duration::ZERO,
        )
        .unwrap();

        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_pull_request()
            .with(eq(5u64))
            .times(1)
            .returning(|_| Err(HeraldError::forge("simulated API error")));
        mock_forge
            .expect_get_pull_request()
            .with(eq(6u64))
            .times(1)
            .returning(|number| Ok(test_pr(number)));
        mock_forge
            .expect_create_comment()
            .withf(|number, _| *number == 6)
            .times(1)
            .returning(|_, _| Ok(()));

        let report = commenter.run(&mock_forge, &[5, 6]).await;

        assert_eq!(report.links, vec!["http://x/pr/6".to_string()]);
        assert_eq!(report.failures, 1);
    }

    #[test_log::test(tokio::test)]
    async fn records_links_in_processing_order() {
        let commenter = Commenter::new(
            test_release(),
            "{{ releaseTag }}",
            Duration::ZERO,
        )
        .unwrap();

        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_pull_request()
            .times(3)
            .returning(|number| Ok(test_pr(number)));
        mock_forge
            .expect_create_comment()
            .times(3)
            .returning(|_, _| Ok(()));

        let report = commenter.run(&mock_forge, &[7, 3, 9]).await;

        assert_eq!(
            report.links,
            vec![
                "http://x/pr/7".to_string(),
                "http://x/pr/3".to_string(),
                "http://x/pr/9".to_string(),
            ]
        );
        assert_eq!(report.failures, 0);
    }

    #[test_log::test(tokio::test)]
    async fn performs_zero_dispatches_for_empty_reference_list() {
        let commenter = Commenter::new(
            test_release(),
            "{{ releaseTag }}",
            Duration::ZERO,
        )
        .unwrap();

        let mut mock_forge = MockForge::new();
        mock_forge.expect_get_pull_request().times(0);
        mock_forge.expect_create_comment().times(0);

        let report = commenter.run(&mock_forge, &[]).await;

        assert!(report.links.is_empty());
        assert_eq!(report.failures, 0);
    }

    #[test_log::test(tokio::test)]
    async fn counts_render_failures_per_item() {
        // all six documented keys are always bound; anything else follows
        // tera's undefined-variable semantics and fails the item
        let commenter = Commenter::new(
            test_release(),
            "{{ somethingUndefined }}",
            Duration::ZERO,
        )
        .unwrap();

        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_pull_request()
            .times(1)
            .returning(|number| Ok(test_pr(number)));
        mock_forge.expect_create_comment().times(0);

        let report = commenter.run(&mock_forge, &[4]).await;

        assert!(report.links.is_empty());
        assert_eq!(report.failures, 1);
    }

    #[test_log::test(tokio::test)]
    async fn counts_comment_post_failures_per_item() {
        let commenter = Commenter::new(
            test_release(),
            "{{ releaseTag }}",
            Duration::ZERO,
        )
        .unwrap();

        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_get_pull_request()
            .times(1)
            .returning(|number| Ok(test_pr(number)));
        mock_forge
            .expect_create_comment()
            .times(1)
            .returning(|_, _| Err(HeraldError::forge("comment rejected")));

        let report = commenter.run(&mock_forge, &[2]).await;

        assert!(report.links.is_empty());
        assert_eq!(report.failures, 1);
    }

    #[test]
    fn rejects_invalid_template_syntax() {
        let result = Commenter::new(
            test_release(),
            "{{ unterminated",
            Duration::ZERO,
        );

        assert!(result.is_err());
    }
}
