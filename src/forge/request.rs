/// Release information returned from the forge.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    /// Tag the release was published under.
    pub tag: String,
    /// Display name of the release.
    pub name: String,
    /// Public URL of the release page.
    pub link: String,
    /// Free-text release notes body.
    pub notes: String,
}

/// Pull request information returned from the forge.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// Public URL of the pull request.
    pub link: String,
}
