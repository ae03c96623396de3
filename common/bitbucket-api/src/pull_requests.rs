//! Pull request operations

use crate::client::BitbucketClient;
use crate::error::Result;
use crate::request::{RequestOptions, decode};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Debug, PartialEq)]
struct ProjectRef<'a> {
    key: &'a str,
}

#[derive(Serialize, Debug, PartialEq)]
struct RepositoryRef<'a> {
    name: &'a str,
    project: ProjectRef<'a>,
    slug: &'a str,
}

#[derive(Serialize, Debug, PartialEq)]
struct BranchRef<'a> {
    id: String,
    repository: RepositoryRef<'a>,
}

impl<'a> BranchRef<'a> {
    fn new(project: &'a str, repository: &'a str, branch: &str) -> Self {
        Self {
            id: format!("refs/heads/{branch}"),
            repository: RepositoryRef {
                name: "null",
                project: ProjectRef { key: project },
                slug: repository,
            },
        }
    }
}

// Flags are string literals on the wire.
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePullRequestPayload<'a> {
    description: &'a str,
    closed: &'static str,
    from_ref: BranchRef<'a>,
    state: &'static str,
    title: &'a str,
    locked: &'static str,
    reviewers: Vec<Value>,
    open: &'static str,
    to_ref: BranchRef<'a>,
}

impl<'a> CreatePullRequestPayload<'a> {
    pub(crate) fn new(params: &PullRequestParams<'a>) -> Self {
        Self {
            description: params.description,
            closed: "False",
            from_ref: BranchRef::new(params.project, params.repository, params.source_branch),
            state: "OPEN",
            title: params.title,
            locked: "False",
            reviewers: Vec::new(),
            open: "True",
            to_ref: BranchRef::new(params.project, params.repository, params.target_branch),
        }
    }
}

/// Parameters for creating a pull request
#[derive(Debug, Clone)]
pub struct PullRequestParams<'a> {
    pub project: &'a str,
    pub repository: &'a str,
    pub source_branch: &'a str,
    pub target_branch: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

impl<'a> PullRequestParams<'a> {
    pub fn new(
        project: &'a str,
        repository: &'a str,
        source_branch: &'a str,
        target_branch: &'a str,
        title: &'a str,
        description: &'a str,
    ) -> Self {
        Self {
            project,
            repository,
            source_branch,
            target_branch,
            title,
            description,
        }
    }
}

impl BitbucketClient {
    /// Create an open pull request from `source_branch` into `target_branch`
    ///
    /// # Returns
    /// The JSON document returned by the server, unmodified
    ///
    /// # Errors
    /// Any error from the request is returned unchanged; nothing is retried.
    pub fn create_pull_request(&self, params: PullRequestParams<'_>) -> Result<Value> {
        let url = self.api_url(&format!(
            "projects/{}/repos/{}/pull-requests",
            params.project, params.repository
        ));

        let payload = serde_json::to_value(CreatePullRequestPayload::new(&params))?;

        tracing::debug!(
            project = params.project,
            repository = params.repository,
            from = params.source_branch,
            to = params.target_branch,
            "creating pull request"
        );
        let response = self.post(&url, Some(payload), RequestOptions::default())?;
        decode(response)
    }
}
