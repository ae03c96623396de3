//! Pull request command implementation

use super::{Command, CommandContext};
use anyhow::{Context, Result};
use bitbucket_api::PullRequestParams;
use colored::*;
use serde_json::Value;

/// Pull request command for opening a PR between two branches
pub struct PrCommand {
    pub project: String,
    pub repository: String,
    pub source_branch: String,
    pub target_branch: String,
    pub title: String,
    pub description: String,
}

impl PrCommand {
    fn params(&self) -> PullRequestParams<'_> {
        PullRequestParams::new(
            &self.project,
            &self.repository,
            &self.source_branch,
            &self.target_branch,
            &self.title,
            &self.description,
        )
    }
}

/// Link to the pull request web page, if the response carries one
pub fn pull_request_link(response: &Value) -> Option<&str> {
    response["links"]["self"]
        .as_array()
        .and_then(|links| links.first())
        .and_then(|link| link["href"].as_str())
}

impl Command for PrCommand {
    fn execute(&self, context: &CommandContext) -> Result<()> {
        let client = context.client()?;

        println!(
            "{} | {}",
            format!("{}/{}", self.project, self.repository).cyan().bold(),
            format!(
                "Creating pull request {} -> {}",
                self.source_branch, self.target_branch
            )
            .green()
        );

        let response = client
            .create_pull_request(self.params())
            .with_context(|| {
                format!(
                    "Failed to create pull request in {}/{}",
                    self.project, self.repository
                )
            })?;

        let id = match &response["id"] {
            Value::Null => "?".to_string(),
            id => id.to_string(),
        };
        match pull_request_link(&response) {
            Some(link) => println!("{} #{} {}", "Pull request created:".green(), id, link),
            None => println!("{} #{}", "Pull request created:".green(), id),
        }

        client.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pull_request_link() {
        let response = json!({
            "id": 7,
            "links": {"self": [{"href": "https://host/projects/P/repos/R/pull-requests/7"}]}
        });
        assert_eq!(
            pull_request_link(&response),
            Some("https://host/projects/P/repos/R/pull-requests/7")
        );
        assert_eq!(pull_request_link(&json!({"id": 7})), None);
    }

    #[test]
    fn test_params_mapping() {
        let command = PrCommand {
            project: "P".to_string(),
            repository: "R".to_string(),
            source_branch: "feat".to_string(),
            target_branch: "main".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
        };
        let params = command.params();
        assert_eq!(params.project, "P");
        assert_eq!(params.repository, "R");
        assert_eq!(params.source_branch, "feat");
        assert_eq!(params.target_branch, "main");
        assert_eq!(params.title, "t");
        assert_eq!(params.description, "d");
    }
}
