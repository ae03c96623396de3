//! List command implementation

use super::{Command, CommandContext};
use anyhow::{Context, Result, anyhow};
use bitbucket_api::RequestOptions;
use serde_json::Value;

/// Walks a paginated endpoint and prints one JSON document per item
pub struct ListCommand {
    /// API path below the versioned root, or an absolute URL
    pub path: String,
    pub params: Vec<(String, String)>,
    /// Stop after this many items
    pub limit: Option<usize>,
}

/// Parse a `key=value` command line argument
pub fn parse_param(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid parameter '{raw}': expected key=value"))?;

    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Invalid parameter '{raw}': key cannot be empty");
    }

    Ok((key.to_string(), value.to_string()))
}

impl ListCommand {
    fn options(&self) -> RequestOptions {
        self.params
            .iter()
            .fold(RequestOptions::new(), |options, (key, value)| {
                options.param(key.as_str(), value.as_str())
            })
    }
}

impl Command for ListCommand {
    fn execute(&self, context: &CommandContext) -> Result<()> {
        let client = context.client()?;

        let address = if self.path.starts_with("http://") || self.path.starts_with("https://") {
            self.path.clone()
        } else {
            client.api_url(&self.path)
        };

        let items = client
            .iter_get::<Value>(&address, self.options())
            .take(self.limit.unwrap_or(usize::MAX));

        let mut count = 0usize;
        for item in items {
            let item = item.with_context(|| format!("Failed to list '{}'", self.path))?;
            println!("{}", serde_json::to_string(&item)?);
            count += 1;
        }

        tracing::info!(path = %self.path, count, "listed items");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("state=OPEN").unwrap(),
            ("state".to_string(), "OPEN".to_string())
        );
        assert_eq!(
            parse_param("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_param("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_param_rejects_invalid() {
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=value").is_err());
    }

    #[test]
    fn test_options_from_params() {
        let command = ListCommand {
            path: "projects".to_string(),
            params: vec![
                ("limit".to_string(), "25".to_string()),
                ("name".to_string(), "api".to_string()),
            ],
            limit: None,
        };
        let options = command.options();
        assert_eq!(options.params["limit"], "25");
        assert_eq!(options.params["name"], "api");
    }
}
