use anyhow::{anyhow, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const WEB_BASE: &str = "https://github.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    /// Accepts `owner/name`, an https URL or an ssh remote
    /// (`git@host:owner/name.git`).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let path = if input.starts_with("git@") {
            Self::ssh_path(input)?
        } else if let Some(rest) = input.split_once("://").map(|(_, rest)| rest) {
            rest.split_once('/')
                .map(|(_, path)| path.to_string())
                .ok_or_else(|| anyhow!("No repository path in URL: {}", input))?
        } else {
            input.to_string()
        };

        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(anyhow!(
                "Expected a repository as owner/name or URL, got {:?}",
                input
            )),
        }
    }

    fn ssh_path(ssh_url: &str) -> Result<String> {
        let re = Regex::new(r"^git@([^:]+):(.+)$")?;
        let captures = re
            .captures(ssh_url)
            .ok_or_else(|| anyhow!("Malformed ssh remote: {}", ssh_url))?;
        Ok(captures[2].to_string())
    }

    pub fn api_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.name
        )
    }

    pub fn web_url(&self) -> String {
        format!("{}/{}/{}", WEB_BASE, self.owner, self.name)
    }

    pub fn pulls_by_author_url(&self, login: &str) -> String {
        format!("{}/pulls?q=is%3Apr+author%3A{}", self.web_url(), login)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
