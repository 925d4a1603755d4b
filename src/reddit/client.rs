//! Reddit OAuth client.
//!
//! Script-app password-grant authentication plus paginated listing and
//! comment fetches. Every call is a plain blocking-style await; there is
//! no retry or fan-out.

use crate::config::Credentials;
use crate::reddit::things::{Comment, Listing, Post};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";

/// Reddit caps listing pages at 100 items.
const PAGE_LIMIT: u32 = 100;

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Hot,
    Top,
    New,
}

impl Sort {
    /// URL path segment for this sort.
    pub fn path(self) -> &'static str {
        match self {
            Sort::Hot => "hot",
            Sort::Top => "top",
            Sort::New => "new",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
}

/// An authenticated Reddit API client.
pub struct RedditClient {
    http: reqwest::Client,
    token: String,
}

impl RedditClient {
    /// Authenticate with the password grant and return a ready client.
    ///
    /// The bearer token is fetched once; runs are short enough that it
    /// never needs refreshing.
    pub async fn connect(credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(credentials.user_agent.clone())
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let params = [
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let response = http
            .post(TOKEN_URL)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow::anyhow!("Token request timed out after {}s", timeout.as_secs())
                } else if e.is_connect() {
                    anyhow::anyhow!("Cannot connect to {}", TOKEN_URL)
                } else {
                    anyhow::anyhow!("Token request failed: {}", e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Reddit token endpoint returned {}: {}", status, body);
        }

        let token: AccessToken = response
            .json()
            .await
            .context("Failed to parse token response")?;

        info!("Authenticated as u/{}", credentials.username);

        Ok(Self {
            http,
            token: token.access_token,
        })
    }

    /// Fetch up to `count` posts from a subreddit listing, following
    /// `after` cursors in pages of at most 100.
    pub async fn listing(&self, subreddit: &str, sort: Sort, count: u32) -> Result<Vec<Post>> {
        let url = format!("{API_BASE}/r/{subreddit}/{}", sort.path());
        let mut posts: Vec<Post> = Vec::new();
        let mut after: Option<String> = None;

        while (posts.len() as u32) < count {
            let limit = PAGE_LIMIT.min(count - posts.len() as u32);
            let mut query = vec![
                ("limit", limit.to_string()),
                ("raw_json", "1".to_string()),
            ];
            if let Some(ref cursor) = after {
                query.push(("after", cursor.clone()));
            }

            let page: Listing = self.get_json(&url, &query).await?;
            let batch = page
                .data
                .posts()
                .with_context(|| format!("Malformed {} listing for r/{}", sort, subreddit))?;
            if batch.is_empty() {
                break;
            }
            posts.extend(batch);

            after = page.data.after;
            if after.is_none() {
                break;
            }
        }

        posts.truncate(count as usize);
        debug!("Fetched {} {} posts from r/{}", posts.len(), sort, subreddit);
        Ok(posts)
    }

    /// Fetch the top-level comments of a post.
    pub async fn comments(&self, subreddit: &str, post_id: &str) -> Result<Vec<Comment>> {
        let url = format!("{API_BASE}/r/{subreddit}/comments/{post_id}");
        let query = [
            ("limit", PAGE_LIMIT.to_string()),
            ("depth", "1".to_string()),
            ("raw_json", "1".to_string()),
        ];

        let listings: Vec<Listing> = self.get_json(&url, &query).await?;

        // The endpoint returns two listings: the post itself, then its comments.
        let comment_listing = listings
            .get(1)
            .with_context(|| format!("Comment response for {} missing comment listing", post_id))?;
        comment_listing
            .data
            .comments()
            .with_context(|| format!("Malformed comments for post {}", post_id))
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow::anyhow!("Request to {} timed out", url)
                } else if e.is_connect() {
                    anyhow::anyhow!("Cannot connect to the Reddit API")
                } else {
                    anyhow::anyhow!("Request to {} failed: {}", url, e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Reddit API error {} for {}: {}", status, url, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to decode response from {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_paths() {
        assert_eq!(Sort::Hot.path(), "hot");
        assert_eq!(Sort::Top.path(), "top");
        assert_eq!(Sort::New.path(), "new");
        assert_eq!(Sort::Top.to_string(), "top");
    }
}
