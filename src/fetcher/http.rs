//! HTTP article fetcher
//!
//! Retrieves an article page and returns the article links found in its body.
//! Retries and backoff are not attempted here; a failed request is reported
//! once and the traversal engine decides what it means for the run.

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::fetcher::parser::extract_article_links;
use crate::fetcher::LinkFetcher;
use crate::graph::NodeId;
use crate::{ConfigError, FetchError, FetchResult, MapperError};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `fetcher` - Timeouts for requests
/// * `user_agent` - Crawler identification
///
/// # Example
///
/// ```no_run
/// use wiki_mapper::config::{FetcherConfig, UserAgentConfig};
/// use wiki_mapper::fetcher::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "WikiMapper".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&FetcherConfig::default(), &user_agent).unwrap();
/// ```
pub fn build_http_client(
    fetcher: &FetcherConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(fetcher.timeout_secs))
        .connect_timeout(Duration::from_secs(fetcher.connect_timeout_secs))
        .redirect(Policy::limited(5))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches article pages over HTTP
#[derive(Debug, Clone)]
pub struct ArticleFetcher {
    client: Client,
    base_url: Url,
    keep_list_articles: bool,
}

impl ArticleFetcher {
    /// Creates a fetcher from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ArticleFetcher)` - Ready to fetch
    /// * `Err(MapperError)` - The base URL is invalid or the client could not be built
    pub fn new(
        fetcher: &FetcherConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, MapperError> {
        let base_url = Url::parse(&fetcher.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
        let client = build_http_client(fetcher, user_agent)?;

        Ok(Self {
            client,
            base_url,
            keep_list_articles: fetcher.keep_list_articles,
        })
    }

    /// Resolves the page URL of an article
    pub fn article_url(&self, node: &NodeId) -> FetchResult<Url> {
        let name = node.as_str();
        if name.is_empty() || name.starts_with('/') {
            return Err(FetchError::InvalidNode {
                node: name.to_string(),
                message: "article names must be non-empty and relative".to_string(),
            });
        }

        let url = self
            .base_url
            .join(name)
            .map_err(|e| FetchError::InvalidNode {
                node: name.to_string(),
                message: e.to_string(),
            })?;

        // A name that parses as an absolute URL would escape the base site
        if url.origin() != self.base_url.origin() {
            return Err(FetchError::InvalidNode {
                node: name.to_string(),
                message: format!("resolves outside {}", self.base_url),
            });
        }

        Ok(url)
    }
}

#[async_trait]
impl LinkFetcher for ArticleFetcher {
    async fn fetch_links(&self, node: &NodeId) -> FetchResult<Vec<NodeId>> {
        let url = self.article_url(node)?;
        tracing::trace!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(node, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                node: node.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(node, e))?;

        extract_article_links(&body, self.keep_list_articles).ok_or_else(|| {
            FetchError::MissingContent {
                node: node.to_string(),
            }
        })
    }
}

/// Maps a reqwest failure onto a fetch error
fn classify_error(node: &NodeId, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            node: node.to_string(),
        }
    } else {
        FetchError::Http {
            node: node.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_user_agent() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestMapper".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    fn create_fetcher() -> ArticleFetcher {
        ArticleFetcher::new(&FetcherConfig::default(), &create_user_agent()).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&FetcherConfig::default(), &create_user_agent());
        assert!(client.is_ok());
    }

    #[test]
    fn test_article_url() {
        let fetcher = create_fetcher();
        let url = fetcher
            .article_url(&NodeId::from("Python_(programming_language)"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/wiki/Python_(programming_language)"
        );
    }

    #[test]
    fn test_article_url_rejects_absolute_names() {
        let fetcher = create_fetcher();
        assert!(matches!(
            fetcher.article_url(&NodeId::from("/etc/passwd")),
            Err(FetchError::InvalidNode { .. })
        ));
        assert!(matches!(
            fetcher.article_url(&NodeId::from("")),
            Err(FetchError::InvalidNode { .. })
        ));
        assert!(matches!(
            fetcher.article_url(&NodeId::from("https://example.com/page")),
            Err(FetchError::InvalidNode { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = FetcherConfig {
            base_url: "not a url".to_string(),
            ..FetcherConfig::default()
        };
        assert!(ArticleFetcher::new(&config, &create_user_agent()).is_err());
    }

    // Fetches against live responses are covered with wiremock in the
    // integration tests
}
