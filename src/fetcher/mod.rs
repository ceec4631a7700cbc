//! Link fetchers
//!
//! The traversal engine only needs one capability from the outside world:
//! given an article, return its outbound article links in page order. This
//! module defines that seam and provides:
//! - `ArticleFetcher`: fetches pages over HTTP and extracts their links
//! - `MemoryFetcher`: serves a fixed adjacency map (offline runs and tests)
//! - `CachingFetcher`: memoizes another fetcher's results for a run

mod cache;
mod http;
mod memory;
mod parser;

pub use cache::CachingFetcher;
pub use http::{build_http_client, ArticleFetcher};
pub use memory::MemoryFetcher;
pub use parser::extract_article_links;

use crate::graph::NodeId;
use crate::FetchResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of outbound links for a node
#[async_trait]
pub trait LinkFetcher: Send + Sync {
    /// Returns the node's outbound links, in page order
    async fn fetch_links(&self, node: &NodeId) -> FetchResult<Vec<NodeId>>;
}

#[async_trait]
impl<F: LinkFetcher + ?Sized> LinkFetcher for Arc<F> {
    async fn fetch_links(&self, node: &NodeId) -> FetchResult<Vec<NodeId>> {
        (**self).fetch_links(node).await
    }
}
