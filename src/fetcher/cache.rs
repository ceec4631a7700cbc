use crate::fetcher::LinkFetcher;
use crate::graph::NodeId;
use crate::FetchResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Memoizes the link lists returned by another fetcher
///
/// The engine looks a node up once when it is discovered and again when it is
/// expanded; with this wrapper the source is only hit the first time. Only
/// successful results are cached, so a failed node is retried on its next
/// lookup.
#[derive(Debug)]
pub struct CachingFetcher<F> {
    inner: F,
    cache: Mutex<HashMap<NodeId, Vec<NodeId>>>,
    hits: AtomicUsize,
}

impl<F: LinkFetcher> CachingFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
        }
    }

    /// Number of lookups served from the cache
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of distinct nodes cached
    pub async fn cached_nodes(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: LinkFetcher> LinkFetcher for CachingFetcher<F> {
    async fn fetch_links(&self, node: &NodeId) -> FetchResult<Vec<NodeId>> {
        if let Some(links) = self.cache.lock().await.get(node) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(links.clone());
        }

        let links = self.inner.fetch_links(node).await?;

        // First writer wins if two lookups of the same node raced
        let mut cache = self.cache.lock().await;
        Ok(cache.entry(node.clone()).or_insert(links).clone())
    }
}
