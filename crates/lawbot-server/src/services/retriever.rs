use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::chat::RetrievedDocument;
use crate::services::conversation::VectorStore;

/// Top-k similarity search over the vector store.
#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl Retriever {
    pub fn new(store: Arc<dyn VectorStore>, top_k: usize) -> Self {
        Self { store, top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Retrieve up to `top_k` documents for `query`.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>> {
        self.retrieve_k(query, self.top_k).await
    }

    pub async fn retrieve_k(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        info!("Retrieving up to {} documents for query: {}", k, query);

        let mut documents = self
            .store
            .similarity_search(query, k)
            .await
            .context("Vector store similarity search failed")?;
        documents.truncate(k);

        debug!("Retrieved {} documents", documents.len());
        Ok(documents)
    }
}
