use anyhow::{Context, Result};
use pgvector::Vector;
use std::sync::Arc;
use tracing::debug;

use crate::database::{EmbeddingMatch, Repository};
use crate::models::chat::RetrievedDocument;
use crate::services::conversation::{EmbeddingProvider, VectorStore};

/// Pre-populated pgvector collection queried through the embedding model.
pub struct PgVectorStore {
    repository: Repository,
    embeddings: Arc<dyn EmbeddingProvider>,
    collection: String,
}

impl PgVectorStore {
    pub fn new(
        repository: Repository,
        embeddings: Arc<dyn EmbeddingProvider>,
        collection: String,
    ) -> Self {
        Self {
            repository,
            embeddings,
            collection,
        }
    }
}

#[async_trait::async_trait]
impl VectorStore for PgVectorStore {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        let embedding = self
            .embeddings
            .embed(query)
            .await
            .context("Failed to embed query")?;

        let limit = i64::try_from(k).context("top_k out of range")?;
        let matches = self
            .repository
            .similarity_search(&self.collection, Vector::from(embedding), limit)
            .await
            .context("Similarity query failed")?;

        if let Some(best) = matches.first() {
            debug!("Closest document distance: {:.4}", best.distance);
        }

        Ok(into_documents(matches))
    }

    async fn ping(&self) -> Result<()> {
        self.repository.pool.health_check().await
    }
}

// Rows with a NULL body carry nothing to quote and are skipped.
fn into_documents(matches: Vec<EmbeddingMatch>) -> Vec<RetrievedDocument> {
    matches
        .into_iter()
        .filter_map(|m| m.content)
        .map(RetrievedDocument::new)
        .collect()
}
