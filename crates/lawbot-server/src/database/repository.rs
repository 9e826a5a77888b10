use super::{DbPool, EmbeddingMatch};
use anyhow::Result;
use pgvector::Vector;
use tracing::debug;

/// Nearest documents of one collection by cosine distance.
///
/// Reads the LangChain PGVector layout: `langchain_pg_collection` names the
/// collections and `langchain_pg_embedding` holds one row per document chunk.
const SIMILARITY_SEARCH_SQL: &str = r#"SELECT
        e.document AS content,
        (e.embedding <=> $2)::float8 AS distance
       FROM langchain_pg_embedding e
       JOIN langchain_pg_collection c ON e.collection_id = c.uuid
       WHERE c.name = $1
       ORDER BY e.embedding <=> $2
       LIMIT $3"#;

pub struct Repository {
    pub pool: DbPool,
}

impl Repository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn similarity_search(
        &self,
        collection: &str,
        query_embedding: Vector,
        limit: i64,
    ) -> Result<Vec<EmbeddingMatch>> {
        let matches = sqlx::query_as::<_, EmbeddingMatch>(SIMILARITY_SEARCH_SQL)
            .bind(collection)
            .bind(query_embedding)
            .bind(limit)
            .persistent(false)
            .fetch_all(self.pool.get_pool())
            .await?;

        debug!(
            "Found {} matches in collection {}",
            matches.len(),
            collection
        );

        Ok(matches)
    }
}
