use sqlx::FromRow;

/// Row returned by the similarity query.
#[derive(Debug, Clone, FromRow)]
pub struct EmbeddingMatch {
    pub content: Option<String>,
    pub distance: f64,
}
