pub mod conversation;
pub mod embedding_service;
pub mod llm_service;
pub mod prompts;
pub mod retriever;
pub mod vector_store;

pub use embedding_service::EmbeddingService;
pub use llm_service::{build_http_client, LlmService};
pub use retriever::Retriever;
pub use vector_store::PgVectorStore;
