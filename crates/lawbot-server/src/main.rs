use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use lawbot_server::config::Settings;
use lawbot_server::database::{DbPool, Repository};
use lawbot_server::logging::init_logger;
use lawbot_server::routes::build_router;
use lawbot_server::services::conversation::{
    AnswerGenerator, ContextBuilder, ConversationManager, ConversationSummarizer, SessionStore,
    VectorStore,
};
use lawbot_server::services::{
    build_http_client, EmbeddingService, LlmService, PgVectorStore, Retriever,
};
use lawbot_server::state::AppState;
use lawbot_server::ui::PageRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    init_logger(&settings.logging)?;

    info!("🚀 Starting Lawbot server...");
    info!("✅ Configuration loaded");

    let http_client = build_http_client(&settings.openai)?;

    // Vector store over the persisted labor-law collection
    let db_pool = DbPool::new(&settings.database).await?;
    info!("✅ Database connection established");

    let embedding_service = Arc::new(EmbeddingService::new(
        http_client.clone(),
        &settings.openai,
        &settings.embedding,
    ));
    let vector_store: Arc<dyn VectorStore> = Arc::new(PgVectorStore::new(
        Repository::new(db_pool),
        embedding_service,
        settings.vector_store.collection.clone(),
    ));

    let answer_llm = Arc::new(LlmService::new(
        http_client.clone(),
        &settings.openai,
        settings.llm.answer_model.clone(),
        settings.llm.temperature,
    ));
    let summary_llm = Arc::new(LlmService::new(
        http_client,
        &settings.openai,
        settings.llm.summary_model.clone(),
        settings.llm.temperature,
    ));
    info!(
        "✅ Language models ready: answer={}, summary={}",
        settings.llm.answer_model, settings.llm.summary_model
    );

    let sessions = SessionStore::new(Duration::from_secs(settings.session.idle_timeout_seconds));
    let _sweeper = sessions.spawn_cleanup_task(Duration::from_secs(settings.session.cleanup_interval_seconds));

    let conversation_manager = Arc::new(ConversationManager::new(
        sessions,
        Retriever::new(vector_store.clone(), settings.rag.retrieval_top_k),
        ConversationSummarizer::new(summary_llm, settings.prompts.summary_instruction.clone()),
        ContextBuilder::new(settings.rag.max_document_chars),
        AnswerGenerator::new(answer_llm, settings.prompts.persona.clone()),
    ));

    let renderer = Arc::new(PageRenderer::new(settings.ui.clone())?);

    let state = AppState {
        conversation_manager,
        vector_store,
        renderer,
        session_cookie: settings.session.cookie_name.clone(),
    };
    let app = build_router(state, &settings.ui.static_dir);

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("🎯 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
