use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::services::prompts;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub database: DatabaseConfig,
    pub vector_store: VectorStoreConfig,
    pub rag: RagConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// OpenAI-compatible endpoint shared by the embedding and chat clients.
#[derive(Deserialize, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_seconds: u64,
}

// Keep the key out of logs.
impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    pub model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// Model used for the persona-driven answer.
    pub answer_model: String,
    /// Model used to compress the conversation history.
    pub summary_model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VectorStoreConfig {
    /// Collection name inside the pgvector store.
    pub collection: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RagConfig {
    pub retrieval_top_k: usize,
    pub max_document_chars: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub idle_timeout_seconds: u64,
    pub cleanup_interval_seconds: u64,
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: 6 * 60 * 60,
            cleanup_interval_seconds: 300,
            cookie_name: "lawbot_session".to_string(),
        }
    }
}

/// Static texts and asset locations of the chat page.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    pub static_dir: String,
    pub page_title: String,
    pub logo_url: String,
    pub banner_url: String,
    pub headline: String,
    pub prompt: String,
    pub input_placeholder: String,
    pub disclaimer: String,
    pub pending_message: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            static_dir: "static".to_string(),
            page_title: "Lawbot".to_string(),
            logo_url: "/static/image_logo.png".to_string(),
            banner_url: "/static/robot.gif".to_string(),
            headline: "누구나 쉽게 노무/인사 관련하여 챗봇에게 물어보세요🤖".to_string(),
            prompt: "무엇을 도와드릴까요?".to_string(),
            input_placeholder: "상담 내용을 작성하세요.예. 근로계약서는 어떻게 써야하나요?".to_string(),
            disclaimer: "Lawbot의 답변이 모든 상황에 완벽하지 않을 수 있습니다. \n보다 정확한 상담이 필요하시면 전문가에게 문의하시길 권장드립니다. 😊".to_string(),
            pending_message: "Lawbot이 응답을 생성하는 중입니다...🤖".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PromptsConfig {
    pub persona: String,
    pub summary_instruction: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            persona: prompts::LABOR_LAW_PERSONA.to_string(),
            summary_instruction: prompts::SUMMARY_INSTRUCTION.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/settings").required(true))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(config)
    }

    /// Build settings from an inline TOML document (no environment overlay).
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(config)
    }

    fn finish(config: Config) -> Result<Self> {
        let mut settings: Settings = config
            .try_deserialize()
            .context("Invalid configuration")?;

        if settings.openai.api_key.trim().is_empty() {
            settings.openai.api_key = std::env::var("OPENAI_API_KEY")
                .context("OpenAI API key missing: set openai.api_key or OPENAI_API_KEY")?;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 8501

        [openai]
        base_url = "https://api.openai.com/v1"
        api_key = "sk-test"
        timeout_seconds = 120

        [embedding]
        model = "text-embedding-3-small"

        [llm]
        answer_model = "gpt-4o"
        summary_model = "gpt-4"

        [database]
        url = "postgres://localhost/lawbot"
        pool_max_size = 5
        pool_timeout_seconds = 10

        [vector_store]
        collection = "labor_law"

        [rag]
        retrieval_top_k = 5
        max_document_chars = 1600
    "#;

    #[test]
    fn test_minimal_settings_fill_defaults() {
        let settings = Settings::from_toml_str(MINIMAL).unwrap();

        assert_eq!(settings.server.port, 8501);
        assert_eq!(settings.rag.retrieval_top_k, 5);
        assert_eq!(settings.llm.temperature, None);
        assert_eq!(settings.session.cookie_name, "lawbot_session");
        assert_eq!(settings.ui.prompt, "무엇을 도와드릴까요?");
        assert_eq!(settings.prompts.persona, prompts::LABOR_LAW_PERSONA);
        assert_eq!(settings.logging.directory, "logs");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml = format!("{MINIMAL}\n[session]\nidle_timeout_seconds = 60\n");
        let settings = Settings::from_toml_str(&toml).unwrap();

        assert_eq!(settings.session.idle_timeout_seconds, 60);
        assert_eq!(settings.session.cleanup_interval_seconds, 300);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let settings = Settings::from_toml_str(MINIMAL).unwrap();
        let printed = format!("{:?}", settings.openai);
        assert!(!printed.contains("sk-test"));
    }
}
