use tracing::debug;

use crate::models::chat::RetrievedDocument;
use crate::utils::truncate_chars;

use super::types::AssembledContext;

/// Stands in for the retrieved text when the store returned nothing.
pub const NO_CONTEXT_FOUND: &str = "관련 정보를 찾을 수 없습니다.";

pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 1600;

/// Turns a summary and retrieved documents into the bounded context string.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    max_document_chars: usize,
}

impl ContextBuilder {
    pub fn new(max_document_chars: usize) -> Self {
        Self { max_document_chars }
    }

    pub fn max_document_chars(&self) -> usize {
        self.max_document_chars
    }

    /// Truncated documents joined by newlines, or the sentinel when empty.
    pub fn retrieved_text(&self, documents: &[RetrievedDocument]) -> String {
        if documents.is_empty() {
            debug!("No documents retrieved, using sentinel context");
            return NO_CONTEXT_FOUND.to_string();
        }

        documents
            .iter()
            .map(|doc| truncate_chars(&doc.content, self.max_document_chars))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn components(&self, summary: &str, documents: &[RetrievedDocument]) -> AssembledContext {
        AssembledContext {
            summary: summary.to_string(),
            retrieved_text: self.retrieved_text(documents),
        }
    }

    pub fn assemble(&self, summary: &str, documents: &[RetrievedDocument]) -> String {
        self.components(summary, documents).build()
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENT_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_of(ch: char, len: usize) -> RetrievedDocument {
        RetrievedDocument::new(std::iter::repeat(ch).take(len).collect::<String>())
    }

    #[test]
    fn test_empty_documents_use_sentinel() {
        let builder = ContextBuilder::default();
        let context = builder.assemble("", &[]);

        assert!(context.contains(NO_CONTEXT_FOUND));
        assert!(context.ends_with(&format!("검색된 컨텍스트:\n{}", NO_CONTEXT_FOUND)));
    }

    #[test]
    fn test_long_document_is_truncated() {
        let builder = ContextBuilder::default();
        let components = builder.components("", &[doc_of('가', 2000)]);

        assert_eq!(components.retrieved_text.chars().count(), 1600);
    }

    #[test]
    fn test_first_turn_round_trip() {
        let builder = ContextBuilder::default();
        let documents = vec![doc_of('a', 2000), doc_of('b', 500)];

        let components = builder.components("", &documents);
        let expected = format!("{}\n{}", "a".repeat(1600), "b".repeat(500));
        assert_eq!(components.retrieved_text, expected);
        assert_eq!(components.summary, "");

        let context = builder.assemble("", &documents);
        assert_eq!(context, format!("기존 대화 요약:\n\n\n검색된 컨텍스트:\n{}", expected));
    }

    #[test]
    fn test_summary_precedes_documents() {
        let builder = ContextBuilder::new(10);
        let context = builder.assemble("기존 대화 요약: 해고 문의", &[RetrievedDocument::new("근로기준법 제23조")]);

        let summary_at = context.find("해고 문의").unwrap();
        let doc_at = context.find("근로기준법").unwrap();
        assert!(summary_at < doc_at);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let builder = ContextBuilder::default();
        let documents = vec![doc_of('x', 3)];
        assert_eq!(builder.assemble("s", &documents), builder.assemble("s", &documents));
    }
}
