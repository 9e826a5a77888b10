use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

use crate::config::UiConfig;
use crate::models::chat::{ConversationTurn, Role};

const INDEX_TEMPLATE_NAME: &str = "index";
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.hbs");

#[derive(Serialize)]
struct PageView<'a> {
    page: &'a UiConfig,
    turns: Vec<TurnView<'a>>,
}

#[derive(Serialize)]
struct TurnView<'a> {
    role: &'static str,
    avatar: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ConversationTurn> for TurnView<'a> {
    fn from(turn: &'a ConversationTurn) -> Self {
        let avatar = match turn.role {
            Role::User => "🧑",
            Role::Assistant => "🤖",
        };
        Self {
            role: turn.role.as_str(),
            avatar,
            content: &turn.content,
        }
    }
}

/// Renders the chat page. Output depends only on the page texts and the turns.
pub struct PageRenderer {
    registry: Handlebars<'static>,
    page: UiConfig,
}

impl PageRenderer {
    pub fn new(page: UiConfig) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)
            .context("Invalid chat page template")?;

        Ok(Self { registry, page })
    }

    pub fn render(&self, turns: &[ConversationTurn]) -> Result<String> {
        let view = PageView {
            page: &self.page,
            turns: turns.iter().map(TurnView::from).collect(),
        };

        self.registry
            .render(INDEX_TEMPLATE_NAME, &view)
            .context("Failed to render chat page")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> PageRenderer {
        PageRenderer::new(UiConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_page_has_input_and_texts() {
        let html = renderer().render(&[]).unwrap();

        assert!(html.contains(r#"name="query""#));
        assert!(html.contains("상담 내용을 작성하세요.예. 근로계약서는 어떻게 써야하나요?"));
        assert!(html.contains("무엇을 도와드릴까요?"));
        assert!(html.contains("Lawbot이 응답을 생성하는 중입니다...🤖"));
        assert!(!html.contains(r#"class="message "#));
    }

    #[test]
    fn test_turns_rendered_in_order_with_roles() {
        let turns = vec![
            ConversationTurn::user("첫 번째 질문"),
            ConversationTurn::assistant("첫 번째 답변"),
            ConversationTurn::user("두 번째 질문"),
        ];
        let html = renderer().render(&turns).unwrap();

        let first = html.find("첫 번째 질문").unwrap();
        let answer = html.find("첫 번째 답변").unwrap();
        let second = html.find("두 번째 질문").unwrap();
        assert!(first < answer && answer < second);
        assert_eq!(html.matches(r#"class="message user""#).count(), 2);
        assert_eq!(html.matches(r#"class="message assistant""#).count(), 1);
    }

    #[test]
    fn test_rerender_is_identical() {
        let renderer = renderer();
        let turns = vec![
            ConversationTurn::user("질문"),
            ConversationTurn::assistant("답변"),
        ];

        assert_eq!(renderer.render(&turns).unwrap(), renderer.render(&turns).unwrap());
    }

    #[test]
    fn test_content_is_escaped() {
        let turns = vec![ConversationTurn::assistant("<script>alert(1)</script>")];
        let html = renderer().render(&turns).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
