use doppel_core::WireMessage;
use doppel_engine::traits::ChatProvider;
use doppel_providers::openai::{ChatEndpointConfig, build_chat_request, build_json_chat_request};
use doppel_providers::parse::parse_chat_completion;
use doppel_providers::request::HttpRequest;
use doppel_providers::runtime::execute;

/// Chat provider backed by an OpenAI-style `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiChatProvider {
    cfg: ChatEndpointConfig,
}

impl std::fmt::Debug for OpenAiChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatProvider")
            .field("base_url", &self.cfg.base_url)
            .field("model", &self.cfg.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiChatProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            cfg: ChatEndpointConfig {
                base_url: base_url.into(),
                api_key: api_key.into(),
                model: model.into(),
            },
        }
    }

    async fn run(&self, req: HttpRequest) -> anyhow::Result<String> {
        if self.cfg.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("missing OpenAI API key"));
        }
        let resp = execute(&req).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!(
                "chat completion failed: {}",
                resp.error_excerpt()
            ));
        }
        parse_chat_completion(&resp.body)
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenAiChatProvider {
    async fn complete(&self, messages: &[WireMessage]) -> anyhow::Result<String> {
        self.run(build_chat_request(&self.cfg, messages)).await
    }

    async fn complete_json(&self, messages: &[WireMessage]) -> anyhow::Result<String> {
        self.run(build_json_chat_request(&self.cfg, messages)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_leaks_the_key() {
        let provider = OpenAiChatProvider::new("https://example.com/v1", "sk-secret", "gpt-4o");
        let dbg = format!("{provider:?}");
        assert!(dbg.contains("[REDACTED]"));
        assert!(!dbg.contains("sk-secret"));
    }

    #[tokio::test]
    async fn empty_keys_fail_before_any_request() {
        let provider = OpenAiChatProvider::new("https://example.com/v1", "  ", "gpt-4o");
        let err = provider
            .complete(&[WireMessage::new("user", "hi")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing OpenAI API key"));
    }
}
