use std::future::Future;

use anyhow::{Context, Result};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use tracing::debug;

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

/// Chat-completion backend for the grading engine. Tests substitute fakes.
pub trait CompletionService {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Production backend: an OpenAI-compatible chat-completion endpoint.
pub struct OpenAiCompletions {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletions {
    pub fn new(api_key: &str, api_base: Option<&str>, model: String) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(api_base) = api_base {
            config = config.with_api_base(api_base);
        }

        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

impl CompletionService for OpenAiCompletions {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        debug!(model = %self.model, "requesting chat completion");

        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system)
                    .build()?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user)
                    .build()?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(MAX_TOKENS)
            .temperature(TEMPERATURE)
            .build()?;

        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .context("model returned no content")?;

        Ok(content.trim().to_owned())
    }
}
