//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{build_prompt, TranslateError, Translator};
use crate::config::TranslationSettings;
use crate::language::Language;

/// User message of the connectivity check
const VERIFY_MESSAGE: &str = "Test connection";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Translator backed by `POST {api_base}/chat/completions`
pub struct OpenAiTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for OpenAiTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiTranslator")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiTranslator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        settings: &TranslationSettings,
    ) -> Result<Self, TranslateError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TranslateError::MissingCredential);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            endpoint: completions_endpoint(&settings.api_base),
            api_key,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a minimal request to check the key and endpoint
    pub async fn verify(&self) -> Result<(), TranslateError> {
        self.complete(&self.verify_request()).await?;
        info!("Translation API connection successful");
        Ok(())
    }

    fn verify_request(&self) -> ChatRequest {
        chat_request(&self.model, None, VERIFY_MESSAGE)
    }

    /// System prompt for the language pair, the recognized text as the user turn
    fn translation_request(
        &self,
        text: &str,
        source: Language,
        target: Language,
        context: Option<&str>,
    ) -> ChatRequest {
        let prompt = build_prompt(source, target, context);
        chat_request(&self.model, Some(prompt), text)
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, TranslateError> {
        debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_status(status, &body));
        }

        parse_completion(&body)
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
        context: Option<&str>,
    ) -> Result<String, TranslateError> {
        let request = self.translation_request(text, source, target, context);
        self.complete(&request).await
    }
}

fn chat_request(model: &str, system: Option<String>, user: &str) -> ChatRequest {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: user.to_string(),
    });

    ChatRequest {
        model: model.to_string(),
        messages,
    }
}

/// `{api_base}/chat/completions`, tolerating a trailing slash
fn completions_endpoint(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}

/// Extract the trimmed text of the first choice
fn parse_completion(body: &str) -> Result<String, TranslateError> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| TranslateError::Api {
        status: 200,
        message: format!("invalid response body: {}", e),
    })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or(TranslateError::EmptyResponse)
}

fn error_from_status(status: StatusCode, body: &str) -> TranslateError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TranslateError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => TranslateError::RateLimited(message),
        _ => TranslateError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base() {
        assert_eq!(
            completions_endpoint("https://api.openai.com/v1"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            completions_endpoint("http://localhost:1234/v1/"),
            "http://localhost:1234/v1/chat/completions"
        );
    }

    fn translator() -> OpenAiTranslator {
        OpenAiTranslator::new("sk-test", "gpt-4o-mini", &TranslationSettings::default()).unwrap()
    }

    #[test]
    fn test_translation_request_body() {
        let request = translator().translation_request(
            "こんにちは 世界",
            Language::Japanese,
            Language::English,
            Some("Dialogue from an RPG"),
        );
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(
            messages[0]["content"],
            build_prompt(Language::Japanese, Language::English, Some("Dialogue from an RPG"))
        );
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "こんにちは 世界");
    }

    #[test]
    fn test_translation_request_without_context() {
        let request =
            translator().translation_request("안녕하세요", Language::Korean, Language::Japanese, None);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["messages"][0]["content"],
            build_prompt(Language::Korean, Language::Japanese, None)
        );
        assert_eq!(json["messages"][1]["content"], "안녕하세요");
    }

    #[test]
    fn test_verify_request_has_no_system_turn() {
        let json = serde_json::to_value(translator().verify_request()).unwrap();

        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], VERIFY_MESSAGE);
        assert_eq!(json["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_parse_completion_trims() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Hello world\n"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Hello world");
    }

    #[test]
    fn test_parse_completion_empty() {
        let err = parse_completion(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, TranslateError::EmptyResponse));

        let err = parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert!(matches!(err, TranslateError::EmptyResponse));
    }

    #[test]
    fn test_error_mapping() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        match error_from_status(StatusCode::UNAUTHORIZED, body) {
            TranslateError::Authentication(msg) => assert_eq!(msg, "Incorrect API key provided"),
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(
            error_from_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            TranslateError::RateLimited(_)
        ));

        match error_from_status(StatusCode::BAD_GATEWAY, "upstream down") {
            TranslateError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_new_requires_key() {
        let err = OpenAiTranslator::new("  ", "gpt-4o-mini", &TranslationSettings::default()).unwrap_err();
        assert!(matches!(err, TranslateError::MissingCredential));
    }

    #[test]
    fn test_debug_redacts_key() {
        let translator =
            OpenAiTranslator::new("sk-secret", "gpt-4o-mini", &TranslationSettings::default()).unwrap();
        let debug = format!("{:?}", translator);
        assert!(!debug.contains("sk-secret"));
        assert_eq!(translator.model(), "gpt-4o-mini");
    }
}
