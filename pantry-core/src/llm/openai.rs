//! OpenAI-compatible chat-completions provider.

use super::{CompletionRequest, LlmConfig, LlmError, LlmProvider, ResponseFormat};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider for any endpoint speaking the OpenAI chat-completions API.
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    chat_model: String,
    vision_model: String,
    client: reqwest::Client,
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("vision_model", &self.vision_model)
            .finish_non_exhaustive()
    }
}

impl OpenAiProvider {
    /// Create a provider from configuration. Fails if no API key is set.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            chat_model: config.chat_model.clone(),
            vision_model: config.vision_model.clone(),
            client,
        })
    }

    fn model_for(&self, request: &CompletionRequest) -> &str {
        if request.images.is_empty() {
            &self.chat_model
        } else {
            &self.vision_model
        }
    }
}

/// Chat-completions request format.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormatField>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormatField {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat-completions response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiError {
    message: String,
}

/// Error response from the API.
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiApiError,
}

fn build_messages(request: &CompletionRequest) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);

    if let Some(system) = &request.system {
        messages.push(ChatMessage {
            role: "system",
            content: MessageContent::Text(system.clone()),
        });
    }

    let content = if request.images.is_empty() {
        MessageContent::Text(request.prompt.clone())
    } else {
        let mut parts = vec![ContentPart::Text {
            text: request.prompt.clone(),
        }];
        parts.extend(request.images.iter().map(|image| ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: image.to_data_url(),
            },
        }));
        MessageContent::Parts(parts)
    };

    messages.push(ChatMessage {
        role: "user",
        content,
    });

    messages
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let model = self.model_for(&request);
        let body = ChatCompletionRequest {
            model,
            messages: build_messages(&request),
            response_format: match request.response_format {
                ResponseFormat::Text => None,
                ResponseFormat::JsonObject => Some(ResponseFormatField {
                    format_type: "json_object",
                }),
            },
        };

        tracing::debug!(model = model, images = request.images.len(), "Calling LLM API");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if status != 200 {
            if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(&body) {
                return Err(LlmError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(LlmError::ApiError {
                status,
                message: body,
            });
        }

        let response: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::ParseError(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::ParseError("No message content in response".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.chat_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageData;
    use serde_json::json;

    fn request_json(request: &CompletionRequest) -> serde_json::Value {
        serde_json::to_value(build_messages(request)).unwrap()
    }

    #[test]
    fn test_text_request_messages() {
        let request = CompletionRequest::new("List recipes").with_system("Be brief.");

        assert_eq!(
            request_json(&request),
            json!([
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "List recipes"}
            ])
        );
    }

    #[test]
    fn test_image_request_uses_content_parts() {
        let image = ImageData::new("image/png", vec![1, 2, 3]);
        let request = CompletionRequest::new("What is this?").with_image(image);

        assert_eq!(
            request_json(&request),
            json!([{
                "role": "user",
                "content": [
                    {"type": "text", "text": "What is this?"},
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,AQID"}}
                ]
            }])
        );
    }

    #[test]
    fn test_vision_model_selected_for_images() {
        let config = LlmConfig {
            provider: crate::llm::ProviderKind::OpenAi,
            api_key: Some("sk-test".to_string()),
            base_url: "http://localhost".to_string(),
            chat_model: "text-model".to_string(),
            vision_model: "vision-model".to_string(),
            timeout: std::time::Duration::from_secs(1),
        };
        let provider = OpenAiProvider::new(&config).unwrap();

        let text = CompletionRequest::new("hi");
        let image = CompletionRequest::new("hi").with_image(ImageData::new("image/jpeg", vec![0]));

        assert_eq!(provider.model_for(&text), "text-model");
        assert_eq!(provider.model_for(&image), "vision-model");
        assert_eq!(provider.model_name(), "text-model");
        assert!(!format!("{:?}", provider).contains("sk-test"));
    }

    #[test]
    fn test_json_format_serialization() {
        let body = ChatCompletionRequest {
            model: "m",
            messages: vec![],
            response_format: Some(ResponseFormatField {
                format_type: "json_object",
            }),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["response_format"], json!({"type": "json_object"}));
    }
}
