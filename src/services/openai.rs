// src/services/openai.rs
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::errors::InterioError;
use crate::models::ValidGeneration;
use crate::services::pipeline::{AnalysisOutcome, DesignProvider, GeneratedImage};
use crate::services::prompts;

pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub async fn list_models(&self) -> Result<Vec<String>, InterioError> {
        let response = self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| InterioError::AuthFailed(format!("model listing request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(InterioError::AuthFailed(provider_message(&error_text)));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| InterioError::AuthFailed(format!("failed to parse model listing: {}", e)))?;

        let ids = result["data"]
            .as_array()
            .map(|models| {
                models
                    .iter()
                    .filter_map(|model| model["id"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Ok(ids)
    }
}

// OpenAI error bodies carry the useful text under error.message; fall back to
// the raw body when the shape is different.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl DesignProvider for OpenAiClient {
    async fn analyze_room(
        &self,
        request: &ValidGeneration,
    ) -> Result<AnalysisOutcome, InterioError> {
        let prompt =
            prompts::analysis_prompt(request.room_type, request.style, request.prompt.as_deref());

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": "gpt-4o",
                "messages": [{
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": prompt
                        },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": request.image.as_str(),
                                "detail": "high"
                            }
                        }
                    ]
                }],
                "max_tokens": 4096
            }))
            .send()
            .await
            .map_err(|e| InterioError::AnalysisFailed(format!("OpenAI request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(InterioError::AnalysisFailed(provider_message(&error_text)));
        }

        let result: serde_json::Value = response.json().await.map_err(|e| {
            InterioError::AnalysisFailed(format!("failed to parse OpenAI response: {}", e))
        })?;

        let content = result["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                InterioError::AnalysisFailed("no content in OpenAI response".to_string())
            })?
            .to_string();

        let vision_tokens = result["usage"]["total_tokens"].as_u64().unwrap_or(0);

        Ok(AnalysisOutcome {
            content,
            vision_tokens,
        })
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, InterioError> {
        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": "dall-e-3",
                "prompt": prompt,
                "n": 1,
                "size": "1024x1024",
                "quality": "hd",
                "style": "natural",
                "response_format": "url"
            }))
            .send()
            .await
            .map_err(|e| {
                InterioError::GenerationFailed(format!("image generation request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(InterioError::GenerationFailed(provider_message(&error_text)));
        }

        let result: serde_json::Value = response.json().await.map_err(|e| {
            InterioError::GenerationFailed(format!("failed to parse generation response: {}", e))
        })?;

        Ok(GeneratedImage {
            url: result["data"][0]["url"].as_str().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_prefers_the_error_message_field() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "requests"}}"#;
        assert_eq!(provider_message(body), "Rate limit reached");
    }

    #[test]
    fn provider_message_falls_back_to_the_raw_body() {
        assert_eq!(provider_message("upstream exploded"), "upstream exploded");
        assert_eq!(provider_message(r#"{"code": 500}"#), r#"{"code": 500}"#);
    }
}
