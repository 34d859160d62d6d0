use crate::models::{Car, IdentificationOutcome, Recommendation};
use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the LLM assistant
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Assistant is not configured")]
    Disabled,
}

/// LLM-backed capabilities used by the search and recommendation flows
///
/// Injected into the application state so tests can substitute a
/// deterministic implementation.
#[async_trait]
pub trait CarAssistant: Send + Sync {
    /// Identify make, model, year and color of the car in a photo
    async fn identify_from_image(&self, image: &[u8]) -> Result<IdentificationOutcome, AssistantError>;

    /// Suggest alternatives to the selected car
    async fn recommend(
        &self,
        selection: &Car,
        preferences: Option<&str>,
    ) -> Result<Vec<Recommendation>, AssistantError>;
}

/// Errors decoding an uploaded photo
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Photo must be a base64 data URI (data:<mimetype>;base64,<data>)")]
    NotADataUri,

    #[error("Photo payload is not valid base64")]
    InvalidBase64,

    #[error("Photo is empty")]
    EmptyImage,
}

/// Decode `data:<mime>;base64,<payload>` into raw image bytes
pub fn decode_photo_data_uri(uri: &str) -> Result<Vec<u8>, ScanError> {
    let rest = uri.trim().strip_prefix("data:").ok_or(ScanError::NotADataUri)?;
    let (_, payload) = rest.split_once(";base64,").ok_or(ScanError::NotADataUri)?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| ScanError::InvalidBase64)?;

    if bytes.is_empty() {
        return Err(ScanError::EmptyImage);
    }
    Ok(bytes)
}

/// Stand-in used when no API key is configured
pub struct DisabledAssistant;

#[async_trait]
impl CarAssistant for DisabledAssistant {
    async fn identify_from_image(&self, _image: &[u8]) -> Result<IdentificationOutcome, AssistantError> {
        Err(AssistantError::Disabled)
    }

    async fn recommend(
        &self,
        _selection: &Car,
        _preferences: Option<&str>,
    ) -> Result<Vec<Recommendation>, AssistantError> {
        Err(AssistantError::Disabled)
    }
}

const IDENTIFY_PROMPT: &str = "You are an expert automotive AI assistant. Your task is to analyze the provided image and identify the car in it.

Analyze the image carefully. Identify the following details if possible:
- Make (e.g., Toyota, Honda, Ford)
- Model (e.g., Camry, Civic, F-150)
- Year (e.g., 2023 - provide as a string)
- Color (e.g., Red, Blue, Silver)

If you can confidently identify at least the make and model, set 'matchFound' to true. Provide any identified details in the 'carInfo' object.
If the image does not contain a car, or if you cannot confidently identify the make and model, set 'matchFound' to false.
In the 'reasoning' field, explain your findings, e.g. \"Identified a Red 2023 Toyota Camry.\" or \"No car is visible in the provided image.\"

Reply with ONLY a JSON object of the form {\"carInfo\": {\"make\": string, \"model\": string, \"year\": string, \"color\": string, \"description\": string}, \"matchFound\": boolean, \"reasoning\": string}. Omit fields from 'carInfo' that cannot be determined. If you can describe the car (e.g. \"red hatchback\") but not the specific make/model, put that in carInfo.description and set matchFound to false.";

const RECOMMEND_SYSTEM: &str = "You are an expert car recommendation agent. Given a user's selected car and optional preferences, you recommend similar cars. Reply with ONLY a JSON object with a 'recommendations' array. Each element has 'make' (string), 'model' (string), 'year' (number), 'price' (number), 'features' (array of strings) and 'reasoning' (string).";

/// Build the recommendation prompt for a selected car
pub fn recommendation_prompt(selection: &Car, preferences: Option<&str>) -> String {
    let mut prompt = format!(
        "Selected Car:\nMake: {}\nModel: {}\nYear: {}\nPrice: {}\nFeatures: {}\n",
        selection.make,
        selection.model,
        selection.year,
        selection.price,
        selection.features.join(", ")
    );

    if let Some(preferences) = preferences.map(str::trim).filter(|p| !p.is_empty()) {
        prompt.push_str(&format!("\nUser Preferences: {}\n", preferences));
    }

    prompt.push_str(
        "\nRecommend cars that are similar to the selected car, considering the user's preferences if provided. \
         For each recommended car, explain why it is a good alternative, highlighting key features and price comparisons. \
         Be concise and provide clear reasoning.",
    );
    prompt
}

/// Encode image bytes as a data URL, sniffing the mime type
pub fn image_data_url(bytes: &[u8]) -> String {
    let mime = infer::get(bytes).map(|t| t.mime_type()).unwrap_or("image/jpeg");
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, b64)
}

/// Models sometimes wrap JSON in markdown fences despite instructions
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Deserialize)]
struct RecommendationsPayload {
    recommendations: Vec<Recommendation>,
}

/// Client for any OpenAI-compatible chat completions API
pub struct OpenAiCompatAssistant {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl OpenAiCompatAssistant {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout_secs: u64,
    ) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            model,
            client,
        })
    }

    /// Send a chat completion and parse the reply content as JSON
    async fn complete_json(&self, messages: Value) -> Result<Value, AssistantError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "response_format": { "type": "json_object" },
            "temperature": 0.2,
        });

        tracing::debug!("Calling assistant model {} at {}", self.model, url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Assistant call failed: {} - {}", status, text);
            return Err(AssistantError::ApiError(format!("Provider returned {}", status)));
        }

        let json: Value = response.json().await?;

        let content = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| AssistantError::InvalidResponse("Missing choices[0].message.content".into()))?;

        serde_json::from_str(strip_code_fences(content))
            .map_err(|e| AssistantError::InvalidResponse(format!("Reply is not JSON: {}", e)))
    }
}

#[async_trait]
impl CarAssistant for OpenAiCompatAssistant {
    async fn identify_from_image(&self, image: &[u8]) -> Result<IdentificationOutcome, AssistantError> {
        let messages = json!([
            {"role": "user", "content": [
                {"type": "text", "text": IDENTIFY_PROMPT},
                {"type": "image_url", "image_url": {"url": image_data_url(image)}}
            ]}
        ]);

        let value = self.complete_json(messages).await?;

        serde_json::from_value(value)
            .map_err(|e| AssistantError::InvalidResponse(format!("Failed to parse identification: {}", e)))
    }

    async fn recommend(
        &self,
        selection: &Car,
        preferences: Option<&str>,
    ) -> Result<Vec<Recommendation>, AssistantError> {
        let messages = json!([
            {"role": "system", "content": RECOMMEND_SYSTEM},
            {"role": "user", "content": recommendation_prompt(selection, preferences)}
        ]);

        let value = self.complete_json(messages).await?;

        let payload: RecommendationsPayload = serde_json::from_value(value)
            .map_err(|e| AssistantError::InvalidResponse(format!("Failed to parse recommendations: {}", e)))?;

        tracing::debug!(
            "Assistant returned {} recommendations for {}",
            payload.recommendations.len(),
            selection.display_name()
        );

        Ok(payload.recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::inventory::seed_cars;

    fn completion(content: &str) -> String {
        json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[test]
    fn test_decode_photo_data_uri() {
        assert_eq!(decode_photo_data_uri("data:image/png;base64,aGVsbG8="), Ok(b"hello".to_vec()));
        assert_eq!(decode_photo_data_uri("aGVsbG8="), Err(ScanError::NotADataUri));
        assert_eq!(decode_photo_data_uri("data:image/png;base64,!!!"), Err(ScanError::InvalidBase64));
        assert_eq!(decode_photo_data_uri("data:image/png;base64,"), Err(ScanError::EmptyImage));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_image_data_url_sniffs_png() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert!(image_data_url(&png).starts_with("data:image/png;base64,"));
        assert!(image_data_url(b"??").starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_recommendation_prompt_includes_preferences() {
        let car = &seed_cars()[0];
        let prompt = recommendation_prompt(car, Some("good safety"));
        assert!(prompt.contains("Make: Toyota"));
        assert!(prompt.contains("User Preferences: good safety"));

        let prompt = recommendation_prompt(car, Some("  "));
        assert!(!prompt.contains("User Preferences"));
    }

    #[tokio::test]
    async fn test_identify_parses_reply() {
        let mut server = mockito::Server::new_async().await;
        let reply = r#"{"carInfo":{"make":"Honda","model":"Civic","year":"2023","color":"Red"},"matchFound":true,"reasoning":"Identified a Red 2023 Honda Civic."}"#;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion(reply))
            .create_async()
            .await;

        let assistant =
            OpenAiCompatAssistant::new(server.url(), "test_key".into(), "test-model".into(), 5).unwrap();
        let outcome = assistant.identify_from_image(b"fake image").await.unwrap();

        mock.assert_async().await;
        assert!(outcome.match_found);
        assert_eq!(outcome.car_info.model.as_deref(), Some("Civic"));
    }

    #[tokio::test]
    async fn test_recommend_rejects_wrong_shape() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion(r#"{"cars":[]}"#))
            .create_async()
            .await;

        let assistant =
            OpenAiCompatAssistant::new(server.url(), "k".into(), "m".into(), 5).unwrap();
        let result = assistant.recommend(&seed_cars()[0], None).await;

        assert!(matches!(result, Err(AssistantError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_provider_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let assistant =
            OpenAiCompatAssistant::new(server.url(), "k".into(), "m".into(), 5).unwrap();
        let result = assistant.recommend(&seed_cars()[0], None).await;

        assert!(matches!(result, Err(AssistantError::ApiError(_))));
    }
}
