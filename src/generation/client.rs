use super::GenerationError;
use crate::error::AppError;
use crate::settings::GenerationSettings;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Everything the service needs for one re-shoot.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub photo: Arc<Vec<u8>>,
    pub mime: &'static str,
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub mime: String,
    /// Any text the model returned next to the image.
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 2],
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    #[serde(alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for a Gemini-style `generateContent` endpoint.
#[derive(Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GenerationClient {
    pub fn new(settings: &GenerationSettings, api_key: String) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.trim().to_string(),
            api_key,
        })
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, AppError> {
        let body = build_body(request);
        let url = self.url();
        log::info!("requesting re-shoot from {url}");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            }
            .into());
        }

        parse_response(&text)
    }
}

fn build_body(request: &GenerationRequest) -> GenerateContentBody<'_> {
    GenerateContentBody {
        contents: vec![Content {
            role: "user",
            parts: vec![
                RequestPart {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: request.mime.to_string(),
                        data: BASE64.encode(request.photo.as_slice()),
                    }),
                },
                RequestPart {
                    text: Some(&request.prompt),
                    inline_data: None,
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_modalities: ["IMAGE", "TEXT"],
        },
    }
}

/// Service error message from an error body, or the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.chars().take(300).collect(),
    }
}

fn parse_response(body: &str) -> Result<GeneratedImage, AppError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    let mut notes = Vec::new();
    let mut finish_reason = None;
    for candidate in response.candidates {
        finish_reason = finish_reason.or(candidate.finish_reason);
        let Some(content) = candidate.content else { continue };
        for part in content.parts {
            if let Some(inline) = part.inline_data {
                let data = BASE64.decode(inline.data.as_bytes())?;
                let note = (!notes.is_empty()).then(|| notes.join("\n"));
                return Ok(GeneratedImage {
                    data,
                    mime: inline.mime_type,
                    note,
                });
            }
            if let Some(text) = part.text {
                notes.push(text);
            }
        }
    }

    let reason = response
        .prompt_feedback
        .and_then(|f| f.block_reason)
        .or_else(|| (!notes.is_empty()).then(|| notes.join("\n")))
        .or(finish_reason)
        .unwrap_or_else(|| "empty response".to_string());
    Err(GenerationError::NoImage { reason }.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            photo: Arc::new(vec![0x89, b'P', b'N', b'G']),
            mime: "image/png",
            prompt: "turn around".to_string(),
        }
    }

    #[test]
    fn body_carries_photo_and_prompt() {
        let req = request();
        let json = serde_json::to_value(build_body(&req)).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], BASE64.encode([0x89, b'P', b'N', b'G']));
        assert!(parts[0].get("text").is_none());
        assert_eq!(parts[1]["text"], "turn around");
        assert_eq!(
            json["generationConfig"]["responseModalities"],
            serde_json::json!(["IMAGE", "TEXT"])
        );
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let settings = GenerationSettings {
            endpoint: "https://example.test/v1beta/".to_string(),
            model: " some-model ".to_string(),
            ..GenerationSettings::default()
        };
        let client = GenerationClient::new(&settings, "k".to_string()).unwrap();
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/some-model:generateContent"
        );
    }

    #[test]
    fn picks_first_inline_image() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "Here you go"},
                    {"inlineData": {"mimeType": "image/png", "data": BASE64.encode(b"img")}}
                ]},
                "finishReason": "STOP"
            }]
        })
        .to_string();
        let image = parse_response(&body).unwrap();
        assert_eq!(image.data, b"img");
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.note.as_deref(), Some("Here you go"));
    }

    #[test]
    fn accepts_snake_case_inline_data() {
        let body = format!(
            r#"{{"candidates":[{{"content":{{"parts":[{{"inline_data":{{"mimeType":"image/jpeg","data":"{}"}}}}]}}}}]}}"#,
            BASE64.encode(b"jpg")
        );
        let image = parse_response(&body).unwrap();
        assert_eq!(image.mime, "image/jpeg");
        assert!(image.note.is_none());
    }

    #[test]
    fn blocked_prompt_reports_reason() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(err.summary().contains("SAFETY"), "{}", err.summary());
    }

    #[test]
    fn text_only_answer_is_surfaced() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"I cannot do that"}]}}]}"#;
        let err = parse_response(body).unwrap_err();
        assert!(err.summary().contains("I cannot do that"));
    }

    #[test]
    fn error_message_prefers_service_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
