//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

/// Gemini API request structure
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GeminiGenerationConfig,
}

impl GeminiRequest {
    /// A single-prompt request tuned for short, deterministic naming output.
    pub fn naming(prompt: String) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.2,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 2048,
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

/// Content block for a Gemini API request.
#[derive(Debug, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,
}

/// Text part within a Gemini content block.
#[derive(Debug, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

/// Generation configuration for Gemini API requests.
#[derive(Debug, Serialize)]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    #[serde(rename = "topK")]
    pub top_k: i32,
    #[serde(rename = "topP")]
    pub top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: i32,
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
}

/// Response from the Gemini API.
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, if any.
    pub fn primary_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .first()
            .map(|part| part.text.as_str())
    }
}

/// Candidate response from Gemini.
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiResponseContent,
}

/// Content within a Gemini response candidate.
#[derive(Debug, Deserialize)]
pub struct GeminiResponseContent {
    #[serde(default)]
    pub parts: Vec<GeminiResponsePart>,
}

/// Text part within a Gemini response.
#[derive(Debug, Deserialize)]
pub struct GeminiResponsePart {
    pub text: String,
}

/// Aligned suggestion list produced by the naming prompt. This is the typed
/// boundary for response parsing: anything that does not deserialize into it
/// is a batch failure.
#[derive(Debug, Deserialize)]
pub struct NameSuggestions {
    pub names: Vec<String>,
}
