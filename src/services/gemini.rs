//! Optional generative backend for prompt-to-data generation.
//!
//! When an API key is available the lifecycle API asks Gemini for the
//! payload and falls back to the local generator on failure; callers
//! own that fallback decision.

use anyhow::{anyhow, Context};
use serde_json::{json, Value};

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

const INSTRUCTIONS: &str = "You are a mock data generator for API development. \
Return ONLY valid, parseable JSON for the request below: no markdown fences, no \
explanatory text. The response must start with { or [ and end with } or ]. \
If a specific item count is mentioned, generate exactly that many items; for \
single-item requests return one object, not an array. Infer realistic, diverse \
field values from context and never include real personal data.";

pub struct GeminiClient {
    http: reqwest::Client,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Ask Gemini for a JSON payload matching the prompt.
    pub async fn generate(&self, prompt: &str, api_key: &str) -> anyhow::Result<Value> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": format!("{}\n\nRequest: \"{}\"\n\nGenerate the mock data now:", INSTRUCTIONS, prompt) }]
            }],
            "generationConfig": { "temperature": 0.7, "maxOutputTokens": 8192 }
        });

        let response = self
            .http
            .post(GEMINI_URL)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let detail: Value = response.json().await.unwrap_or(Value::Null);
            let message = detail["error"]["message"]
                .as_str()
                .unwrap_or("Failed to generate with Gemini")
                .to_string();
            return Err(anyhow!("Gemini error ({}): {}", status, message));
        }

        let result: Value = response.json().await.context("Invalid Gemini response")?;
        let text = result["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow!("No response from Gemini"))?;

        serde_json::from_str(strip_code_fences(text)).context("Gemini returned invalid JSON")
    }
}

/// Models wrap JSON in markdown fences despite instructions; strip them.
fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("[1, 2]"), "[1, 2]");
        assert_eq!(strip_code_fences("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }
}
