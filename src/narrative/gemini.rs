use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::{
    narrative::{NarrativeRequest, Narrator},
    prelude::*,
};

/// Google Gemini `generateContent` client.
pub struct Api {
    client: Agent,
    api_key: String,
    model: String,
}

impl Api {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";

    pub fn new(api_key: String, model: String) -> Self {
        let client =
            Agent::config_builder().timeout_global(Some(Duration::from_secs(60))).build().into();
        Self { client, api_key, model }
    }

    #[instrument(skip_all, fields(model = %self.model))]
    pub fn generate_content(&self, prompt: &str) -> Result<String> {
        info!("generating…");
        let response = self
            .client
            .post(format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                self.model,
            ))
            .header("x-goog-api-key", self.api_key.as_str())
            .send_json(Request::new(prompt))?
            .body_mut()
            .read_json::<Response>()?;
        let text = response.text()?;
        info!(n_chars = text.chars().count(), "generated");
        Ok(text)
    }
}

impl Narrator for Api {
    fn narrate(&self, request: &NarrativeRequest<'_>) -> Result<String> {
        self.generate_content(&request.prompt()?)
    }
}

#[derive(Serialize)]
struct Request<'a> {
    contents: [Content<'a>; 1],
}

impl<'a> Request<'a> {
    const fn new(prompt: &'a str) -> Self {
        Self { contents: [Content { parts: [RequestPart { text: prompt }] }] }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,

    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

impl Response {
    /// Text of the first candidate.
    fn text(self) -> Result<String> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            match self.prompt_feedback.and_then(|feedback| feedback.block_reason) {
                Some(reason) => bail!("the prompt is blocked: {reason}"),
                None => bail!("the response contains no candidates"),
            }
        };
        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        ensure!(
            !text.trim().is_empty(),
            "the candidate contains no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown"),
        );
        Ok(text)
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,

    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}
